mod cli;
mod prompts;
mod settings;

use anyhow::{anyhow, Result};
use cli::Cli;
use rebrand_core::{CancelFlag, ProgressEvent, RenameReport, RunStatus};
use settings::Settings;
use std::sync::mpsc;
use std::thread;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    setup_logging(&cli)?;

    info!("Starting rebrand");

    let stored = if cli.no_remember {
        Settings::default()
    } else {
        Settings::load()
    };

    let (request, filter_spec) = prompts::resolve_request(&cli, &stored)?;

    info!(
        "Company replacement: '{}' -> '{}'",
        request.old_company_name, request.new_company_name
    );
    info!(
        "Project replacement: '{}' -> '{}'",
        request.old_project_name, request.new_project_name
    );
    info!("Root directory: {:?}", request.root_dir);
    info!("Extension filter: {}", filter_spec);

    if request.dry_run {
        warn!("Dry run mode - no changes will be made");
    }

    if !cli.yes && !prompts::confirm_run(&request)? {
        info!("Aborted before any changes");
        return Ok(());
    }

    // The engine runs on its own thread so this one stays responsive to
    // ctrl-c and can drain progress events as they are emitted.
    let cancel = CancelFlag::new();
    let handler_flag = cancel.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nCancellation requested, stopping after the current entry...");
        handler_flag.cancel();
    })?;

    let (sender, receiver) = mpsc::channel::<ProgressEvent>();
    let worker = {
        let request = request.clone();
        let cancel = cancel.clone();
        thread::spawn(move || {
            rebrand_core::run_rename(
                &request,
                move |event| {
                    let _ = sender.send(event);
                },
                &cancel,
            )
        })
    };

    // The worker owns the only sender; the loop ends when the run finishes.
    for event in receiver {
        println!("{}", event.message);
    }

    let report = worker
        .join()
        .map_err(|_| anyhow!("rename worker panicked"))??;

    match report.status {
        RunStatus::Terminated => {
            println!("Rebrand terminated!");
            print_summary(&report);
            warn!("Run terminated; completed renames were kept");
        }
        RunStatus::Completed => {
            println!("Rebrand complete!");
            print_summary(&report);

            if !cli.no_remember && !request.dry_run {
                if let Err(error) = Settings::remember_run(&request, &filter_spec).store() {
                    warn!("Could not store settings: {error:#}");
                }
            }
        }
    }

    Ok(())
}

fn print_summary(report: &RenameReport) {
    println!("  Directories renamed: {}", report.directories_renamed);
    println!("  Files renamed: {}", report.files_renamed);
    println!("  Files processed: {}", report.files_processed);
    println!(
        "  Directory pass: {} ms / file pass: {} ms",
        report.directory_phase.as_millis(),
        report.file_phase.as_millis()
    );
}

fn setup_logging(cli: &Cli) -> Result<()> {
    let filter = if cli.quiet {
        EnvFilter::new("error")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .with(filter)
        .init();

    Ok(())
}
