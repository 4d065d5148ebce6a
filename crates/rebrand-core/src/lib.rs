use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub mod progress;
pub mod renamer;

pub use progress::{CancelFlag, ProgressEvent};
pub use renamer::{ExtensionFilter, TokenRenamer, DEFAULT_EXTENSION_FILTER};

const VCS_DIR: &str = ".git";

#[derive(thiserror::Error, Debug)]
pub enum RenameError {
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Parameters of a single rename run. Constructed once per run and immutable
/// while the run is in flight; the directory being processed is threaded
/// through the recursion as an explicit argument, never stored here.
#[derive(Debug, Clone)]
pub struct RenameRequest {
    pub root_dir: PathBuf,
    pub old_company_name: String,
    pub old_project_name: String,
    pub new_company_name: String,
    pub new_project_name: String,
    pub extension_filter: ExtensionFilter,
    pub dry_run: bool,
}

impl RenameRequest {
    /// Rejects a run before any filesystem mutation happens.
    fn validate(&self) -> Result<(), RenameError> {
        if self.old_project_name.is_empty() {
            return Err(invalid_input("the old project name must not be empty"));
        }
        if self.new_project_name.is_empty() {
            return Err(invalid_input("a new project name is required"));
        }
        if !self.root_dir.exists() {
            return Err(RenameError::InvalidInput {
                message: format!("root directory does not exist: {}", self.root_dir.display()),
            });
        }
        if !self.root_dir.is_dir() {
            return Err(RenameError::InvalidInput {
                message: format!("root path is not a directory: {}", self.root_dir.display()),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    /// The run stopped at a cancellation poll point. Completed renames stay
    /// in place; nothing is rolled back.
    Terminated,
}

#[derive(Debug, Clone)]
pub struct RenameReport {
    pub status: RunStatus,
    pub directories_renamed: usize,
    pub files_renamed: usize,
    pub files_processed: usize,
    pub directory_phase: Duration,
    pub file_phase: Duration,
}

/// Runs a full rename: the directory pass to completion, then the file pass,
/// both starting from the root captured out of `request`. Each pass is timed
/// separately. Progress events are delivered through `progress` in operation
/// order; cancellation through `cancel` yields a `Terminated` report rather
/// than an error.
pub fn run_rename<F>(
    request: &RenameRequest,
    progress: F,
    cancel: &CancelFlag,
) -> Result<RenameReport, RenameError>
where
    F: Fn(ProgressEvent),
{
    request.validate()?;

    let renamer = TokenRenamer::new(
        &request.old_company_name,
        &request.new_company_name,
        &request.old_project_name,
        &request.new_project_name,
    );

    // Both passes start from the same captured root. The directory pass only
    // renames descendants, so this path stays valid for the file pass.
    let root = request.root_dir.clone();

    info!("Starting rename run: {:?}", root);

    let mut report = RenameReport {
        status: RunStatus::Completed,
        directories_renamed: 0,
        files_renamed: 0,
        files_processed: 0,
        directory_phase: Duration::ZERO,
        file_phase: Duration::ZERO,
    };
    let mut sequence = 0usize;

    let started = Instant::now();
    rename_directories_recursive(
        &root,
        &renamer,
        request.dry_run,
        &progress,
        cancel,
        &mut report,
        &mut sequence,
    )?;
    report.directory_phase = started.elapsed();

    if cancel.is_cancelled() {
        report.status = RunStatus::Terminated;
        info!("Run terminated during the directory pass");
        return Ok(report);
    }

    let started = Instant::now();
    rename_files_recursive(
        &root,
        &renamer,
        &request.extension_filter,
        request.dry_run,
        &progress,
        cancel,
        &mut report,
        &mut sequence,
    )?;
    report.file_phase = started.elapsed();

    if cancel.is_cancelled() {
        report.status = RunStatus::Terminated;
        info!("Run terminated during the file pass");
    } else {
        info!(
            "Rename complete: {} directories renamed, {} files renamed, {} files processed",
            report.directories_renamed, report.files_renamed, report.files_processed
        );
    }

    Ok(report)
}

/// Depth-first, post-order: every subdirectory is fully processed before it
/// is itself renamed, so the paths held for its children never go stale. The
/// directory passed in is never renamed, only its descendants.
fn rename_directories_recursive<F>(
    dir: &Path,
    renamer: &TokenRenamer,
    dry_run: bool,
    progress: &F,
    cancel: &CancelFlag,
    report: &mut RenameReport,
    sequence: &mut usize,
) -> Result<(), RenameError>
where
    F: Fn(ProgressEvent),
{
    debug!("Processing directory: {:?}", dir);

    for subdir in subdirectories(dir)? {
        if cancel.is_cancelled() {
            return Ok(());
        }

        rename_directories_recursive(&subdir, renamer, dry_run, progress, cancel, report, sequence)?;

        let Some(name) = subdir.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        let Some(new_name) = renamer.rename_name(name) else {
            continue;
        };
        let new_path = dir.join(&new_name);
        if new_path == subdir {
            continue;
        }

        emit(progress, sequence, format!("{} => {}", subdir.display(), new_path.display()));
        report.directories_renamed += 1;

        if dry_run {
            info!("Would rename directory: {:?} -> {:?}", subdir, new_path);
            continue;
        }

        if new_path.exists() {
            return Err(RenameError::Io {
                path: new_path,
                source: io::Error::new(io::ErrorKind::AlreadyExists, "rename target already exists"),
            });
        }

        info!("Renaming directory: {:?} -> {:?}", subdir, new_path);
        fs::rename(&subdir, &new_path).map_err(|source| io_error(&subdir, source))?;
    }

    Ok(())
}

/// Per directory level: rewrite and rename the matching files first, then
/// recurse into subdirectories. Directory names were already handled by the
/// directory pass, which ran to completion before this one started.
fn rename_files_recursive<F>(
    dir: &Path,
    renamer: &TokenRenamer,
    filter: &ExtensionFilter,
    dry_run: bool,
    progress: &F,
    cancel: &CancelFlag,
    report: &mut RenameReport,
    sequence: &mut usize,
) -> Result<(), RenameError>
where
    F: Fn(ProgressEvent),
{
    debug!("Processing files in: {:?}", dir);

    let entries = sorted_entries(dir)?;

    let files = entries
        .iter()
        .filter(|path| path.is_file() && filter.matches(path) && !contains_vcs_segment(path));
    for file in files {
        if cancel.is_cancelled() {
            return Ok(());
        }
        rewrite_file(dir, file, renamer, dry_run, progress, report, sequence)?;
    }

    let subdirs = entries
        .iter()
        .filter(|path| path.is_dir() && !is_vcs_dir(path));
    for subdir in subdirs {
        if cancel.is_cancelled() {
            return Ok(());
        }
        rename_files_recursive(subdir, renamer, filter, dry_run, progress, cancel, report, sequence)?;
    }

    Ok(())
}

fn rewrite_file<F>(
    dir: &Path,
    file: &Path,
    renamer: &TokenRenamer,
    dry_run: bool,
    progress: &F,
    report: &mut RenameReport,
    sequence: &mut usize,
) -> Result<(), RenameError>
where
    F: Fn(ProgressEvent),
{
    debug!("Processing file: {:?}", file);

    let bytes = fs::read(file).map_err(|source| io_error(file, source))?;
    // Lossy decode: a binary file that slips through the extension filter is
    // rewritten as text and corrupted.
    let content = String::from_utf8_lossy(&bytes);
    let rewritten = renamer.rewrite_content(&content);

    let name = file.file_name().and_then(|name| name.to_str());
    let renamed_path = name
        .and_then(|name| renamer.rename_name(name))
        .map(|new_name| dir.join(new_name))
        .filter(|new_path| new_path != file);

    if let Some(new_path) = renamed_path {
        emit(progress, sequence, format!("{} => {}", file.display(), new_path.display()));
        report.files_renamed += 1;

        if dry_run {
            info!("Would rename file: {:?} -> {:?}", file, new_path);
        } else {
            info!("Renaming file: {:?} -> {:?}", file, new_path);
            // Delete-then-write, not an atomic move: a failure between the two
            // calls leaves no copy of the file.
            fs::remove_file(file).map_err(|source| io_error(file, source))?;
            fs::write(&new_path, rewritten.as_bytes()).map_err(|source| io_error(&new_path, source))?;
        }
    } else if !dry_run {
        fs::write(file, rewritten.as_bytes()).map_err(|source| io_error(file, source))?;
    }

    report.files_processed += 1;
    let done_name = name.map(str::to_string).unwrap_or_else(|| file.display().to_string());
    emit(progress, sequence, format!("{done_name} => complete"));

    Ok(())
}

fn emit<F>(progress: &F, sequence: &mut usize, message: String)
where
    F: Fn(ProgressEvent),
{
    let event = ProgressEvent {
        sequence: *sequence,
        message,
    };
    *sequence += 1;
    progress(event);
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, RenameError> {
    let reader = fs::read_dir(dir).map_err(|source| io_error(dir, source))?;
    let mut entries = Vec::new();
    for entry in reader {
        let entry = entry.map_err(|source| io_error(dir, source))?;
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}

fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>, RenameError> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|path| path.is_dir() && !is_vcs_dir(path))
        .collect())
}

fn is_vcs_dir(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == VCS_DIR)
}

fn contains_vcs_segment(path: &Path) -> bool {
    path.components().any(|component| component.as_os_str() == VCS_DIR)
}

fn invalid_input(message: &str) -> RenameError {
    RenameError::InvalidInput {
        message: message.to_string(),
    }
}

fn io_error(path: &Path, source: io::Error) -> RenameError {
    RenameError::Io {
        path: path.to_path_buf(),
        source,
    }
}
