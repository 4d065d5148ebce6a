use anyhow::Result;
use inquire::validator::Validation;
use inquire::{Confirm, Text};
use rebrand_core::{ExtensionFilter, RenameRequest, DEFAULT_EXTENSION_FILTER};
use std::path::PathBuf;

use crate::cli::Cli;
use crate::settings::Settings;

pub const DEFAULT_OLD_COMPANY: &str = "MyCompanyName";
pub const DEFAULT_OLD_PROJECT: &str = "AbpZeroTemplate";

/// Resolves the run inputs: command-line arguments win, then stored settings,
/// then an interactive prompt with the built-in defaults. Also returns the
/// raw filter spec so it can be remembered verbatim.
pub fn resolve_request(cli: &Cli, stored: &Settings) -> Result<(RenameRequest, String)> {
    let old_company = match &cli.old_company {
        Some(value) => value.trim().to_string(),
        None => Text::new("Old company name:")
            .with_default(
                stored
                    .old_company_name
                    .as_deref()
                    .unwrap_or(DEFAULT_OLD_COMPANY),
            )
            .prompt()?
            .trim()
            .to_string(),
    };

    let old_project = match &cli.old_project {
        Some(value) => value.trim().to_string(),
        None => Text::new("Old project name:")
            .with_default(
                stored
                    .old_project_name
                    .as_deref()
                    .unwrap_or(DEFAULT_OLD_PROJECT),
            )
            .prompt()?
            .trim()
            .to_string(),
    };

    let new_company = match &cli.new_company {
        Some(value) => value.trim().to_string(),
        None => Text::new("New company name (leave empty to drop the prefix):")
            .with_default(stored.new_company_name.as_deref().unwrap_or(""))
            .prompt()?
            .trim()
            .to_string(),
    };

    let new_project = match &cli.new_project {
        Some(value) => value.trim().to_string(),
        None => Text::new("New project name:")
            .with_validator(|input: &str| {
                if input.trim().is_empty() {
                    Ok(Validation::Invalid("a new project name is required".into()))
                } else {
                    Ok(Validation::Valid)
                }
            })
            .prompt()?
            .trim()
            .to_string(),
    };

    let root_dir = match &cli.target {
        Some(path) => path.clone(),
        None => {
            let default = stored
                .root_dir
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default();
            let answer = Text::new("Solution root directory:")
                .with_default(&default)
                .prompt()?;
            PathBuf::from(answer.trim())
        }
    };

    // The filter is never prompted for; arguments and remembered values fall
    // back to the built-in default list.
    let filter_spec = match &cli.filter {
        Some(value) => value.clone(),
        None => stored
            .extension_filter
            .clone()
            .unwrap_or_else(|| DEFAULT_EXTENSION_FILTER.to_string()),
    };

    let request = RenameRequest {
        root_dir,
        old_company_name: old_company,
        old_project_name: old_project,
        new_company_name: new_company,
        new_project_name: new_project,
        extension_filter: ExtensionFilter::parse(&filter_spec),
        dry_run: cli.dry_run,
    };

    Ok((request, filter_spec))
}

/// Last gate before the tree is mutated.
pub fn confirm_run(request: &RenameRequest) -> Result<bool> {
    let prompt = format!(
        "Rename '{}' / '{}' to '{}' / '{}' under {}?",
        request.old_company_name,
        request.old_project_name,
        request.new_company_name,
        request.new_project_name,
        request.root_dir.display(),
    );

    Ok(Confirm::new(&prompt).with_default(true).prompt()?)
}
