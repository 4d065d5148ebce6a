use anyhow::{Context, Result};
use rebrand_core::RenameRequest;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Inputs remembered across invocations, used to seed the interactive
/// prompts. Loading never fails the run; a missing or unreadable file just
/// falls back to the defaults.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub old_company_name: Option<String>,
    pub old_project_name: Option<String>,
    pub new_company_name: Option<String>,
    pub root_dir: Option<PathBuf>,
    pub extension_filter: Option<String>,
}

impl Settings {
    pub fn load() -> Self {
        let Some(path) = settings_path() else {
            return Self::default();
        };
        match fs::read_to_string(&path) {
            Ok(raw) => serde_yaml::from_str(&raw).unwrap_or_else(|error| {
                debug!("Ignoring unreadable settings at {:?}: {}", path, error);
                Self::default()
            }),
            Err(error) => {
                debug!("No stored settings at {:?}: {}", path, error);
                Self::default()
            }
        }
    }

    pub fn store(&self) -> Result<()> {
        let path = settings_path().context("no user configuration directory available")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Seeds the next invocation with the identity this run produced, so an
    /// immediate re-run against the renamed tree starts from matching
    /// defaults.
    pub fn remember_run(request: &RenameRequest, filter_spec: &str) -> Self {
        Self {
            old_company_name: non_empty(&request.new_company_name),
            old_project_name: non_empty(&request.new_project_name),
            new_company_name: non_empty(&request.new_company_name),
            root_dir: Some(request.root_dir.clone()),
            extension_filter: Some(filter_spec.to_string()),
        }
    }
}

fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rebrand").join("settings.yaml"))
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebrand_core::ExtensionFilter;

    #[test]
    fn test_settings_round_trip() {
        let settings = Settings {
            old_company_name: Some("Acme".to_string()),
            old_project_name: Some("Widget".to_string()),
            new_company_name: None,
            root_dir: Some(PathBuf::from("/work/solution")),
            extension_filter: Some(".cs,.sln".to_string()),
        };

        let raw = serde_yaml::to_string(&settings).unwrap();
        let restored: Settings = serde_yaml::from_str(&raw).unwrap();

        assert_eq!(restored.old_company_name.as_deref(), Some("Acme"));
        assert_eq!(restored.old_project_name.as_deref(), Some("Widget"));
        assert_eq!(restored.new_company_name, None);
        assert_eq!(restored.root_dir, Some(PathBuf::from("/work/solution")));
        assert_eq!(restored.extension_filter.as_deref(), Some(".cs,.sln"));
    }

    #[test]
    fn test_partial_settings_fill_with_defaults() {
        let restored: Settings = serde_yaml::from_str("old_project_name: Widget\n").unwrap();

        assert_eq!(restored.old_project_name.as_deref(), Some("Widget"));
        assert_eq!(restored.old_company_name, None);
        assert_eq!(restored.root_dir, None);
    }

    #[test]
    fn test_remember_run_swaps_old_for_new() {
        let request = RenameRequest {
            root_dir: PathBuf::from("/work/solution"),
            old_company_name: "MyCompanyName".to_string(),
            old_project_name: "AbpZeroTemplate".to_string(),
            new_company_name: String::new(),
            new_project_name: "Widget".to_string(),
            extension_filter: ExtensionFilter::default(),
            dry_run: false,
        };

        let settings = Settings::remember_run(&request, ".cs,.sln");

        assert_eq!(settings.old_company_name, None);
        assert_eq!(settings.old_project_name.as_deref(), Some("Widget"));
        assert_eq!(settings.root_dir, Some(PathBuf::from("/work/solution")));
        assert_eq!(settings.extension_filter.as_deref(), Some(".cs,.sln"));
    }
}
