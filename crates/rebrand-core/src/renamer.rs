use std::path::Path;
use tracing::debug;

/// Default set of file suffixes eligible for content rewriting and renaming.
pub const DEFAULT_EXTENSION_FILTER: &str = ".cs,.cshtml,.js,.ts,.csproj,.sln,.xml,.config";

/// Ordered literal substitution of the company and project tokens.
///
/// The company token is always replaced before the project token, in names and
/// in content alike. Replacements are plain string substitution over all
/// occurrences, never regex.
pub struct TokenRenamer {
    company: Option<Replacement>,
    project: Replacement,
}

struct Replacement {
    old: String,
    new: String,
}

impl TokenRenamer {
    /// An empty old company name disables company substitution. An empty new
    /// company name widens the searched token with the trailing separator, so
    /// `MyCompanyName.Project` collapses to `Project` instead of keeping a
    /// leading dot.
    pub fn new(old_company: &str, new_company: &str, old_project: &str, new_project: &str) -> Self {
        let company = if old_company.is_empty() {
            None
        } else if new_company.is_empty() {
            Some(Replacement {
                old: format!("{old_company}."),
                new: String::new(),
            })
        } else {
            Some(Replacement {
                old: old_company.to_string(),
                new: new_company.to_string(),
            })
        };

        Self {
            company,
            project: Replacement {
                old: old_project.to_string(),
                new: new_project.to_string(),
            },
        }
    }

    /// Replaces every occurrence of the company token, then every occurrence
    /// of the project token.
    pub fn rewrite_content(&self, content: &str) -> String {
        let rewritten = match &self.company {
            Some(company) => content.replace(&company.old, &company.new),
            None => content.to_string(),
        };
        rewritten.replace(&self.project.old, &self.project.new)
    }

    /// Returns the substituted name when `name` holds the company or project
    /// token, `None` otherwise.
    pub fn rename_name(&self, name: &str) -> Option<String> {
        if !self.name_matches(name) {
            return None;
        }
        let new_name = self.rewrite_content(name);
        debug!("Name replacement: '{}' -> '{}'", name, new_name);
        Some(new_name)
    }

    fn name_matches(&self, name: &str) -> bool {
        self.company
            .as_ref()
            .is_some_and(|company| name.contains(&company.old))
            || name.contains(&self.project.old)
    }
}

/// The set of file suffixes eligible for content rewriting and renaming.
///
/// Matching is exact set containment against the file's extension including
/// the leading dot; files without an extension never match.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    extensions: Vec<String>,
}

impl ExtensionFilter {
    /// Parses a comma-separated extension list. Entries are trimmed and get a
    /// leading dot when missing; empty entries are dropped.
    pub fn parse(spec: &str) -> Self {
        let extensions = spec
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty() && *entry != ".")
            .map(|entry| {
                if entry.starts_with('.') {
                    entry.to_string()
                } else {
                    format!(".{entry}")
                }
            })
            .collect();
        Self { extensions }
    }

    pub fn matches(&self, path: &Path) -> bool {
        let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let dotted = format!(".{extension}");
        self.extensions.iter().any(|candidate| *candidate == dotted)
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::parse(DEFAULT_EXTENSION_FILTER)
    }
}
