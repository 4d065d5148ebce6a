use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rebrand")]
#[command(version)]
#[command(about = "Rebrand a cloned solution template to a new identity")]
#[command(long_about = "A CLI tool that recursively renames directories, file names and in-file text, substituting an old company and project name with new values throughout a solution tree. Inputs not given as arguments are prompted for interactively.")]
pub struct Cli {
    #[arg(long, help = "Company token to search for (prompted when omitted)")]
    pub old_company: Option<String>,

    #[arg(long, help = "Project token to search for (prompted when omitted)")]
    pub old_project: Option<String>,

    #[arg(long, help = "Replacement company name (may be empty to drop the prefix)")]
    pub new_company: Option<String>,

    #[arg(long, help = "Replacement project name (required, prompted when omitted)")]
    pub new_project: Option<String>,

    #[arg(help = "Root directory of the solution (prompted when omitted)")]
    pub target: Option<PathBuf>,

    #[arg(long, help = "Comma-separated file extensions eligible for rewriting")]
    pub filter: Option<String>,

    #[arg(long, help = "Perform a dry run without making changes")]
    pub dry_run: bool,

    #[arg(short, long, help = "Skip the confirmation prompt")]
    pub yes: bool,

    #[arg(long, help = "Do not load or store remembered inputs")]
    pub no_remember: bool,

    #[arg(short, long)]
    pub verbose: bool,

    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_full_argument_set() {
        let args = vec![
            "rebrand",
            "--old-company",
            "MyCompanyName",
            "--old-project",
            "AbpZeroTemplate",
            "--new-company",
            "Acme",
            "--new-project",
            "Widget",
            "--filter",
            ".cs,.sln",
            "--dry-run",
            "--yes",
            "/tmp/solution",
        ];

        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.old_company.as_deref(), Some("MyCompanyName"));
        assert_eq!(cli.old_project.as_deref(), Some("AbpZeroTemplate"));
        assert_eq!(cli.new_company.as_deref(), Some("Acme"));
        assert_eq!(cli.new_project.as_deref(), Some("Widget"));
        assert_eq!(cli.filter.as_deref(), Some(".cs,.sln"));
        assert_eq!(cli.target, Some(PathBuf::from("/tmp/solution")));
        assert!(cli.dry_run);
        assert!(cli.yes);
        assert!(!cli.no_remember);
    }

    #[test]
    fn test_empty_new_company_is_accepted() {
        let args = vec!["rebrand", "--new-company", "", "--new-project", "Widget"];

        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.new_company.as_deref(), Some(""));
    }
}
