use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::aibom_aggregation::services::GroupBy;

/// Aggregate AI Bills of Materials across a Snyk organization or group
#[derive(Parser, Debug)]
#[command(name = "aibom-tools")]
#[command(version)]
#[command(
    about = "Aggregate AI Bills of Materials across a Snyk organization or group",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection and configuration options shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Snyk API token
    #[arg(long, env = "SNYK_API_TOKEN", hide_env_values = true, global = true)]
    pub api_token: Option<String>,

    /// Snyk organization ID
    #[arg(long, env = "SNYK_ORG_ID", global = true)]
    pub org_id: Option<String>,

    /// Snyk group ID; every organization of the group is scanned
    #[arg(long, env = "SNYK_GROUP_ID", global = true)]
    pub group_id: Option<String>,

    /// Snyk API base URL [default: https://api.snyk.io]
    #[arg(long, env = "SNYK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Config file path (defaults to ./aibom-tools.config.yml when present)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch, aggregate and report the AI-BOMs of every supported target
    Scan(ScanArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// JSON report file (stdout when neither --output nor --html is given)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// HTML report file
    #[arg(long, value_name = "PATH")]
    pub html: Option<PathBuf>,

    /// Comma separated component types to keep, e.g. "ML Model,datasets"
    #[arg(short, long, value_name = "LIST")]
    pub include: Option<String>,

    /// Group the JSON report by component type or by repository
    #[arg(short, long, value_name = "KEY")]
    pub group_by: Option<GroupBy>,

    /// Forbidden-model policy YAML file
    #[arg(short, long, value_name = "PATH")]
    pub policy: Option<PathBuf>,

    /// Re-aggregate a saved all_aibom_data JSON file instead of calling the API
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Number of AI-BOMs fetched in parallel (1-16) [default: 4]
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..=16))]
    pub concurrency: Option<u64>,

    /// Exit with code 1 when a forbidden model is found
    #[arg(long)]
    pub fail_on_violation: bool,

    /// Fail when no target produces a usable AI-BOM
    #[arg(long)]
    pub fail_on_empty: bool,
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

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("aibom-tools").chain(args.iter().copied()))
    }

    fn scan_args(cli: Cli) -> ScanArgs {
        match cli.command {
            Command::Scan(args) => args,
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scan_with_all_options() {
        let cli = parse(&[
            "--org-id",
            "org-1",
            "scan",
            "-o",
            "report.json",
            "--html",
            "report.html",
            "-i",
            "ML Model,datasets",
            "-g",
            "repository",
            "-p",
            "policy.yml",
            "--concurrency",
            "8",
            "--fail-on-violation",
        ])
        .unwrap();

        assert_eq!(cli.global.org_id.as_deref(), Some("org-1"));
        let args = scan_args(cli);
        assert_eq!(args.output, Some(PathBuf::from("report.json")));
        assert_eq!(args.html, Some(PathBuf::from("report.html")));
        assert_eq!(args.include.as_deref(), Some("ML Model,datasets"));
        assert_eq!(args.group_by, Some(GroupBy::Repository));
        assert_eq!(args.policy, Some(PathBuf::from("policy.yml")));
        assert_eq!(args.concurrency, Some(8));
        assert!(args.fail_on_violation);
        assert!(!args.fail_on_empty);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["scan", "--group-id", "grp-1", "--debug"]).unwrap();
        assert_eq!(cli.global.group_id.as_deref(), Some("grp-1"));
        assert!(cli.global.debug);
    }

    #[test]
    fn test_invalid_group_by_is_rejected() {
        let err = parse(&["scan", "-g", "owner"]).unwrap_err();
        assert!(err.to_string().contains("Invalid group-by value"));
    }

    #[test]
    fn test_concurrency_out_of_range_is_rejected() {
        assert!(parse(&["scan", "--concurrency", "0"]).is_err());
        assert!(parse(&["scan", "--concurrency", "17"]).is_err());
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(parse(&[]).is_err());
    }
}
