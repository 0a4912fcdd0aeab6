use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::stop::{self, StopArgs};
use crate::context::Context;

const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Parser)]
#[command(name = "pipectl")]
#[command(author, version, about = "CI/CD pipeline control tool", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    pub global: GlobalFlags,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalFlags {
    /// Server address
    #[arg(short, long, global = true, env = "PIPECTL_SERVER")]
    pub server: Option<String>,

    /// Server auth token
    #[arg(short, long, global = true, env = "PIPECTL_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Skip ssl verification
    #[arg(long, global = true, env = "PIPECTL_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// Socks proxy address
    #[arg(long, global = true, env = "PIPECTL_SOCKS_PROXY")]
    pub socks_proxy: Option<String>,

    /// Disable socks proxy
    #[arg(long, global = true, env = "PIPECTL_SOCKS_PROXY_OFF")]
    pub socks_proxy_off: bool,

    /// Set logging level
    #[arg(long, global = true, env = "PIPECTL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Path to a configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// stop a pipeline
    Stop(StopArgs),
}

impl GlobalFlags {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &str {
        self.log_level
            .as_deref()
            .filter(|level| !level.is_empty())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let context = Context::new(self.global);

        match self.command {
            Commands::Stop(args) => {
                let mut stdout = std::io::stdout().lock();
                stop::execute(&args, &context, &mut stdout).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipectlError;

    #[test]
    fn test_stop_accepts_all_positionals() {
        let cli = Cli::try_parse_from(["pipectl", "stop", "octocat/hello-world", "42", "3"]).unwrap();
        let Commands::Stop(args) = cli.command;
        assert_eq!(args.repo, "octocat/hello-world");
        assert_eq!(args.pipeline.as_deref(), Some("42"));
        assert_eq!(args.step.as_deref(), Some("3"));
    }

    #[test]
    fn test_stop_pipeline_and_step_are_optional_for_clap() {
        let cli = Cli::try_parse_from(["pipectl", "stop", "octocat/hello-world"]).unwrap();
        let Commands::Stop(args) = cli.command;
        assert!(args.pipeline.is_none());
        assert!(args.step.is_none());
    }

    #[test]
    fn test_stop_requires_repository() {
        assert!(Cli::try_parse_from(["pipectl", "stop"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pipectl",
            "stop",
            "octocat/hello-world",
            "7",
            "--server",
            "https://ci.example.com",
            "--token",
            "abc",
            "--skip-verify",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.global.server.as_deref(), Some("https://ci.example.com"));
        assert_eq!(cli.global.token.as_deref(), Some("abc"));
        assert!(cli.global.skip_verify);
        assert!(!cli.global.socks_proxy_off);
        assert_eq!(cli.global.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_non_numeric_positionals_reach_the_command() {
        let cli = Cli::try_parse_from(["pipectl", "stop", "octocat/hello-world", "abc", "xyz"]).unwrap();
        let Commands::Stop(args) = cli.command;
        assert_eq!(args.pipeline.as_deref(), Some("abc"));
        assert_eq!(args.step.as_deref(), Some("xyz"));
    }

    fn malformed_config() -> (tempfile::TempDir, String) {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("pipectl.toml");
        std::fs::write(&path, "server = [unterminated").unwrap();
        let path = path.to_str().unwrap().to_string();
        (temp_dir, path)
    }

    fn execute_err(args: &[&str]) -> PipectlError {
        let cli = Cli::try_parse_from(args).unwrap();
        let err = tokio_test::block_on(cli.execute()).unwrap_err();
        err.downcast::<PipectlError>().unwrap()
    }

    #[test]
    fn test_bad_repository_wins_over_malformed_config() {
        let (_dir, config) = malformed_config();
        let err = execute_err(&["pipectl", "stop", "reponame", "1", "--config", &config]);

        assert!(matches!(err, PipectlError::InvalidRepository(_)));
    }

    #[test]
    fn test_missing_pipeline_wins_over_malformed_config() {
        let (_dir, config) = malformed_config();
        let err = execute_err(&["pipectl", "stop", "octocat/hello-world", "--config", &config]);

        assert!(matches!(err, PipectlError::MissingPipelineNumber));
    }

    #[test]
    fn test_malformed_config_surfaces_after_arguments_resolve() {
        let (_dir, config) = malformed_config();
        let err = execute_err(&["pipectl", "stop", "octocat/hello-world", "1", "--config", &config]);

        assert!(matches!(err, PipectlError::Config(_)));
    }

    #[test]
    fn test_log_filter() {
        assert_eq!(GlobalFlags::default().log_filter(), "warn");

        let cli = Cli::try_parse_from(["pipectl", "stop", "octocat/hello-world", "--log-level", "debug"])
            .unwrap();
        assert_eq!(cli.global.log_filter(), "debug");
    }
}
