//! Command-line interface for batchbox.

use std::path::PathBuf;

use batchbox_core::HarnessConfig;
use batchbox_sitemap::SitemapConfig;
use clap::{Args, Parser, Subcommand};

/// Command-line interface for batchbox.
#[derive(Debug, Parser)]
#[command(name = "batchbox")]
#[command(about = "Prepare the output directory, run one task, exit with its status")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output directory (can also be set via BATCHBOX_OUTPUT_DIR)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Do not ask the task to flush its output unbuffered
    #[arg(long)]
    pub no_unbuffered_output: bool,

    /// Allow the task to write bytecode caches
    #[arg(long)]
    pub bytecode_cache: bool,

    /// Task to run (defaults to `sitemap`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Crawl a website and write sitemap.xml into the output directory
    Sitemap(SitemapArgs),

    /// Run an external program as the task
    Exec {
        /// Program to run
        program: String,

        /// Arguments passed to the program unchanged
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Print the effective configuration as JSON
    Config,
}

#[derive(Debug, Default, Args)]
pub struct SitemapArgs {
    /// Start URL (can also be set via WEBSITE_URL)
    #[arg(long)]
    pub url: Option<String>,

    /// Maximum pages to crawl (can also be set via MAX_PAGES)
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Pause between requests in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

impl Cli {
    pub fn apply(&self, config: &mut HarnessConfig) {
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if self.no_unbuffered_output {
            config.environment.unbuffered_output = false;
        }
        if self.bytecode_cache {
            config.environment.no_bytecode_cache = false;
        }
    }

    pub fn command(self) -> Commands {
        self.command
            .unwrap_or_else(|| Commands::Sitemap(SitemapArgs::default()))
    }
}

impl SitemapArgs {
    pub fn apply(&self, config: &mut SitemapConfig) {
        if let Some(url) = &self.url {
            config.website_url = url.clone();
        }
        if let Some(max_pages) = self.max_pages {
            config.max_pages = max_pages;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.request_delay_ms = delay_ms;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("batchbox").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_command_means_sitemap() {
        let cli = parse(&[]);
        assert!(matches!(cli.command(), Commands::Sitemap(_)));
    }

    #[test]
    fn exec_keeps_hyphenated_args() {
        let cli = parse(&["exec", "python", "-u", "main.py", "--flag"]);
        match cli.command() {
            Commands::Exec { program, args } => {
                assert_eq!(program, "python");
                assert_eq!(args, vec!["-u", "main.py", "--flag"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn exec_requires_a_program() {
        assert!(Cli::try_parse_from(["batchbox", "exec"]).is_err());
    }

    #[rstest]
    #[case::defaults(&[], "/app/output", true, true)]
    #[case::output_dir(&["--output-dir", "/tmp/out"], "/tmp/out", true, true)]
    #[case::flags(&["--no-unbuffered-output", "--bytecode-cache"], "/app/output", false, false)]
    fn global_flags_override_harness_config(
        #[case] args: &[&str],
        #[case] output_dir: &str,
        #[case] unbuffered: bool,
        #[case] no_bytecode_cache: bool,
    ) {
        let mut config = HarnessConfig::default();
        parse(args).apply(&mut config);

        assert_eq!(config.output_dir, PathBuf::from(output_dir));
        assert_eq!(config.environment.unbuffered_output, unbuffered);
        assert_eq!(config.environment.no_bytecode_cache, no_bytecode_cache);
    }

    #[test]
    fn sitemap_args_override_config() {
        let cli = parse(&[
            "sitemap",
            "--url",
            "https://docs.example.org",
            "--max-pages",
            "10",
            "--delay-ms",
            "0",
        ]);
        let Commands::Sitemap(args) = cli.command() else {
            panic!("expected sitemap command");
        };

        let mut config = SitemapConfig::default();
        args.apply(&mut config);

        assert_eq!(config.website_url, "https://docs.example.org");
        assert_eq!(config.max_pages, 10);
        assert_eq!(config.request_delay_ms, 0);
    }

    #[test]
    fn unset_sitemap_args_keep_config() {
        let mut config = SitemapConfig::default();
        SitemapArgs::default().apply(&mut config);
        assert_eq!(config, SitemapConfig::default());
    }
}
