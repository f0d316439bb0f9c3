use crate::commands::{
    run_hired, run_match, run_preprocess, run_search, run_stats, HiredArgs, MatchArgs,
    PreprocessArgs, SearchArgs,
};
use crate::infra::{AppContext, DataSource, OutputFormat};
use clap::{Parser, Subcommand};
use talent_match::config::AppConfig;
use talent_match::error::AppError;
use talent_match::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "talent-match",
    about = "Match résumés to jobs, search candidates and profile hires",
    version
)]
pub(crate) struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub(crate) json: bool,
    /// Download and join the sources instead of reading the snapshot
    #[arg(long, global = true)]
    pub(crate) download: bool,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Download, join and sample the sources, then write the snapshot
    Preprocess(PreprocessArgs),
    /// Summarize the application table
    Stats,
    /// Rank a job's candidates by résumé compatibility
    Match(MatchArgs),
    /// Find candidates by keywords, name or id
    Search(SearchArgs),
    /// Profile hired candidates
    Hired(HiredArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, "configuration loaded");

    let format = OutputFormat::from_flag(cli.json);
    let source = if cli.download {
        DataSource::Download
    } else {
        DataSource::Snapshot
    };

    match cli.command {
        Command::Preprocess(args) => run_preprocess(&config, args, format),
        Command::Stats => run_stats(&AppContext::load(config, source)?, format),
        Command::Match(args) => run_match(&AppContext::load(config, source)?, args, format),
        Command::Search(args) => run_search(&AppContext::load(config, source)?, args, format),
        Command::Hired(args) => run_hired(&AppContext::load(config, source)?, args, format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_requires_a_job_selector() {
        assert!(Cli::try_parse_from(["talent-match", "match"]).is_err());
        let cli = Cli::try_parse_from(["talent-match", "match", "--job-id", "4530", "--json"])
            .expect("parses");
        assert!(cli.json);
        match cli.command {
            Command::Match(args) => {
                assert_eq!(args.job_id.as_deref(), Some("4530"));
                assert_eq!(args.page, 1);
            }
            other => panic!("expected match command, got {other:?}"),
        }
    }

    #[test]
    fn page_numbers_must_be_positive() {
        let parsed =
            Cli::try_parse_from(["talent-match", "search", "--name", "ana", "--page", "0"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn download_flag_is_global() {
        let cli = Cli::try_parse_from(["talent-match", "stats", "--download"]).expect("parses");
        assert!(cli.download);
        assert!(matches!(cli.command, Command::Stats));
    }

    #[test]
    fn preprocess_accepts_a_local_directory() {
        let cli = Cli::try_parse_from(["talent-match", "preprocess", "--local-dir", "dados"])
            .expect("parses");
        match cli.command {
            Command::Preprocess(args) => {
                assert_eq!(args.local_dir, Some(std::path::PathBuf::from("dados")));
            }
            other => panic!("expected preprocess command, got {other:?}"),
        }
    }
}
