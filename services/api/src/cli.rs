use crate::reports::{run_assessment, run_streak_report, AssessArgs, StreakArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use yenquit::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "YenQuit",
    about = "Serve or query the YenQuit smoke-free progress and dependence assessment core",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Summarize smoke-free streaks from a daily log CSV export
    Streak(StreakArgs),
    /// Interpret a Fagerström score and print the therapy plan
    Assess(AssessArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Streak(args) => run_streak_report(args),
        Command::Assess(args) => run_assessment(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yenquit::assessment::Modality;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["yenquit"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_assess_flags() {
        let cli = Cli::try_parse_from([
            "yenquit",
            "assess",
            "--score",
            "7",
            "--modality",
            "Smokeless",
            "--cardiac",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Assess(args)) => {
                assert_eq!(args.score, 7);
                assert_eq!(args.modality, Modality::Smokeless);
                assert!(args.cardiac);
                assert!(!args.pregnant);
            }
            other => panic!("expected assess command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_modality() {
        let err = Cli::try_parse_from(["yenquit", "assess", "--score", "3", "--modality", "vape"])
            .expect_err("modality is validated");
        assert!(err.to_string().contains("vape"));
    }

    #[test]
    fn parses_streak_month() {
        let cli = Cli::try_parse_from([
            "yenquit",
            "streak",
            "--logs",
            "logs.csv",
            "--month",
            "2025-02",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Streak(args)) => assert_eq!(args.month, Some((2025, 2))),
            other => panic!("expected streak command, got {other:?}"),
        }
    }
}
