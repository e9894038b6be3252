use clap::Parser;

use self::process::ProcessArg;
use crate::util;

mod process;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[clap(flatten)]
    process: ProcessArg,

    /// Log debug diagnostics unless RUST_LOG says otherwise
    #[arg(long, short)]
    verbose: bool,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    util::init_tracing(args.verbose);
    process::run(&args.process)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_args_are_consistent() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = CommandArgs::try_parse_from(["freerange", "survey.tsv"]).unwrap();
        assert!(!args.verbose);
        assert_eq!(args.process.input.to_str(), Some("survey.tsv"));
        assert_eq!(args.process.output_dir.to_str(), Some("."));
        assert_eq!(args.process.jitter_seed, process::DEFAULT_JITTER_SEED);
        assert!(!args.process.no_plots);
    }

    #[test]
    fn test_flags() {
        let args = CommandArgs::try_parse_from([
            "freerange",
            "survey.tsv",
            "--output-dir",
            "out",
            "--jitter-seed",
            "7",
            "--no-plots",
            "-v",
        ])
        .unwrap();
        assert!(args.verbose);
        assert_eq!(args.process.output_dir.to_str(), Some("out"));
        assert_eq!(args.process.jitter_seed, 7);
        assert!(args.process.no_plots);
    }
}
