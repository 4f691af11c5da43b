use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "Curtain",
    version = curtain_core::version(),
    about = "Curtain - drives a blocking overlay through a simulated long-running operation",
)]
pub struct Args {
    /// Message shown while the operation runs
    #[arg(short = 'm', long = "message", default_value = "Working")]
    pub message: String,

    /// Number of progress updates to report
    #[arg(short = 's', long = "steps", default_value_t = 5)]
    pub steps: u32,

    /// Delay between progress updates in milliseconds
    #[arg(long = "step-ms", default_value_t = 400)]
    pub step_ms: u64,

    /// Specify custom configuration file path
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Specify custom configuration file path"
    )]
    pub config_path: Option<PathBuf>,

    /// Use default configuration and ignore config files
    #[arg(
        long = "defaults",
        help = "Use default configuration and ignore config files"
    )]
    pub use_defaults: bool,

    /// Show a second overlay halfway through to exercise replacement
    #[arg(long = "replace")]
    pub replace: bool,

    /// Only log info and above
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log everything, including trace output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

pub fn parse_args() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["curtain"]).unwrap();
        assert_eq!(args.message, "Working");
        assert_eq!(args.steps, 5);
        assert_eq!(args.step_ms, 400);
        assert!(!args.replace);
        assert!(args.config_path.is_none());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["curtain", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "curtain",
            "--message",
            "Importing",
            "--steps",
            "3",
            "--step-ms",
            "50",
            "--config",
            "custom.yaml",
            "--replace",
        ])
        .unwrap();
        assert_eq!(args.message, "Importing");
        assert_eq!(args.steps, 3);
        assert_eq!(args.step_ms, 50);
        assert_eq!(args.config_path, Some(PathBuf::from("custom.yaml")));
        assert!(args.replace);
    }
}
