use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line options for the greeting card.
#[derive(Parser, Debug, Clone)]
#[command(version, about = "Open a 3D greeting card envelope in your terminal")]
pub struct Args {
    /// Target frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Number of drifting hearts in the background
    #[arg(long, default_value_t = 350)]
    pub particles: usize,

    /// Seed for particle placement and confetti (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Card content file: title line, blank-line separated sections, `[ Label ]` buttons
    #[arg(short, long)]
    pub message: Option<PathBuf>,

    /// Directory for the rotating log file
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Show the debug overlay on start
    #[arg(short, long)]
    pub debug: bool,
}

impl Args {
    /// Time allotted to one frame at the configured rate.
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("envelope3d-logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_card() {
        let args = Args::parse_from(["envelope3d"]);
        assert_eq!(args.fps, 60);
        assert_eq!(args.particles, 350);
        assert!(args.seed.is_none());
        assert!(!args.debug);
        assert_eq!(args.log_level, "info");
        assert!(args.log_dir().ends_with("envelope3d-logs"));
    }

    #[test]
    fn frame_budget_follows_fps() {
        let args = Args::parse_from(["envelope3d", "--fps", "50"]);
        assert_eq!(args.frame_budget(), Duration::from_millis(20));
    }

    #[test]
    fn fps_out_of_range_is_rejected() {
        assert!(Args::try_parse_from(["envelope3d", "--fps", "0"]).is_err());
        assert!(Args::try_parse_from(["envelope3d", "--fps", "1000"]).is_err());
    }
}
