use std::path::PathBuf;

use clap::Parser;

use crate::{animator::Speed, solvers::Algorithm};

/// Default lattice height, in rooms.
pub const DEFAULT_ROWS: u16 = 15;
/// Default lattice width, in rooms.
pub const DEFAULT_COLS: u16 = 25;

/// Generate a perfect maze and watch a search solve it.
///
/// Dimensions outside [5, 50] are clamped rather than rejected.
#[derive(Debug, Clone, Parser)]
#[command(name = "mazetrace", version, about)]
pub struct Config {
    /// Maze height in rooms
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: u16,

    /// Maze width in rooms
    #[arg(long, default_value_t = DEFAULT_COLS)]
    pub cols: u16,

    /// Playback speed
    #[arg(long, value_enum, default_value_t = Speed::Normal)]
    pub speed: Speed,

    /// Search used for the first solve (and the only one in headless mode)
    #[arg(long, value_enum, default_value_t = Algorithm::Bfs)]
    pub algorithm: Algorithm,

    /// Seed for maze generation, random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// File that receives log output
    #[arg(long, default_value = "mazetrace.log")]
    pub log_file: PathBuf,

    /// Maximum log level written to the log file
    #[arg(long, default_value_t = tracing::Level::INFO)]
    pub log_level: tracing::Level,

    /// Generate, solve and play back without a terminal UI, then print the result
    #[arg(long)]
    pub headless: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            speed: Speed::Normal,
            algorithm: Algorithm::Bfs,
            seed: None,
            log_file: PathBuf::from("mazetrace.log"),
            log_level: tracing::Level::INFO,
            headless: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_parser() {
        let parsed = Config::parse_from(["mazetrace"]);
        let default = Config::default();
        assert_eq!(parsed.rows, default.rows);
        assert_eq!(parsed.cols, default.cols);
        assert_eq!(parsed.speed, default.speed);
        assert_eq!(parsed.algorithm, default.algorithm);
        assert_eq!(parsed.log_file, default.log_file);
        assert_eq!(parsed.log_level, default.log_level);
        assert!(!parsed.headless);
    }

    #[test]
    fn test_parse_flags() {
        let config = Config::parse_from([
            "mazetrace",
            "--rows",
            "80",
            "--cols",
            "7",
            "--speed",
            "fast",
            "--algorithm",
            "dfs",
            "--seed",
            "42",
            "--log-level",
            "debug",
            "--headless",
        ]);
        // Out of range values are accepted here and clamped by the generator
        assert_eq!(config.rows, 80);
        assert_eq!(config.cols, 7);
        assert_eq!(config.speed, Speed::Fast);
        assert_eq!(config.algorithm, Algorithm::Dfs);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_level, tracing::Level::DEBUG);
        assert!(config.headless);
    }

    #[test]
    fn test_rejects_unknown_speed() {
        assert!(Config::try_parse_from(["mazetrace", "--speed", "warp"]).is_err());
    }
}
