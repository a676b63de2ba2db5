use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// Log levels selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in demo scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneName {
    /// Field of random small spheres around three large ones
    Cover,
    /// Three spheres on a ground plane, including a hollow glass shell
    Spheres,
    /// Two large checkered spheres
    Checker,
}

#[derive(Debug, Parser)]
#[command(name = "umbra")]
#[command(about = "Offline CPU path tracer", version)]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "cover")]
    pub scene: SceneName,

    /// JSON file with `camera` and `render` sections
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels (height follows the aspect ratio)
    #[arg(long)]
    pub width: Option<u32>,

    /// Samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum bounce depth
    #[arg(long, short = 'd')]
    pub depth: Option<u32>,

    /// Seed for scene generation and per-pixel sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads (defaults to one per core)
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,

    /// Output path; `.ppm` or `.png`
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["umbra"]).unwrap();

        assert_eq!(args.scene, SceneName::Cover);
        assert_eq!(args.output, PathBuf::from("image.ppm"));
        assert_eq!(args.log_level, LogLevel::Info);
        assert!(args.config.is_none());
        assert!(args.samples.is_none());
        assert!(args.threads.is_none());
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "umbra",
            "--scene",
            "checker",
            "--config",
            "render.json",
            "--width",
            "320",
            "-s",
            "16",
            "--depth",
            "8",
            "--seed",
            "99",
            "-j",
            "4",
            "-o",
            "out.png",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.scene, SceneName::Checker);
        assert_eq!(args.config, Some(PathBuf::from("render.json")));
        assert_eq!(args.width, Some(320));
        assert_eq!(args.samples, Some(16));
        assert_eq!(args.depth, Some(8));
        assert_eq!(args.seed, Some(99));
        assert_eq!(args.threads, Some(4));
        assert_eq!(args.output, PathBuf::from("out.png"));
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }

    #[test]
    fn test_unknown_scene_rejected() {
        assert!(Args::try_parse_from(["umbra", "--scene", "teapot"]).is_err());
    }

    #[test]
    fn test_non_numeric_width_rejected() {
        assert!(Args::try_parse_from(["umbra", "--width", "wide"]).is_err());
    }
}
