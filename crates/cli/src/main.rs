#![deny(unsafe_code)]
//! CLI binary for the depthfield demo.
//!
//! Subcommands:
//! - `run` opens a window and renders until Escape or close
//! - `inspect` prints the frame plan and mesh sizes without touching GL

mod app;
mod error;
mod inspect;
mod logging;
mod window;

use clap::{Args, Parser, Subcommand};
use depthfield_core::{Config, SceneKind};
use error::CliError;
use logging::{init_logging, LoggingConfig};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "depthfield", about = "Real-time depth-of-field scene demo")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log filter (e.g. "debug", "depthfield_core=trace"). Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open a window and render the scene.
    Run(ConfigArgs),
    /// Print the frame plan and mesh sizes for a configuration.
    Inspect(ConfigArgs),
}

/// Run configuration: a JSON file plus per-field overrides.
#[derive(Args, Debug, Default)]
struct ConfigArgs {
    /// JSON config file. Missing keys keep their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scene to render (pool, gallery).
    #[arg(short, long)]
    scene: Option<String>,

    /// Window width in pixels.
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Window height in pixels.
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Number of blur iterations.
    #[arg(long)]
    blur_passes: Option<u32>,

    /// Directory holding shaders/ and textures/.
    #[arg(long)]
    assets: Option<PathBuf>,
}

impl ConfigArgs {
    /// Loads the config file (or defaults), applies overrides and validates.
    fn resolve(self) -> Result<Config, CliError> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(scene) = self.scene {
            config.scene = scene.parse::<SceneKind>()?;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(blur_passes) = self.blur_passes {
            config.blur_passes = blur_passes;
        }
        if let Some(assets) = self.assets {
            config.asset_dir = assets;
        }
        config.validate()?;
        Ok(config)
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Run(args) => {
            let config = args.resolve()?;
            app::run(&config)
        }
        Command::Inspect(args) => {
            let config = args.resolve()?;
            let report = inspect::Report::build(&config)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report.to_json())?);
            } else {
                print!("{report}");
            }
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(LoggingConfig {
        env_filter: cli.log_level.clone(),
    });
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_args(argv: &[&str]) -> ConfigArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Command::Run(args) | Command::Inspect(args) => args,
        }
    }

    #[test]
    fn no_flags_resolve_to_defaults() {
        let config = config_args(&["depthfield", "run"]).resolve().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn flags_override_defaults() {
        let config = config_args(&[
            "depthfield",
            "inspect",
            "--scene",
            "gallery",
            "-W",
            "640",
            "-H",
            "480",
            "--blur-passes",
            "3",
            "--assets",
            "/tmp/assets",
        ])
        .resolve()
        .unwrap();
        assert_eq!(config.scene, SceneKind::Gallery);
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.blur_passes, 3);
        assert_eq!(config.asset_dir, PathBuf::from("/tmp/assets"));
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("depthfield.json");
        std::fs::write(&path, r#"{"scene": "gallery", "blur_passes": 4}"#).unwrap();

        let path_arg = path.to_str().unwrap();
        let config = config_args(&["depthfield", "run", "-c", path_arg, "--blur-passes", "6"])
            .resolve()
            .unwrap();
        assert_eq!(config.scene, SceneKind::Gallery);
        assert_eq!(config.blur_passes, 6);
    }

    #[test]
    fn unknown_scene_is_input_error() {
        let err = config_args(&["depthfield", "run", "--scene", "lagoon"])
            .resolve()
            .unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn invalid_override_is_rejected_by_validation() {
        let err = config_args(&["depthfield", "run", "-W", "0"])
            .resolve()
            .unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn missing_config_file_is_input_error() {
        let err = config_args(&["depthfield", "run", "-c", "/nonexistent/depthfield.json"])
            .resolve()
            .unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli =
            Cli::try_parse_from(["depthfield", "inspect", "--json", "--log-level", "debug"])
                .unwrap();
        assert!(cli.json);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["depthfield"]).is_err());
    }
}
