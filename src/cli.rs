//! Command-Line Interface

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::Result;

/// GestureSpeak - recognize ASL fingerspelling from a webcam
#[derive(Parser, Debug)]
#[command(name = "gesture_speak")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Camera device index (overrides config)
    #[arg(long)]
    pub camera: Option<i32>,

    /// Pickled model path (overrides config)
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Hold duration before a sign is committed, in ms (overrides config)
    #[arg(long)]
    pub hold_ms: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Apply command-line overrides on top of a loaded config
    pub fn apply(&self, mut config: Config) -> Result<Config> {
        if let Some(camera) = self.camera {
            config.camera.device_index = camera;
        }
        if let Some(model) = &self.model {
            config.classifier.model_path = model.clone();
        }
        if let Some(hold_ms) = self.hold_ms {
            config.recognition.hold_duration_ms = hold_ms;
        }
        config.validate()?;
        Ok(config)
    }

    /// Load the config file (or defaults) and apply overrides
    pub fn resolve_config(&self) -> Result<Config> {
        self.apply(Config::load_or_default(&self.config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecognitionError;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["gesture_speak"]).unwrap();
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_FILE));
        assert!(args.camera.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_overrides_apply() {
        let args = Args::try_parse_from([
            "gesture_speak",
            "--camera",
            "3",
            "--model",
            "models/other.p",
            "--hold-ms",
            "1200",
        ])
        .unwrap();
        let config = args.apply(Config::default()).unwrap();
        assert_eq!(config.camera.device_index, 3);
        assert_eq!(config.classifier.model_path, PathBuf::from("models/other.p"));
        assert_eq!(config.recognition.hold_duration_ms, 1200);
    }

    #[test]
    fn test_overrides_are_validated() {
        let args = Args::try_parse_from(["gesture_speak", "--hold-ms", "0"]).unwrap();
        assert!(matches!(args.apply(Config::default()), Err(RecognitionError::Config(_))));
    }
}
