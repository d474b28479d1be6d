//! Configuration Management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{RecognitionError, Result};

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "gesturespeak.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub recognition: RecognitionConfig,
}

/// Webcam settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CameraConfig {
    /// Capture device index
    pub device_index: i32,
    pub frame_width: u32,
    pub frame_height: u32,
    pub fps: u32,
}

/// MediaPipe hand detector subprocess
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectorConfig {
    /// Python interpreter with mediapipe installed
    pub python: PathBuf,
    /// Detector helper script
    pub script: PathBuf,
    /// Minimum hand detection score (0.0 to 1.0)
    pub min_detection_confidence: f32,
}

/// Pickled classifier subprocess
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifierConfig {
    pub python: PathBuf,
    pub script: PathBuf,
    /// Pickle holding `{'model': estimator}`
    pub model_path: PathBuf,
}

/// Debouncing and overlay settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecognitionConfig {
    /// How long a sign must be held before it is committed (ms)
    pub hold_duration_ms: u64,
    /// Padding around the hand bounding box (pixels)
    pub box_offset_px: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device_index: 0,
            frame_width: 640,
            frame_height: 480,
            fps: 30,
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            python: PathBuf::from(".venv/bin/python"),
            script: PathBuf::from("scripts/hand_detect.py"),
            min_detection_confidence: 0.6,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            python: PathBuf::from(".venv/bin/python"),
            script: PathBuf::from("scripts/classify.py"),
            model_path: PathBuf::from("models/model_main.p"),
        }
    }
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            hold_duration_ms: 2000,
            box_offset_px: 20,
        }
    }
}

impl RecognitionConfig {
    pub fn hold_duration(&self) -> Duration {
        Duration::from_millis(self.hold_duration_ms)
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.camera.device_index < 0 {
            return Err(RecognitionError::Config(format!(
                "device_index must be >= 0, got {}",
                self.camera.device_index
            )));
        }
        if self.camera.frame_width == 0 || self.camera.frame_height == 0 {
            return Err(RecognitionError::Config(format!(
                "frame size must be non-zero, got {}x{}",
                self.camera.frame_width, self.camera.frame_height
            )));
        }
        if !(0.0..=1.0).contains(&self.detector.min_detection_confidence) {
            return Err(RecognitionError::Config(format!(
                "min_detection_confidence must be in [0, 1], got {}",
                self.detector.min_detection_confidence
            )));
        }
        if self.classifier.model_path.as_os_str().is_empty() {
            return Err(RecognitionError::Config("model_path must not be empty".to_string()));
        }
        if self.recognition.hold_duration_ms == 0 {
            return Err(RecognitionError::Config("hold_duration_ms must be > 0".to_string()));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| RecognitionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from `path` if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| RecognitionError::Config(e.to_string()))
    }
}
