//! Hand tracking using MediaPipe via Python subprocess
//!
//! MediaPipe's hand landmarker runs in a Python helper (`scripts/hand_detect.py`)
//! that is started once and fed one frame at a time over stdin.
//!
//! # Setup
//!
//! python3 -m venv .venv && .venv/bin/pip install mediapipe numpy scikit-learn

use serde::Deserialize;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdout, Command, Stdio};

use crate::config::DetectorConfig;
use crate::error::{RecognitionError, Result};
use crate::frame::Frame;

/// Number of landmarks in one detected hand
pub const LANDMARK_COUNT: usize = 21;

/// Hand landmark indices (MediaPipe hand landmark model convention)
pub mod landmarks {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_DIP: usize = 7;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_PIP: usize = 14;
    pub const RING_FINGER_DIP: usize = 15;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// A single hand landmark with 3D coordinates (x, y, z)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    /// X coordinate (0.0 to 1.0, normalized to image width)
    pub x: f32,
    /// Y coordinate (0.0 to 1.0, normalized to image height)
    pub y: f32,
    /// Z coordinate (depth, relative to wrist)
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Hand detection result with all 21 landmarks
#[derive(Clone, Debug)]
pub struct HandLandmarks {
    pub landmarks: [Landmark; LANDMARK_COUNT],
    /// Detection score (0.0 to 1.0)
    pub confidence: f32,
    /// Handedness ("Left" or "Right")
    pub handedness: String,
}

impl HandLandmarks {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Self {
            landmarks,
            confidence: 1.0,
            handedness: String::new(),
        }
    }
}

/// Finds at most one hand in a frame
pub trait HandDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Option<HandLandmarks>>;
}

/// JSON structures for parsing Python output
#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
    z: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    handedness: String,
    score: f32,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Deserialize, Debug)]
struct DetectionResult {
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// Parse one response line and pick the first hand above `threshold`.
fn parse_detection(response: &str, threshold: f32) -> Result<Option<HandLandmarks>> {
    let result: DetectionResult = serde_json::from_str(response).map_err(|e| {
        RecognitionError::Detector(format!("unparsable response {:?}: {}", response.trim(), e))
    })?;

    if let Some(error) = result.error {
        log::warn!("Python detector error: {}", error);
        return Ok(None);
    }

    for hand in result.hands {
        if hand.score < threshold {
            continue;
        }
        if hand.landmarks.len() != LANDMARK_COUNT {
            log::warn!("Expected {} landmarks, got {}", LANDMARK_COUNT, hand.landmarks.len());
            continue;
        }

        let mut points = [Landmark::default(); LANDMARK_COUNT];
        for (slot, lm) in points.iter_mut().zip(&hand.landmarks) {
            *slot = Landmark::new(lm.x, lm.y, lm.z);
        }

        log::debug!(
            "Hand detected: {} (confidence={:.2}), wrist=({:.3},{:.3})",
            hand.handedness,
            hand.score,
            points[landmarks::WRIST].x,
            points[landmarks::WRIST].y
        );

        return Ok(Some(HandLandmarks {
            landmarks: points,
            confidence: hand.score,
            handedness: hand.handedness,
        }));
    }

    Ok(None)
}

/// Hand tracker backed by the MediaPipe Python subprocess
pub struct HandTracker {
    process: Child,
    stdout_reader: BufReader<ChildStdout>,
    confidence_threshold: f32,
}

impl HandTracker {
    /// Start the Python subprocess and wait for its `READY` line
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        if !config.script.exists() {
            return Err(RecognitionError::Detector(format!(
                "hand detection script not found at {:?}",
                config.script
            )));
        }
        if !config.python.exists() {
            return Err(RecognitionError::Detector(format!(
                "Python interpreter not found at {:?}. Run: python3 -m venv .venv && .venv/bin/pip install mediapipe numpy",
                config.python
            )));
        }

        log::info!("Starting MediaPipe hand detector subprocess...");

        let mut process = Command::new(&config.python)
            .arg(&config.script)
            .arg(config.min_detection_confidence.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| RecognitionError::Detector(format!("failed to start subprocess: {}", e)))?;

        let stdout = process
            .stdout
            .take()
            .ok_or_else(|| RecognitionError::Detector("subprocess has no stdout".into()))?;
        let mut stdout_reader = BufReader::new(stdout);

        let mut ready_line = String::new();
        stdout_reader.read_line(&mut ready_line)?;
        if ready_line.trim() != "READY" {
            let _ = process.kill();
            return Err(RecognitionError::Detector(format!(
                "subprocess did not signal ready, got: {:?}",
                ready_line.trim()
            )));
        }

        log::info!("MediaPipe hand detector ready");

        Ok(Self {
            process,
            stdout_reader,
            confidence_threshold: config.min_detection_confidence.clamp(0.0, 1.0),
        })
    }
}

impl HandDetector for HandTracker {
    fn detect(&mut self, frame: &Frame) -> Result<Option<HandLandmarks>> {
        if frame.data.is_empty() {
            return Ok(None);
        }
        if frame.data.len() != frame.expected_len() {
            return Err(RecognitionError::Detector(format!(
                "frame buffer has {} bytes, expected {}",
                frame.data.len(),
                frame.expected_len()
            )));
        }

        let stdin = self
            .process
            .stdin
            .as_mut()
            .ok_or_else(|| RecognitionError::Detector("subprocess has no stdin".into()))?;

        // Header (width, height, channels) followed by raw BGR data
        stdin.write_all(&frame.width.to_le_bytes())?;
        stdin.write_all(&frame.height.to_le_bytes())?;
        stdin.write_all(&Frame::CHANNELS.to_le_bytes())?;
        stdin.write_all(&frame.data)?;
        stdin.flush()?;

        let mut response = String::new();
        if self.stdout_reader.read_line(&mut response)? == 0 {
            return Err(RecognitionError::Detector("subprocess closed its output".into()));
        }

        parse_detection(&response, self.confidence_threshold)
    }
}

impl Drop for HandTracker {
    fn drop(&mut self) {
        let _ = self.process.kill();
    }
}
