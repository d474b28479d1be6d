//! GestureSpeak - ASL fingerspelling recognition
//!
//! Per frame: hand landmarks → 67-value feature vector → classifier →
//! stability debouncer → accumulated text.
//!
//! | Module | Role |
//! |---|---|
//! | [`hand_tracker`] | Landmarks and the MediaPipe detector subprocess |
//! | [`features`] | Ratio-normalized coordinates and inter-finger angles |
//! | [`classifier`] | Shape check, model call, index → [`Symbol`] |
//! | [`debounce`] | Hold-to-confirm state machine |
//! | [`text`] | Text buffer with `space` / `delete` handling |
//! | [`session`] | Per-frame driver and the frame loop |
//!
//! The `gui` feature adds the OpenCV camera and the egui window.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod debounce;
pub mod error;
pub mod features;
pub mod frame;
pub mod geometry;
pub mod hand_tracker;
pub mod overlay;
pub mod session;
pub mod symbol;
pub mod text;

#[cfg(feature = "gui")]
pub mod camera;

pub use classifier::{Classifier, ClassifierAdapter, SubprocessClassifier};
pub use config::Config;
pub use debounce::{StabilityDebouncer, StabilityState, HOLD_DURATION};
pub use error::{RecognitionError, Result};
pub use features::{build_features, FeatureVector, FEATURE_LEN};
pub use frame::{Frame, FrameSink, FrameSource};
pub use hand_tracker::{HandDetector, HandLandmarks, HandTracker, Landmark};
pub use session::{run, FrameReport, Recognizer};
pub use symbol::Symbol;
pub use text::TextBuffer;
