//! Classifier adapter and the pickled-model subprocess
//!
//! The trained model is a scikit-learn estimator pickled as
//! `{'model': estimator}`. It runs inside a Python helper
//! (`scripts/classify.py`) loaded once at startup; the adapter only sees the
//! [`Classifier`] trait.

use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdout, Command, Stdio};

use crate::config::ClassifierConfig;
use crate::error::{RecognitionError, Result};
use crate::features::{FeatureVector, FEATURE_LEN};
use crate::symbol::Symbol;

/// A loaded model mapping a feature vector to a label index
pub trait Classifier {
    fn predict(&mut self, features: &[f64]) -> Result<usize>;
}

/// Checks the feature shape, runs the model and maps its output to a symbol
pub struct ClassifierAdapter<C> {
    model: C,
}

impl<C: Classifier> ClassifierAdapter<C> {
    /// Wrap an already-loaded model
    pub fn new(model: C) -> Self {
        Self { model }
    }

    pub fn classify(&mut self, features: &FeatureVector) -> Result<Symbol> {
        if features.len() != FEATURE_LEN {
            return Err(RecognitionError::FeatureShape {
                expected: FEATURE_LEN,
                actual: features.len(),
            });
        }

        let index = self.model.predict(features.as_slice())?;
        Symbol::from_index(index).ok_or_else(|| {
            RecognitionError::ClassifierFailure(format!("label index {} is outside the label table", index))
        })
    }

    pub fn model(&self) -> &C {
        &self.model
    }
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    features: &'a [f64],
}

#[derive(Deserialize, Debug)]
struct PredictResponse {
    #[serde(default)]
    index: Option<usize>,
    #[serde(default)]
    error: Option<String>,
}

fn parse_prediction(response: &str) -> Result<usize> {
    let parsed: PredictResponse = serde_json::from_str(response).map_err(|e| {
        RecognitionError::ClassifierFailure(format!("unparsable response {:?}: {}", response.trim(), e))
    })?;
    match (parsed.index, parsed.error) {
        (_, Some(error)) => Err(RecognitionError::ClassifierFailure(error)),
        (Some(index), None) => Ok(index),
        (None, None) => Err(RecognitionError::ClassifierFailure("response carried no index".into())),
    }
}

/// Pickled model served by a Python subprocess
pub struct SubprocessClassifier {
    process: Child,
    stdout_reader: BufReader<ChildStdout>,
}

impl SubprocessClassifier {
    /// Start the helper and wait until it has unpickled the model.
    ///
    /// Any failure here is a [`RecognitionError::ModelLoad`].
    pub fn load(config: &ClassifierConfig) -> Result<Self> {
        let load_error = |reason: String| RecognitionError::ModelLoad {
            path: config.model_path.clone(),
            reason,
        };

        if !config.model_path.exists() {
            return Err(load_error("model file does not exist".into()));
        }
        if !config.script.exists() {
            return Err(load_error(format!("classifier script not found at {:?}", config.script)));
        }

        log::info!("Loading classifier model from {:?}", config.model_path);

        let mut process = Command::new(&config.python)
            .arg(&config.script)
            .arg(&config.model_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| load_error(format!("failed to start {:?}: {}", config.python, e)))?;

        let stdout = process
            .stdout
            .take()
            .ok_or_else(|| load_error("subprocess has no stdout".into()))?;
        let mut stdout_reader = BufReader::new(stdout);

        let mut ready_line = String::new();
        stdout_reader
            .read_line(&mut ready_line)
            .map_err(|e| load_error(e.to_string()))?;
        if ready_line.trim() != "READY" {
            let _ = process.kill();
            return Err(load_error(format!(
                "subprocess did not signal ready, got: {:?}",
                ready_line.trim()
            )));
        }

        log::info!("Classifier model ready");

        Ok(Self { process, stdout_reader })
    }
}

impl Classifier for SubprocessClassifier {
    fn predict(&mut self, features: &[f64]) -> Result<usize> {
        let failure = |e: std::io::Error| RecognitionError::ClassifierFailure(e.to_string());

        let stdin = self
            .process
            .stdin
            .as_mut()
            .ok_or_else(|| RecognitionError::ClassifierFailure("subprocess has no stdin".into()))?;
        let request = serde_json::to_string(&PredictRequest { features })
            .map_err(|e| RecognitionError::ClassifierFailure(e.to_string()))?;
        writeln!(stdin, "{}", request).map_err(failure)?;
        stdin.flush().map_err(failure)?;

        let mut response = String::new();
        if self.stdout_reader.read_line(&mut response).map_err(failure)? == 0 {
            return Err(RecognitionError::ClassifierFailure("subprocess closed its output".into()));
        }
        parse_prediction(&response)
    }
}

impl Drop for SubprocessClassifier {
    fn drop(&mut self) {
        let _ = self.process.kill();
    }
}
