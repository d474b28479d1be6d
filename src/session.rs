//! Recognition session: per-frame driver and the frame loop
//!
//! A [`Recognizer`] owns everything that lives for one session (classifier
//! adapter, debouncer state, recognized text). [`run`] drives it one frame at
//! a time until the stop flag is raised or a fatal error occurs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::classifier::{Classifier, ClassifierAdapter};
use crate::config::RecognitionConfig;
use crate::debounce::{StabilityDebouncer, StabilityState};
use crate::error::Result;
use crate::features::build_features;
use crate::frame::{FrameSink, FrameSource};
use crate::hand_tracker::{HandDetector, HandLandmarks};
use crate::overlay::{hand_bounding_box, BoundingBox};
use crate::symbol::Symbol;
use crate::text::TextBuffer;

/// What happened on one frame, for the UI
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Symbol classified on this frame, `None` when no usable hand was seen
    pub observed: Option<Symbol>,
    /// Symbol committed to the text on this frame
    pub confirmed: Option<Symbol>,
    /// Hand box in frame pixels, when a hand was detected
    pub bounding_box: Option<BoundingBox>,
    /// Recognized text after this frame
    pub text: String,
}

impl FrameReport {
    /// Label for the observed symbol, "None" when nothing was recognized
    pub fn observed_label(&self) -> String {
        self.observed.map_or_else(|| "None".to_string(), |s| s.to_string())
    }
}

/// Per-session recognition state and the loaded classifier
pub struct Recognizer<C> {
    adapter: ClassifierAdapter<C>,
    debouncer: StabilityDebouncer,
    text: TextBuffer,
    box_offset_px: u32,
}

impl<C: Classifier> Recognizer<C> {
    pub fn new(model: C, config: &RecognitionConfig) -> Self {
        Self {
            adapter: ClassifierAdapter::new(model),
            debouncer: StabilityDebouncer::new(config.hold_duration()),
            text: TextBuffer::new(),
            box_offset_px: config.box_offset_px,
        }
    }

    /// Forget any half-held sign. The text is kept.
    pub fn restart(&mut self) {
        self.debouncer.reset();
    }

    pub fn text(&self) -> &TextBuffer {
        &self.text
    }

    pub fn stability(&self) -> StabilityState {
        self.debouncer.state()
    }

    /// Classify one hand, containing per-frame errors.
    fn observe(&mut self, hand: &HandLandmarks) -> Result<Option<Symbol>> {
        let classified = build_features(&hand.landmarks).and_then(|features| self.adapter.classify(&features));
        match classified {
            Ok(symbol) => Ok(Some(symbol)),
            Err(e) if !e.is_fatal() => {
                log::warn!("Skipping frame: {}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Process one frame's detection result.
    ///
    /// `frame_size` is `(width, height)` in pixels, used for the overlay box.
    /// Only fatal errors are returned.
    pub fn process(
        &mut self,
        hand: Option<&HandLandmarks>,
        frame_size: (u32, u32),
        now: Instant,
    ) -> Result<FrameReport> {
        let (observed, bounding_box) = match hand {
            Some(hand) => {
                let bbox = hand_bounding_box(&hand.landmarks, frame_size.0, frame_size.1, self.box_offset_px);
                (self.observe(hand)?, Some(bbox))
            }
            None => (None, None),
        };

        let confirmed = self.debouncer.observe(observed, now);
        if let Some(symbol) = confirmed {
            self.text.apply(symbol);
            log::info!("{} is detected, text is now {:?}", symbol, self.text.as_str());
        }

        Ok(FrameReport {
            observed,
            confirmed,
            bounding_box,
            text: self.text.as_str().to_string(),
        })
    }
}

/// Run the frame loop until `stop` is set or a fatal error occurs.
///
/// The stop flag is checked once per iteration, so the frame in flight always
/// completes. The debouncer is reset on entry; the text carries over from any
/// previous run of the same recognizer.
pub fn run<S, D, C, K>(
    source: &mut S,
    detector: &mut D,
    recognizer: &mut Recognizer<C>,
    sink: &mut K,
    stop: &AtomicBool,
) -> Result<()>
where
    S: FrameSource,
    D: HandDetector,
    C: Classifier,
    K: FrameSink,
{
    recognizer.restart();
    log::info!("Recognition loop started");

    let mut frames: u64 = 0;
    while !stop.load(Ordering::SeqCst) {
        let frame = source.read()?;
        let hand = detector.detect(&frame)?;
        let report = recognizer.process(hand.as_ref(), (frame.width, frame.height), Instant::now())?;
        sink.publish(frame, &report);
        frames += 1;
    }

    log::info!("Recognition loop stopped after {} frames", frames);
    Ok(())
}
