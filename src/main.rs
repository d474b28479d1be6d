use anyhow::Result;
use clap::Parser;
use eframe::egui;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use gesture_speak::camera::Camera;
use gesture_speak::cli::Args;
use gesture_speak::config::CameraConfig;
use gesture_speak::{
    run, Frame, FrameReport, FrameSink, HandTracker, RecognitionError, Recognizer, SubprocessClassifier,
};

/// How long the "X is detected" banner stays on screen
const BANNER_DURATION: Duration = Duration::from_millis(1500);

/// Latest frame and recognition output, written by the recognition thread
#[derive(Default)]
struct SharedState {
    /// Current camera frame (RGB format)
    frame: Option<Vec<u8>>,
    frame_width: u32,
    frame_height: u32,
    /// What was recognized on that frame
    report: FrameReport,
    /// Last committed symbol and when it was committed
    last_confirmed: Option<(String, Instant)>,
}

/// Publishes each processed frame into the shared state for the UI
struct SharedSink {
    state: Arc<Mutex<SharedState>>,
}

impl FrameSink for SharedSink {
    fn publish(&mut self, frame: Frame, report: &FrameReport) {
        let rgb = frame.to_rgb();
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.frame = Some(rgb);
        state.frame_width = frame.width;
        state.frame_height = frame.height;
        if let Some(symbol) = report.confirmed {
            state.last_confirmed = Some((symbol.to_string(), Instant::now()));
        }
        state.report = report.clone();
    }
}

/// Everything the recognition loop owns; handed back to the UI when it stops
struct Worker {
    detector: HandTracker,
    recognizer: Recognizer<SubprocessClassifier>,
}

type WorkerHandle = JoinHandle<(Worker, Result<(), RecognitionError>)>;

/// Run one webcam session on the current thread
fn recognition_thread(
    mut worker: Worker,
    camera_config: CameraConfig,
    state: Arc<Mutex<SharedState>>,
    stop: Arc<AtomicBool>,
) -> (Worker, Result<(), RecognitionError>) {
    let mut sink = SharedSink { state };
    let result = Camera::open(&camera_config).and_then(|mut camera| {
        run(&mut camera, &mut worker.detector, &mut worker.recognizer, &mut sink, &stop)
    });
    if let Err(e) = &result {
        log::error!("Recognition session ended: {}", e);
    }
    (worker, result)
}

/// Main application struct for egui
struct GestureSpeakApp {
    camera_config: CameraConfig,
    state: Arc<Mutex<SharedState>>,
    stop: Arc<AtomicBool>,
    /// Present while the webcam is stopped
    idle: Option<Worker>,
    /// Present while the webcam is running
    running: Option<WorkerHandle>,
    texture: Option<egui::TextureHandle>,
    /// Text at the time the last session stopped
    final_text: String,
    /// Fatal error from the last session
    error: Option<String>,
}

impl GestureSpeakApp {
    fn new(worker: Worker, camera_config: CameraConfig) -> Self {
        Self {
            camera_config,
            state: Arc::new(Mutex::new(SharedState::default())),
            stop: Arc::new(AtomicBool::new(false)),
            idle: Some(worker),
            running: None,
            texture: None,
            final_text: String::new(),
            error: None,
        }
    }

    fn start(&mut self) {
        let Some(worker) = self.idle.take() else {
            return;
        };
        self.error = None;
        self.stop.store(false, Ordering::SeqCst);

        let camera_config = self.camera_config.clone();
        let state = self.state.clone();
        let stop = self.stop.clone();
        self.running = Some(thread::spawn(move || recognition_thread(worker, camera_config, state, stop)));
    }

    fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Take the worker back once the recognition thread has exited
    fn collect_finished(&mut self) {
        if !self.running.as_ref().is_some_and(|h| h.is_finished()) {
            return;
        }
        let Some(handle) = self.running.take() else {
            return;
        };
        match handle.join() {
            Ok((worker, result)) => {
                self.final_text = worker.recognizer.text().to_string();
                if let Err(e) = result {
                    self.error = Some(e.to_string());
                }
                self.idle = Some(worker);
            }
            Err(_) => {
                log::error!("Recognition thread panicked");
                self.error = Some("Recognition thread panicked; restart the application.".to_string());
            }
        }
    }

    fn show_camera_feed(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let (frame_data, width, height, report, banner) = {
            let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let banner = state
                .last_confirmed
                .as_ref()
                .filter(|(_, at)| at.elapsed() < BANNER_DURATION)
                .map(|(label, _)| label.clone());
            (
                state.frame.clone(),
                state.frame_width as usize,
                state.frame_height as usize,
                state.report.clone(),
                banner,
            )
        };

        let Some(data) = frame_data else {
            ui.label("Waiting for camera feed...");
            return;
        };
        let expected_size = width * height * 3;
        if width == 0 || height == 0 || data.len() < expected_size {
            ui.label("Frame data size mismatch...");
            return;
        }

        let image = egui::ColorImage::from_rgb([width, height], &data[..expected_size]);
        let texture = self
            .texture
            .get_or_insert_with(|| ctx.load_texture("camera_frame", image.clone(), egui::TextureOptions::LINEAR));
        texture.set(image, egui::TextureOptions::LINEAR);

        // Fit the frame into the available width, keeping the aspect ratio
        let available = ui.available_size();
        let aspect = width as f32 / height as f32;
        let display_size = egui::vec2(available.x, available.x / aspect);
        let (rect, _response) = ui.allocate_exact_size(display_size, egui::Sense::hover());

        let painter = ui.painter();
        painter.image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        let scale = display_size.x / width as f32;
        let to_screen = |x: i32, y: i32| egui::pos2(rect.min.x + x as f32 * scale, rect.min.y + y as f32 * scale);
        let label_font = egui::FontId::proportional(28.0 * scale.max(0.5));
        let green = egui::Color32::from_rgb(0, 255, 0);

        if let Some(bbox) = report.bounding_box {
            painter.rect_stroke(
                egui::Rect::from_min_max(to_screen(bbox.x_min, bbox.y_min), to_screen(bbox.x_max, bbox.y_max)),
                0.0,
                egui::Stroke::new(2.0, egui::Color32::BLACK),
            );
            painter.text(
                to_screen(bbox.x_min, bbox.y_min - 10),
                egui::Align2::LEFT_BOTTOM,
                report.observed_label(),
                label_font.clone(),
                green,
            );
        }

        if let Some(label) = banner {
            painter.text(
                to_screen(300, 150),
                egui::Align2::LEFT_BOTTOM,
                format!("{} is detected", label),
                label_font,
                green,
            );
        }
    }
}

impl eframe::App for GestureSpeakApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Request continuous repaint for real-time updates
        ctx.request_repaint();
        self.collect_finished();

        let is_running = self.running.is_some();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("GestureSpeak: ASL Hand Gesture Recognition");
            ui.label("Show an ASL hand sign to recognize it. Press Stop Webcam to quit.");

            ui.horizontal(|ui| {
                if ui.add_enabled(self.idle.is_some(), egui::Button::new("Start Webcam")).clicked() {
                    self.start();
                }
                if ui.add_enabled(is_running, egui::Button::new("Stop Webcam")).clicked() {
                    self.stop();
                }
            });

            if let Some(error) = &self.error {
                ui.colored_label(egui::Color32::RED, error);
            }
            ui.separator();

            if is_running {
                let report = self.state.lock().unwrap_or_else(PoisonError::into_inner).report.clone();
                ui.strong(format!("Predicted Character: {}", report.observed_label()));
                ui.strong(format!("Recognized Text: {}", report.text));
                ui.separator();
                self.show_camera_feed(ui, ctx);
            } else {
                ui.strong(format!("Final Recognized Text: {}", self.final_text));
            }
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Signal the recognition thread to stop and wait for the frame in flight
        self.stop();
        if let Some(handle) = self.running.take() {
            let _ = handle.join();
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    log::info!("Starting GestureSpeak");
    let config = args.resolve_config()?;

    // The model and detector load once; failing here aborts before any frame is read
    let classifier = SubprocessClassifier::load(&config.classifier).map_err(|e| {
        log::error!("{}", e);
        e
    })?;
    let detector = HandTracker::new(&config.detector).map_err(|e| {
        log::error!("{}", e);
        e
    })?;
    let worker = Worker {
        detector,
        recognizer: Recognizer::new(classifier, &config.recognition),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 860.0])
            .with_title("GestureSpeak"),
        ..Default::default()
    };

    eframe::run_native(
        "GestureSpeak",
        options,
        Box::new(move |_cc| Ok(Box::new(GestureSpeakApp::new(worker, config.camera)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}
