//! Webcam capture through OpenCV

use opencv::{
    core::Mat,
    prelude::*,
    videoio::{self, VideoCapture, CAP_ANY},
};

use crate::config::CameraConfig;
use crate::error::{RecognitionError, Result};
use crate::frame::{Frame, FrameSource};

fn read_error(e: opencv::Error) -> RecognitionError {
    RecognitionError::FrameRead(e.to_string())
}

/// OpenCV `VideoCapture` yielding BGR frames
pub struct Camera {
    cap: VideoCapture,
    mat: Mat,
}

impl Camera {
    pub fn open(config: &CameraConfig) -> Result<Self> {
        log::info!("Opening camera {}", config.device_index);

        let mut cap = VideoCapture::new(config.device_index, CAP_ANY).map_err(read_error)?;
        if !cap.is_opened().map_err(read_error)? {
            return Err(RecognitionError::FrameRead(format!(
                "camera {} is not opened",
                config.device_index
            )));
        }

        let _ = cap.set(videoio::CAP_PROP_FRAME_WIDTH, config.frame_width as f64);
        let _ = cap.set(videoio::CAP_PROP_FRAME_HEIGHT, config.frame_height as f64);
        let _ = cap.set(videoio::CAP_PROP_FPS, config.fps as f64);

        log::info!("Camera opened successfully");

        Ok(Self { cap, mat: Mat::default() })
    }
}

impl FrameSource for Camera {
    fn read(&mut self) -> Result<Frame> {
        if !self.cap.read(&mut self.mat).map_err(read_error)? || self.mat.empty() {
            return Err(RecognitionError::FrameRead("Failed to capture image.".into()));
        }
        if self.mat.channels() != Frame::CHANNELS as i32 {
            return Err(RecognitionError::FrameRead(format!(
                "expected a 3-channel BGR frame, got {} channels",
                self.mat.channels()
            )));
        }

        let data = self.mat.data_bytes().map_err(read_error)?.to_vec();
        Ok(Frame::new(self.mat.cols() as u32, self.mat.rows() as u32, data))
    }
}

impl Drop for Camera {
    fn drop(&mut self) {
        let _ = self.cap.release();
    }
}
