//! Captured video frames and the source/sink seams of the frame loop

use crate::error::Result;
use crate::session::FrameReport;

/// One captured video frame, packed BGR bytes in row-major order
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// `width * height * 3` bytes, blue-green-red per pixel
    pub data: Vec<u8>,
}

impl Frame {
    pub const CHANNELS: u32 = 3;

    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self { width, height, data }
    }

    /// Size of a complete BGR buffer for this frame's dimensions
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * Self::CHANNELS as usize
    }

    /// Copy the frame into RGB order for display
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(3) {
            rgb.extend_from_slice(&[px[2], px[1], px[0]]);
        }
        rgb
    }
}

/// Anything that yields frames, e.g. a webcam
pub trait FrameSource {
    /// Read the next frame. A failed read is fatal for the session.
    fn read(&mut self) -> Result<Frame>;
}

/// Receives each processed frame together with what was recognized on it
pub trait FrameSink {
    fn publish(&mut self, frame: Frame, report: &FrameReport);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rgb_swaps_channels() {
        let frame = Frame::new(2, 1, vec![1, 2, 3, 10, 20, 30]);
        assert_eq!(frame.to_rgb(), vec![3, 2, 1, 30, 20, 10]);
    }

    #[test]
    fn test_expected_len() {
        let frame = Frame::new(640, 480, Vec::new());
        assert_eq!(frame.expected_len(), 640 * 480 * 3);
    }
}
