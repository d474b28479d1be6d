//! Hand bounding box for the on-screen overlay

use crate::hand_tracker::Landmark;

/// Pixel-space box around the hand, already padded and clamped to the frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl BoundingBox {
    pub fn width(&self) -> i32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> i32 {
        self.y_max - self.y_min
    }
}

/// Box enclosing all landmarks in a `width`×`height` frame, grown by `offset`
/// pixels on each side and clamped to the frame.
pub fn hand_bounding_box(landmarks: &[Landmark], width: u32, height: u32, offset: u32) -> BoundingBox {
    let (w, h, offset) = (width as i32, height as i32, offset as i32);
    let (mut x_min, mut y_min, mut x_max, mut y_max) = (w, h, 0, 0);

    for lm in landmarks {
        let x = (lm.x * w as f32) as i32;
        let y = (lm.y * h as f32) as i32;
        x_min = x_min.min(x);
        y_min = y_min.min(y);
        x_max = x_max.max(x);
        y_max = y_max.max(y);
    }

    BoundingBox {
        x_min: (x_min - offset).max(0),
        y_min: (y_min - offset).max(0),
        x_max: (x_max + offset).min(w),
        y_max: (y_max + offset).min(h),
    }
}
