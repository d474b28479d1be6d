//! Feature extraction for sign classification
//!
//! Turns one hand's 21 landmarks into the 67 values the classifier was trained
//! on:
//! - 0..63: for each landmark in index order, `x / min_x`, `y / min_y`, `z / min_z`
//! - 63..67: the four inter-finger spread angles in degrees
//!
//! Coordinates are divided by the per-axis minimum across the hand, not
//! translated to the wrist. A zero minimum is rejected instead of producing
//! infinities.

use nalgebra::Vector3;

use crate::error::{Axis, Degeneracy, Result};
use crate::geometry::{angle_between, min_of};
use crate::hand_tracker::landmarks::*;
use crate::hand_tracker::{Landmark, LANDMARK_COUNT};

/// Number of normalized coordinates (21 landmarks × 3 axes)
pub const COORDINATE_COUNT: usize = LANDMARK_COUNT * 3;

/// Number of joint angles appended after the coordinates
pub const ANGLE_COUNT: usize = JOINT_GROUPS.len();

/// Length of a complete feature vector
pub const FEATURE_LEN: usize = COORDINATE_COUNT + ANGLE_COUNT;

/// Joint groups `(a, b, c, d)`: the angle between `L[a] - L[b]` and `L[c] - L[d]`
/// (thumb–index, index–middle, middle–ring, ring–pinky)
pub const JOINT_GROUPS: [(usize, usize, usize, usize); 4] = [
    (THUMB_TIP, THUMB_CMC, INDEX_FINGER_TIP, INDEX_FINGER_MCP),
    (INDEX_FINGER_TIP, INDEX_FINGER_MCP, MIDDLE_FINGER_TIP, MIDDLE_FINGER_MCP),
    (MIDDLE_FINGER_TIP, MIDDLE_FINGER_MCP, RING_FINGER_TIP, RING_FINGER_MCP),
    (RING_FINGER_TIP, RING_FINGER_MCP, PINKY_TIP, PINKY_MCP),
];

/// Classifier input. Usually built by [`build_features`]; any other length is
/// rejected by the classifier adapter.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

fn point(lm: &Landmark) -> Vector3<f64> {
    Vector3::new(lm.x as f64, lm.y as f64, lm.z as f64)
}

fn check_finite(landmarks: &[Landmark; LANDMARK_COUNT]) -> Result<()> {
    for (index, lm) in landmarks.iter().enumerate() {
        for (axis, value) in [(Axis::X, lm.x), (Axis::Y, lm.y), (Axis::Z, lm.z)] {
            if !value.is_finite() {
                return Err(Degeneracy::NonFinite { index, axis }.into());
            }
        }
    }
    Ok(())
}

/// Ratio-normalized coordinates: 63 values, x/y/z per landmark
pub fn normalized_coordinates(landmarks: &[Landmark; LANDMARK_COUNT]) -> Result<Vec<f64>> {
    check_finite(landmarks)?;

    let xs: Vec<f64> = landmarks.iter().map(|lm| lm.x as f64).collect();
    let ys: Vec<f64> = landmarks.iter().map(|lm| lm.y as f64).collect();
    let zs: Vec<f64> = landmarks.iter().map(|lm| lm.z as f64).collect();

    let mut minima = [0.0; 3];
    for (slot, (axis, values)) in minima
        .iter_mut()
        .zip([(Axis::X, &xs), (Axis::Y, &ys), (Axis::Z, &zs)])
    {
        match min_of(values) {
            Some(min) if min != 0.0 => *slot = min,
            _ => return Err(Degeneracy::ZeroMinimum(axis).into()),
        }
    }
    let [min_x, min_y, min_z] = minima;

    let mut coords = Vec::with_capacity(COORDINATE_COUNT);
    for i in 0..LANDMARK_COUNT {
        coords.push(xs[i] / min_x);
        coords.push(ys[i] / min_y);
        coords.push(zs[i] / min_z);
    }
    Ok(coords)
}

/// Inter-finger spread angles in degrees, in [`JOINT_GROUPS`] order
pub fn joint_angles(landmarks: &[Landmark; LANDMARK_COUNT]) -> Result<[f64; ANGLE_COUNT]> {
    check_finite(landmarks)?;

    let mut angles = [0.0; ANGLE_COUNT];
    for (group, (slot, &(a, b, c, d))) in angles.iter_mut().zip(JOINT_GROUPS.iter()).enumerate() {
        let v1 = point(&landmarks[a]) - point(&landmarks[b]);
        let v2 = point(&landmarks[c]) - point(&landmarks[d]);
        *slot = angle_between(&v1, &v2).ok_or(Degeneracy::ZeroLengthSegment { group })?;
    }
    Ok(angles)
}

/// Full 67-value feature vector for one hand
pub fn build_features(landmarks: &[Landmark; LANDMARK_COUNT]) -> Result<FeatureVector> {
    let mut values = normalized_coordinates(landmarks)?;
    values.extend_from_slice(&joint_angles(landmarks)?);
    Ok(FeatureVector(values))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::RecognitionError;

    /// An open hand with every coordinate away from zero
    pub(crate) fn open_hand() -> [Landmark; LANDMARK_COUNT] {
        let mut hand = [Landmark::default(); LANDMARK_COUNT];
        hand[WRIST] = Landmark::new(0.50, 0.80, -0.001);
        let fingers = [
            [THUMB_CMC, THUMB_MCP, THUMB_IP, THUMB_TIP],
            [INDEX_FINGER_MCP, INDEX_FINGER_PIP, INDEX_FINGER_DIP, INDEX_FINGER_TIP],
            [MIDDLE_FINGER_MCP, MIDDLE_FINGER_PIP, MIDDLE_FINGER_DIP, MIDDLE_FINGER_TIP],
            [RING_FINGER_MCP, RING_FINGER_PIP, RING_FINGER_DIP, RING_FINGER_TIP],
            [PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP],
        ];
        for (f, joints) in fingers.iter().enumerate() {
            let base_x = 0.38 + f as f32 * 0.06;
            for (j, &idx) in joints.iter().enumerate() {
                let step = (j + 1) as f32;
                hand[idx] = Landmark::new(
                    base_x + (f as f32 - 2.0) * 0.01 * step,
                    0.72 - 0.07 * step,
                    -0.01 - 0.005 * step,
                );
            }
        }
        hand
    }

    #[test]
    fn test_feature_vector_has_67_values() {
        let features = build_features(&open_hand()).unwrap();
        assert_eq!(features.len(), FEATURE_LEN);
        assert_eq!(FEATURE_LEN, 67);
        assert!(features.as_slice().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_features_are_deterministic() {
        let hand = open_hand();
        let first = build_features(&hand).unwrap();
        let second = build_features(&hand).unwrap();
        let first_bits: Vec<u64> = first.as_slice().iter().map(|v| v.to_bits()).collect();
        let second_bits: Vec<u64> = second.as_slice().iter().map(|v| v.to_bits()).collect();
        assert_eq!(first_bits, second_bits);
    }

    #[test]
    fn test_coordinates_are_divided_by_axis_minimum() {
        let hand = open_hand();
        let coords = normalized_coordinates(&hand).unwrap();
        assert_eq!(coords.len(), COORDINATE_COUNT);

        let min_x = hand.iter().map(|lm| lm.x as f64).fold(f64::INFINITY, f64::min);
        let min_z = hand.iter().map(|lm| lm.z as f64).fold(f64::INFINITY, f64::min);
        assert_eq!(coords[0], hand[WRIST].x as f64 / min_x);
        assert_eq!(coords[3 * PINKY_TIP + 2], hand[PINKY_TIP].z as f64 / min_z);
        // Every ratio is at least 1 on the x axis since the minimum is positive
        assert!(coords.iter().step_by(3).all(|&r| r >= 1.0));
    }

    #[test]
    fn test_zero_minimum_is_degenerate() {
        let mut hand = open_hand();
        hand[PINKY_TIP].x = 0.0;
        let err = build_features(&hand).unwrap_err();
        assert!(matches!(
            err,
            RecognitionError::DegenerateNormalization(Degeneracy::ZeroMinimum(Axis::X))
        ));
    }

    #[test]
    fn test_zero_minimum_on_z_is_degenerate() {
        let mut hand = open_hand();
        for lm in hand.iter_mut() {
            lm.z = lm.z.abs();
        }
        hand[WRIST].z = 0.0;
        let err = normalized_coordinates(&hand).unwrap_err();
        assert!(matches!(
            err,
            RecognitionError::DegenerateNormalization(Degeneracy::ZeroMinimum(Axis::Z))
        ));
    }

    #[test]
    fn test_non_finite_landmark_is_degenerate() {
        let mut hand = open_hand();
        hand[INDEX_FINGER_TIP].y = f32::NAN;
        let err = build_features(&hand).unwrap_err();
        assert!(matches!(
            err,
            RecognitionError::DegenerateNormalization(Degeneracy::NonFinite { index: 8, axis: Axis::Y })
        ));
    }

    #[test]
    fn test_right_angle_between_thumb_and_index() {
        let mut hand = open_hand();
        hand[THUMB_CMC] = Landmark::new(0.40, 0.60, -0.02);
        hand[THUMB_TIP] = Landmark::new(0.50, 0.60, -0.02);
        hand[INDEX_FINGER_MCP] = Landmark::new(0.45, 0.60, -0.02);
        hand[INDEX_FINGER_TIP] = Landmark::new(0.45, 0.40, -0.02);
        let angles = joint_angles(&hand).unwrap();
        assert!((angles[0] - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_collapsed_finger_is_degenerate() {
        let mut hand = open_hand();
        hand[RING_FINGER_TIP] = hand[RING_FINGER_MCP];
        let err = joint_angles(&hand).unwrap_err();
        assert!(matches!(
            err,
            RecognitionError::DegenerateNormalization(Degeneracy::ZeroLengthSegment { group: 2 })
        ));
    }
}
