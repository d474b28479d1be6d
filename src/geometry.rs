//! Small numeric helpers shared by the feature extractors

use nalgebra::Vector3;

/// Smallest value of a sequence; `None` when empty
pub fn min_of(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

/// Angle between two 3D vectors in degrees, or `None` if either has zero length.
///
/// Uses `arccos(v1·v2 / (|v1|·|v2|))` with the cosine clipped to [-1, 1] so
/// rounding noise on parallel vectors cannot leave the arccos domain.
pub fn angle_between(v1: &Vector3<f64>, v2: &Vector3<f64>) -> Option<f64> {
    let norms = v1.norm() * v2.norm();
    if norms == 0.0 || !norms.is_finite() {
        return None;
    }
    let cosine = (v1.dot(v2) / norms).clamp(-1.0, 1.0);
    Some(cosine.acos().to_degrees())
}
