//! Seeded diameter packing along the bubble outline.
//!
//! The thinking bubble is ringed with circles whose diameters sum to the
//! outline's perimeter. Diameters are random-looking but must not jitter
//! between frames, so the generator is always seeded from the geometry
//! ([`geometry_seed`]) and never from ambient randomness.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Allowed relative overshoot of the bounds after the final uniform rescale.
pub const SCALE_TOLERANCE: f64 = 0.01;

/// Outcome of [`compute_diameters`].
///
/// `is_valid == false` is a diagnostic only: `diameters` still holds a usable
/// sequence so the renderer can keep drawing (in its error color).
#[derive(Debug, Clone, PartialEq)]
pub struct PackingResult {
    pub diameters: Vec<f64>,
    pub is_valid: bool,
}

impl PackingResult {
    fn invalid(diameters: Vec<f64>) -> Self {
        Self { diameters, is_valid: false }
    }

    /// Total length covered by the diameters.
    pub fn sum(&self) -> f64 {
        self.diameters.iter().sum()
    }
}

/// Pack `target_length` with diameters drawn from `[min_diameter, max_diameter]`.
///
/// Diameters are drawn so the unfilled remainder stays placeable; once the
/// remainder fits in the bounds it becomes the last circle. If the remainder
/// ends up shorter than `min_diameter` (only possible when `max < 2 * min`),
/// every diameter is scaled uniformly so the sum equals `target_length`, and
/// the result is invalid if that pushes a diameter more than
/// [`SCALE_TOLERANCE`] outside the bounds.
///
/// Identical arguments always produce identical output.
pub fn compute_diameters(target_length: f64, min_diameter: f64, max_diameter: f64, seed: u64) -> PackingResult {
    if !target_length.is_finite() || target_length <= 0.0 {
        return PackingResult::invalid(Vec::new());
    }
    if !min_diameter.is_finite() || !max_diameter.is_finite() || min_diameter <= 0.0 || min_diameter > max_diameter {
        tracing::warn!(min_diameter, max_diameter, "degenerate packing bounds");
        return PackingResult::invalid(vec![target_length]);
    }
    if target_length < min_diameter {
        tracing::warn!(target_length, min_diameter, "outline too short for a single circle");
        return PackingResult::invalid(vec![target_length]);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut diameters = Vec::with_capacity((target_length / min_diameter).ceil() as usize);
    let mut remaining = target_length;

    while remaining >= min_diameter {
        if remaining <= max_diameter {
            diameters.push(remaining);
            remaining = 0.0;
            break;
        }

        // Leave at least min_diameter behind when possible
        let upper = max_diameter.min(remaining - min_diameter);
        let d = if upper >= min_diameter {
            rng.gen_range(min_diameter..=upper)
        } else {
            max_diameter
        };
        diameters.push(d);
        remaining -= d;
    }

    if remaining <= 0.0 {
        return PackingResult { diameters, is_valid: true };
    }

    let sum: f64 = diameters.iter().sum();
    let scale = target_length / sum;
    for d in &mut diameters {
        *d *= scale;
    }

    let lo = min_diameter * (1.0 - SCALE_TOLERANCE);
    let hi = max_diameter * (1.0 + SCALE_TOLERANCE);
    let is_valid = diameters.iter().all(|&d| d >= lo && d <= hi);
    if !is_valid {
        tracing::warn!(target_length, min_diameter, max_diameter, scale, "packing rescale exceeded bounds");
    } else {
        tracing::trace!(count = diameters.len(), scale, "packing rescaled");
    }

    PackingResult { diameters, is_valid }
}

/// Stable packing seed for an outline.
///
/// Extents are quantized to half a point so sub-pixel layout noise maps to
/// the same seed.
pub fn geometry_seed(width: f64, height: f64, corner_radius: f64) -> u64 {
    let q = |v: f64| -> u64 {
        if v.is_finite() { (v * 2.0).round() as i64 as u64 } else { 0 }
    };
    let mut h = 0x9E37_79B9_7F4A_7C15u64;
    for v in [q(width), q(height), q(corner_radius)] {
        h = splitmix64(h ^ v);
    }
    h
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_case() {
        let a = compute_diameters(100.0, 10.0, 20.0, 42);
        let b = compute_diameters(100.0, 10.0, 20.0, 42);
        assert_eq!(a, b);
        assert!(a.is_valid);
        assert!((a.sum() - 100.0).abs() <= 0.5);
        assert!(a.diameters.iter().all(|&d| (10.0..=20.0).contains(&d)));
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = compute_diameters(400.0, 10.0, 20.0, 1);
        let b = compute_diameters(400.0, 10.0, 20.0, 2);
        assert_ne!(a.diameters, b.diameters);
    }

    #[test]
    fn test_exact_fit_single_circle() {
        let r = compute_diameters(15.0, 10.0, 20.0, 7);
        assert!(r.is_valid);
        assert_eq!(r.diameters, vec![15.0]);
    }

    #[test]
    fn test_too_short() {
        let r = compute_diameters(5.0, 10.0, 20.0, 7);
        assert!(!r.is_valid);
        assert_eq!(r.diameters, vec![5.0]);
    }

    #[test]
    fn test_non_positive_target() {
        let r = compute_diameters(0.0, 10.0, 20.0, 7);
        assert!(!r.is_valid);
        assert!(r.diameters.is_empty());
    }

    #[test]
    fn test_degenerate_bounds() {
        assert!(!compute_diameters(100.0, 0.0, 20.0, 7).is_valid);
        assert!(!compute_diameters(100.0, 30.0, 20.0, 7).is_valid);
        assert!(!compute_diameters(100.0, 10.0, f64::INFINITY, 7).is_valid);
    }

    #[test]
    fn test_narrow_bounds_rescale() {
        // max < 2*min: 17 can't be split into [10, 12] pieces, 34 can
        let r = compute_diameters(34.0, 10.0, 12.0, 3);
        assert!((r.sum() - 34.0).abs() < 1e-9);
    }

    #[test]
    fn test_narrow_bounds_impossible_is_flagged() {
        // 17 with [10, 12]: one circle too small, two too big
        let r = compute_diameters(17.0, 10.0, 12.0, 3);
        assert!(!r.is_valid);
        assert!((r.sum() - 17.0).abs() < 1e-9);
    }

    #[test]
    fn test_geometry_seed_quantized() {
        assert_eq!(geometry_seed(100.0, 40.0, 10.0), geometry_seed(100.1, 40.0, 10.0));
        assert_ne!(geometry_seed(100.0, 40.0, 10.0), geometry_seed(101.0, 40.0, 10.0));
        assert_ne!(geometry_seed(100.0, 40.0, 10.0), geometry_seed(40.0, 100.0, 10.0));
    }
}
