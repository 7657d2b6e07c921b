//! Conservative edge scoring from luma gradients.

use crate::foundation::core::rec709_luma;
use crate::foundation::math::clamp01;

/// Score a 2×2 (or diagonal-corner) neighborhood for edge likelihood.
///
/// Horizontal and vertical luma gradients are summed pairwise and the
/// larger one is mapped to `[0, 1]`: gradients at or below `threshold`
/// score 0, saturating to 1 at three times the threshold.
///
/// The same scoring runs on XYZ triples inside the upsampler and on RGB
/// triples in the sharpener; the Rec.709 weighting is applied to whatever
/// channels are passed.
pub fn edge_strength(a: [f32; 3], b: [f32; 3], c: [f32; 3], d: [f32; 3], threshold: f32) -> f32 {
    let la = rec709_luma(a);
    let lb = rec709_luma(b);
    let lc = rec709_luma(c);
    let ld = rec709_luma(d);

    let grad_h = (la - lb).abs() + (lc - ld).abs();
    let grad_v = (la - lc).abs() + (lb - ld).abs();
    let max_grad = grad_h.max(grad_v);

    clamp01((max_grad - threshold) / (threshold * 2.0))
}

/// Weight multiplier for a detected edge: 1 with no edge, `edge_weight`
/// at full strength.
pub(crate) fn edge_adjusted_weight(strength: f32, edge_weight: f32) -> f32 {
    1.0 + strength * (edge_weight - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: f32 = 0.15;

    #[test]
    fn flat_region_scores_zero() {
        let c = [0.4, 0.4, 0.4];
        assert_eq!(edge_strength(c, c, c, c, T), 0.0);
    }

    #[test]
    fn black_white_boundary_saturates() {
        let blk = [0.0, 0.0, 0.0];
        let wht = [1.0, 1.0, 1.0];
        // Vertical edge: left column black, right column white.
        assert_eq!(edge_strength(blk, wht, blk, wht, T), 1.0);
        // Horizontal edge.
        assert_eq!(edge_strength(blk, blk, wht, wht, T), 1.0);
    }

    #[test]
    fn sub_threshold_gradient_scores_zero() {
        let a = [0.50, 0.50, 0.50];
        let b = [0.55, 0.55, 0.55];
        // Both summed gradients stay at 0.1 < threshold.
        assert_eq!(edge_strength(a, b, a, b, T), 0.0);
    }

    #[test]
    fn midway_gradient_scores_between() {
        let a = [0.0, 0.0, 0.0];
        let b = [0.15, 0.15, 0.15];
        // gradH = 0.3 maps to (0.3 - 0.15) / 0.3 = 0.5.
        let s = edge_strength(a, b, a, b, T);
        assert!((s - 0.5).abs() < 1e-6, "got {s}");
    }

    #[test]
    fn edge_adjusted_weight_interpolates() {
        assert_eq!(edge_adjusted_weight(0.0, 1.2), 1.0);
        assert!((edge_adjusted_weight(1.0, 1.2) - 1.2).abs() < 1e-6);
        assert!((edge_adjusted_weight(0.5, 1.2) - 1.1).abs() < 1e-6);
    }
}
