//! Linear-RGB ↔ CIE-XYZ conversion (D65 white point).
//!
//! The upsampler interpolates in XYZ; the sharpener stays in RGB. The two
//! matrices are mutually inverse, so a round trip is the identity to
//! floating tolerance.

/// Row-major matrix taking linear RGB to CIE XYZ.
pub const RGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// Row-major matrix taking CIE XYZ back to linear RGB; inverse of
/// [`RGB_TO_XYZ`].
pub const XYZ_TO_RGB: [[f32; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

fn apply(m: &[[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// Convert a linear RGB triple to CIE XYZ.
pub fn rgb_to_xyz(rgb: [f32; 3]) -> [f32; 3] {
    apply(&RGB_TO_XYZ, rgb)
}

/// Convert a CIE XYZ triple to linear RGB.
pub fn xyz_to_rgb(xyz: [f32; 3]) -> [f32; 3] {
    apply(&XYZ_TO_RGB, xyz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_is_identity() {
        for r in 0..=4 {
            for g in 0..=4 {
                for b in 0..=4 {
                    let c = [r as f32 / 4.0, g as f32 / 4.0, b as f32 / 4.0];
                    let back = xyz_to_rgb(rgb_to_xyz(c));
                    for i in 0..3 {
                        assert!(
                            (back[i] - c[i]).abs() < 1e-5,
                            "round trip drifted at {c:?}: {back:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn matrices_are_mutual_inverses() {
        for row in 0..3 {
            for col in 0..3 {
                let mut acc = 0.0f32;
                for k in 0..3 {
                    acc += XYZ_TO_RGB[row][k] * RGB_TO_XYZ[k][col];
                }
                let expect = if row == col { 1.0 } else { 0.0 };
                assert!((acc - expect).abs() < 1e-5, "product[{row}][{col}] = {acc}");
            }
        }
    }

    #[test]
    fn white_maps_to_d65() {
        let xyz = rgb_to_xyz([1.0, 1.0, 1.0]);
        assert!((xyz[0] - 0.9505).abs() < 1e-3);
        assert!((xyz[1] - 1.0).abs() < 1e-3);
        assert!((xyz[2] - 1.0891).abs() < 1e-3);
    }
}
