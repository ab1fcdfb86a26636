//! WCAG contrast evaluation.

use crate::colour::Colour;
use crate::math::relative_luminance;

/// WCAG contrast ratio between two colours, in `[1.0, 21.0]`.
///
/// Symmetric in its arguments; identical colours give 1.0. Alpha is
/// ignored: ratios are computed on the flat channel values.
pub fn contrast_ratio(a: Colour, b: Colour) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Check whether two colours meet a minimum contrast ratio.
pub fn meets_contrast(a: Colour, b: Colour, min_ratio: f64) -> bool {
    contrast_ratio(a, b) >= min_ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contrast_black_white_is_21() {
        let ratio = contrast_ratio(Colour::BLACK, Colour::WHITE);
        assert!((ratio - 21.0).abs() < 0.01);
    }

    #[test]
    fn test_contrast_identical_is_one() {
        assert_eq!(contrast_ratio(Colour::WHITE, Colour::WHITE), 1.0);
        let c = Colour::rgb(120, 40, 200);
        assert_eq!(contrast_ratio(c, c), 1.0);
    }

    #[test]
    fn test_contrast_is_symmetric() {
        let a = Colour::rgb(30, 60, 90);
        let b = Colour::rgb(220, 220, 210);
        assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
    }

    #[test]
    fn test_contrast_in_wcag_range() {
        for r in (0..=255).step_by(51) {
            for g in (0..=255).step_by(51) {
                let c = Colour::rgb(r as u8, g as u8, 128);
                let against_white = contrast_ratio(c, Colour::WHITE);
                let against_black = contrast_ratio(c, Colour::BLACK);
                assert!((1.0..=21.0).contains(&against_white));
                assert!((1.0..=21.0).contains(&against_black));
            }
        }
    }

    #[test]
    fn test_contrast_ignores_alpha() {
        let opaque = Colour::rgb(59, 111, 196);
        let translucent = opaque.with_alpha(0.2);
        assert_eq!(
            contrast_ratio(opaque, Colour::WHITE),
            contrast_ratio(translucent, Colour::WHITE)
        );
    }

    #[test]
    fn test_meets_contrast_around_aa_threshold() {
        // #767676 on white is the canonical 4.54:1 pass; #777777 fails at 4.48:1
        assert!(meets_contrast(Colour::rgb(118, 118, 118), Colour::WHITE, 4.5));
        assert!(!meets_contrast(Colour::rgb(119, 119, 119), Colour::WHITE, 4.5));
    }
}
