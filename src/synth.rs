//! Theme synthesis: turns a dominant colour into the six-slot colour set.

use tracing::debug;

use crate::colour::Colour;
use crate::contrast::meets_contrast;
use crate::math::{
    brighten, darken, desaturate, hue_shift, mix, rotate_hue, saturate, scale_lightness,
    scale_saturation,
};
use crate::theme::{TextPolarity, ThemeColours};

/// Minimum contrast of the selected colour against the text colour.
const SELECTED_MIN_CONTRAST: f64 = 4.5;
/// Correction attempts allowed for the selected colour.
const SELECTED_MAX_ATTEMPTS: u32 = 5;
/// Minimum contrast of the selected colour against the base colour.
const BASE_CONTRAST_FLOOR: f64 = 2.5;
/// Minimum contrast of the subtitle against the text colour.
const SUBTITLE_TEXT_CONTRAST: f64 = 3.2;
/// Minimum contrast of the subtitle against the base colour.
const SUBTITLE_BASE_CONTRAST: f64 = 4.0;
/// Correction attempts allowed for the subtitle colour.
const SUBTITLE_MAX_ATTEMPTS: u32 = 6;
/// Lightness step applied per correction attempt.
const CORRECTION_STEP: f32 = 0.1;

/// Derive a full colour set from the dominant image colour and the
/// palette-average perceived luminance.
///
/// Deterministic: the same inputs always give the same set. Contrast
/// corrections are bounded; a loop that exhausts its attempts keeps the
/// best colour it reached rather than failing.
pub fn synthesize(base: Colour, average_luminance: f64) -> ThemeColours {
    let polarity = TextPolarity::from_average_luminance(average_luminance);

    let selected = selected_colour(base, polarity);
    let subtitle = subtitle_colour(selected, base, polarity);

    let colours = ThemeColours {
        text: polarity.text_colour(),
        selected,
        subtitle,
        blend: blend_colour(selected, polarity),
        right_bg: right_bg_colour(base, selected, polarity),
        blur: blur_colour(base, polarity),
    };
    debug!(?polarity, selected = %colours.selected, "synthesized theme");
    colours
}

/// Build the selected (accent) colour and correct it for legibility.
fn selected_colour(base: Colour, polarity: TextPolarity) -> Colour {
    let (h, s, l) = base.to_hsl();

    // Bright yellows are steered off the accent slot entirely
    let (hue, lightness) = if h > 40.0 && h < 65.0 && l > 0.7 {
        ((h + 20.0).rem_euclid(360.0), l - 0.5)
    } else {
        (hue_shift(h), l)
    };

    let mut saturation = (s + 0.18).min(0.85);
    saturation += if l < 0.5 { 0.05 } else { -0.05 };

    let mut selected = Colour::from_hsl(hue, saturation, lightness.clamp(0.52, 0.66));
    selected = saturate(selected, 0.25);
    selected = brighten(selected, 0.15);
    selected = selected.with_alpha(0.88);

    let text = polarity.text_colour();
    let mut attempts = 0;
    while !meets_contrast(selected, text, SELECTED_MIN_CONTRAST)
        && attempts < SELECTED_MAX_ATTEMPTS
    {
        selected = match polarity {
            TextPolarity::Light => darken(selected, CORRECTION_STEP),
            TextPolarity::Dark => brighten(selected, CORRECTION_STEP),
        };
        attempts += 1;
    }

    // Keep the accent from melting into the background it sits on
    if !meets_contrast(selected, base, BASE_CONTRAST_FLOOR) {
        selected = brighten(selected, CORRECTION_STEP);
    }

    selected
}

/// Build the subtitle colour: a softened companion to the selected colour
/// held to its own contrast floors against text and base.
fn subtitle_colour(selected: Colour, base: Colour, polarity: TextPolarity) -> Colour {
    let text = polarity.text_colour();
    let mut subtitle = match polarity {
        TextPolarity::Light => rotate_hue(desaturate(brighten(selected, 0.9), 0.4), 10.0),
        TextPolarity::Dark => rotate_hue(desaturate(darken(selected, 0.5), 0.3), 15.0),
    };

    let mut attempts = 0;
    while attempts < SUBTITLE_MAX_ATTEMPTS {
        if meets_contrast(subtitle, text, SUBTITLE_TEXT_CONTRAST)
            && meets_contrast(subtitle, base, SUBTITLE_BASE_CONTRAST)
        {
            break;
        }
        subtitle = match polarity {
            TextPolarity::Light => saturate(brighten(subtitle, 0.3), 0.2),
            TextPolarity::Dark => saturate(darken(subtitle, 0.3), 0.2),
        };
        attempts += 1;
    }

    subtitle
}

/// Translucent wash laid between content panes.
fn blend_colour(selected: Colour, polarity: TextPolarity) -> Colour {
    let (anchor, alpha) = match polarity {
        TextPolarity::Light => (Colour::BLACK, 0.2),
        TextPolarity::Dark => (Colour::WHITE, 0.1),
    };
    let blended = desaturate(scale_lightness(mix(anchor, selected, 0.25), 1.06), 0.3);
    blended.with_alpha(alpha)
}

/// Tinted backdrop for the detail pane.
fn right_bg_colour(base: Colour, selected: Colour, polarity: TextPolarity) -> Colour {
    let alpha = match polarity {
        TextPolarity::Light => 0.2,
        TextPolarity::Dark => 0.4,
    };
    let blended = scale_lightness(scale_saturation(mix(base, selected, 0.3), 1.2), 1.1);
    blended.with_alpha(alpha)
}

/// Frosted overlay colour drawn over the background image.
fn blur_colour(base: Colour, polarity: TextPolarity) -> Colour {
    let (anchor, lightness_factor, alpha) = match polarity {
        TextPolarity::Light => (Colour::BLACK, 0.9, 0.18),
        TextPolarity::Dark => (Colour::WHITE, 1.1, 0.12),
    };
    let blended = scale_lightness(desaturate(mix(anchor, base, 0.25), 0.3), lightness_factor);
    blended.with_alpha(alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::contrast_ratio;

    #[test]
    fn test_dark_palette_gets_light_text() {
        let base = Colour::from_hsl(220.0, 0.5, 0.4);
        let theme = synthesize(base, 0.2);
        assert_eq!(theme.text, Colour::WHITE);
        assert_eq!(theme.text.css(), "#ffffff");
    }

    #[test]
    fn test_bright_palette_gets_dark_text() {
        let base = Colour::from_hsl(30.0, 0.2, 0.85);
        let theme = synthesize(base, 0.8);
        assert_eq!(theme.text, Colour::BLACK);
    }

    #[test]
    fn test_selected_corrected_to_meet_text_contrast() {
        // Near-black blue base: the correction loop lands well above 4.5
        // and the accent keeps clear of the base, so no floor nudge fires
        let base = Colour::from_hsl(220.0, 0.5, 0.1);
        let theme = synthesize(base, 0.15);
        assert!(contrast_ratio(theme.selected, theme.text) >= 4.5);
    }

    #[test]
    fn test_selected_correction_can_exhaust() {
        // High-luma green: five darkening steps still miss 4.5 against
        // white text, and the best reached colour is kept
        let base = Colour::from_hsl(100.0, 0.9, 0.7);
        let theme = synthesize(base, 0.3);
        assert!(contrast_ratio(theme.selected, theme.text) < 4.5);
        assert!((theme.selected.a - 0.88).abs() < 1e-6);
    }

    #[test]
    fn test_purple_band_hue_is_steered_back() {
        let base = Colour::from_hsl(280.0, 0.5, 0.5);
        let theme = synthesize(base, 0.3);
        let (hue, _, _) = theme.selected.to_hsl();
        assert!((hue - 260.0).abs() < 3.0, "hue {hue} not near 260");
    }

    #[test]
    fn test_bright_yellow_is_steered_off_the_accent() {
        let base = Colour::from_hsl(50.0, 0.6, 0.8);
        let theme = synthesize(base, 0.8);
        let (hue, _, _) = theme.selected.to_hsl();
        assert!((hue - 70.0).abs() < 3.0, "hue {hue} not near 70");
    }

    #[test]
    fn test_selected_alpha_is_fixed() {
        let theme = synthesize(Colour::from_hsl(220.0, 0.5, 0.4), 0.2);
        assert!((theme.selected.a - 0.88).abs() < 1e-6);
    }

    #[test]
    fn test_surface_alphas_follow_polarity() {
        let light = synthesize(Colour::from_hsl(220.0, 0.5, 0.3), 0.2);
        assert!((light.blend.a - 0.2).abs() < 1e-6);
        assert!((light.right_bg.a - 0.2).abs() < 1e-6);
        assert!((light.blur.a - 0.18).abs() < 1e-6);

        let dark = synthesize(Colour::from_hsl(30.0, 0.3, 0.8), 0.8);
        assert!((dark.blend.a - 0.1).abs() < 1e-6);
        assert!((dark.right_bg.a - 0.4).abs() < 1e-6);
        assert!((dark.blur.a - 0.12).abs() < 1e-6);
    }

    #[test]
    fn test_blend_anchors_toward_black_for_light_polarity() {
        let theme = synthesize(Colour::from_hsl(220.0, 0.5, 0.4), 0.2);
        let (_, _, blend_l) = theme.blend.to_hsl();
        let (_, _, selected_l) = theme.selected.to_hsl();
        assert!(blend_l < selected_l);
    }

    #[test]
    fn test_subtitle_accepted_when_floors_met() {
        // Very light selected colour: the dark-polarity start point already
        // clears both floors, so no correction steps run
        let selected = Colour::from_hsl(210.0, 0.6, 0.95);
        let subtitle = subtitle_colour(selected, Colour::rgb(245, 245, 240), TextPolarity::Dark);
        assert!(meets_contrast(subtitle, Colour::BLACK, SUBTITLE_TEXT_CONTRAST));
        assert!(
            meets_contrast(subtitle, Colour::rgb(245, 245, 240), SUBTITLE_BASE_CONTRAST)
        );
        let (_, _, l) = subtitle.to_hsl();
        assert!((0.4..0.5).contains(&l), "subtitle was corrected: l = {l}");
    }

    #[test]
    fn test_subtitle_exhaustion_keeps_last_colour() {
        // Light polarity pushes the start point to pure white, which can
        // never contrast against white text; the loop must still terminate
        let selected = Colour::from_hsl(220.0, 0.8, 0.4);
        let subtitle = subtitle_colour(selected, Colour::rgb(20, 20, 30), TextPolarity::Light);
        assert_eq!(subtitle, Colour::WHITE);
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let base = Colour::from_hsl(280.0, 0.7, 0.45);
        let first = synthesize(base, 0.33);
        let second = synthesize(base, 0.33);
        assert_eq!(first, second);
    }
}
