//! Pure colour math: luminance models, hue policy, HSL adjustments.

use crate::colour::Colour;

/// Perceived luminance of a colour, in `[0.0, 1.0]`.
///
/// Uses the Rec. 601 luma weights on non-linear channel values. This is the
/// cheap model used to decide text polarity over a palette.
pub fn perceived_luminance(colour: Colour) -> f64 {
    let r = f64::from(colour.r);
    let g = f64::from(colour.g);
    let b = f64::from(colour.b);
    (0.299 * r + 0.587 * g + 0.114 * b) / 255.0
}

/// WCAG relative luminance of a colour, in `[0.0, 1.0]`.
///
/// Channels are linearized before weighting, per the WCAG 2.x definition.
pub fn relative_luminance(colour: Colour) -> f64 {
    let r = linearize(colour.r);
    let g = linearize(colour.g);
    let b = linearize(colour.b);
    0.2126f64.mul_add(r, 0.7152f64.mul_add(g, 0.0722 * b))
}

/// Linearize a single sRGB channel.
fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Shift a hue away from the band it sits in.
///
/// Blues (200..=250) nudge 10 degrees toward cyan, violets (250..320) pull
/// 20 degrees back toward blue, and everything else rotates 25 degrees
/// forward, wrapping at 360.
pub fn hue_shift(hue: f32) -> f32 {
    if (200.0..=250.0).contains(&hue) {
        hue - 10.0
    } else if hue > 250.0 && hue < 320.0 {
        hue - 20.0
    } else {
        (hue + 25.0).rem_euclid(360.0)
    }
}

/// Increase lightness by `amount`, clamped to `[0.0, 1.0]`.
pub fn brighten(colour: Colour, amount: f32) -> Colour {
    let (h, s, l) = colour.to_hsl();
    Colour::from_hsl(h, s, l + amount).with_alpha(colour.a)
}

/// Decrease lightness by `amount`, clamped to `[0.0, 1.0]`.
pub fn darken(colour: Colour, amount: f32) -> Colour {
    brighten(colour, -amount)
}

/// Increase saturation by `amount`, clamped to `[0.0, 1.0]`.
pub fn saturate(colour: Colour, amount: f32) -> Colour {
    let (h, s, l) = colour.to_hsl();
    Colour::from_hsl(h, s + amount, l).with_alpha(colour.a)
}

/// Decrease saturation by `amount`, clamped to `[0.0, 1.0]`.
pub fn desaturate(colour: Colour, amount: f32) -> Colour {
    saturate(colour, -amount)
}

/// Multiply lightness by `factor`, clamped to `[0.0, 1.0]`.
pub fn scale_lightness(colour: Colour, factor: f32) -> Colour {
    let (h, s, l) = colour.to_hsl();
    Colour::from_hsl(h, s, l * factor).with_alpha(colour.a)
}

/// Multiply saturation by `factor`, clamped to `[0.0, 1.0]`.
pub fn scale_saturation(colour: Colour, factor: f32) -> Colour {
    let (h, s, l) = colour.to_hsl();
    Colour::from_hsl(h, s * factor, l).with_alpha(colour.a)
}

/// Rotate hue by `degrees`, wrapping at 360.
pub fn rotate_hue(colour: Colour, degrees: f32) -> Colour {
    let (h, s, l) = colour.to_hsl();
    Colour::from_hsl(h + degrees, s, l).with_alpha(colour.a)
}

/// Linear blend of two colours, `t` being the fraction of `b`.
///
/// Interpolates each sRGB channel and the alpha fraction directly.
pub fn mix(a: Colour, b: Colour, t: f32) -> Colour {
    let lerp = |x: u8, y: u8| (f32::from(x) + (f32::from(y) - f32::from(x)) * t).round() as u8;
    Colour::new(
        lerp(a.r, b.r),
        lerp(a.g, b.g),
        lerp(a.b, b.b),
        a.a + (b.a - a.a) * t,
    )
}
