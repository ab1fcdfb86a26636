//! Theme artifacts: text polarity and the six-slot colour set.

use std::fmt;

use serde::Serialize;

use crate::colour::Colour;

/// Palette-average luminance at or above which dark text is chosen.
pub const POLARITY_THRESHOLD: f64 = 0.55;

/// Whether UI text renders light or dark over the derived theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPolarity {
    /// White text over a dark background.
    Light,
    /// Black text over a bright background.
    Dark,
}

impl TextPolarity {
    /// Choose a polarity from the average perceived luminance of a palette.
    pub fn from_average_luminance(average: f64) -> Self {
        if average < POLARITY_THRESHOLD {
            Self::Light
        } else {
            Self::Dark
        }
    }

    /// The text colour this polarity renders with.
    pub fn text_colour(self) -> Colour {
        match self {
            Self::Light => Colour::WHITE,
            Self::Dark => Colour::BLACK,
        }
    }

    /// Check if this polarity renders light (white) text.
    pub fn is_light(self) -> bool {
        matches!(self, Self::Light)
    }
}

/// The six colour slots a theme fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSlot {
    Text,
    Selected,
    Subtitle,
    Blend,
    RightBg,
    Blur,
}

impl ThemeSlot {
    /// All slots, in serialization order.
    pub const ALL: [Self; 6] = [
        Self::Text,
        Self::Selected,
        Self::Subtitle,
        Self::Blend,
        Self::RightBg,
        Self::Blur,
    ];

    /// Custom-property name fragment for this slot.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Selected => "selected",
            Self::Subtitle => "subtitle",
            Self::Blend => "blend",
            Self::RightBg => "right-bg",
            Self::Blur => "blur",
        }
    }
}

impl fmt::Display for ThemeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete synthesized colour set, one colour per slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeColours {
    pub text: Colour,
    pub selected: Colour,
    pub subtitle: Colour,
    pub blend: Colour,
    #[serde(rename = "right-bg")]
    pub right_bg: Colour,
    pub blur: Colour,
}

impl ThemeColours {
    /// Look up the colour for a slot.
    pub fn get(&self, slot: ThemeSlot) -> Colour {
        match slot {
            ThemeSlot::Text => self.text,
            ThemeSlot::Selected => self.selected,
            ThemeSlot::Subtitle => self.subtitle,
            ThemeSlot::Blend => self.blend,
            ThemeSlot::RightBg => self.right_bg,
            ThemeSlot::Blur => self.blur,
        }
    }

    /// Iterate slots and colours in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = (ThemeSlot, Colour)> + '_ {
        ThemeSlot::ALL.into_iter().map(|slot| (slot, self.get(slot)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_theme() -> ThemeColours {
        ThemeColours {
            text: Colour::WHITE,
            selected: Colour::rgb(59, 111, 196).with_alpha(0.88),
            subtitle: Colour::rgb(180, 190, 210),
            blend: Colour::rgb(20, 30, 50).with_alpha(0.2),
            right_bg: Colour::rgb(40, 60, 90).with_alpha(0.2),
            blur: Colour::rgb(15, 20, 35).with_alpha(0.18),
        }
    }

    #[test]
    fn test_polarity_threshold() {
        assert_eq!(
            TextPolarity::from_average_luminance(0.2),
            TextPolarity::Light
        );
        assert_eq!(
            TextPolarity::from_average_luminance(0.549),
            TextPolarity::Light
        );
        assert_eq!(
            TextPolarity::from_average_luminance(0.55),
            TextPolarity::Dark
        );
        assert_eq!(
            TextPolarity::from_average_luminance(0.9),
            TextPolarity::Dark
        );
    }

    #[test]
    fn test_polarity_text_colours() {
        assert_eq!(TextPolarity::Light.text_colour(), Colour::WHITE);
        assert_eq!(TextPolarity::Dark.text_colour(), Colour::BLACK);
        assert!(TextPolarity::Light.is_light());
        assert!(!TextPolarity::Dark.is_light());
    }

    #[test]
    fn test_slot_names() {
        assert_eq!(ThemeSlot::Text.as_str(), "text");
        assert_eq!(ThemeSlot::RightBg.as_str(), "right-bg");
        assert_eq!(ThemeSlot::Blur.to_string(), "blur");
    }

    #[test]
    fn test_iter_follows_slot_order() {
        let theme = sample_theme();
        let slots: Vec<ThemeSlot> = theme.iter().map(|(slot, _)| slot).collect();
        assert_eq!(slots, ThemeSlot::ALL.to_vec());

        for (slot, colour) in theme.iter() {
            assert_eq!(colour, theme.get(slot));
        }
    }

    #[test]
    fn test_serializes_slot_keys_in_order() {
        let json = serde_json::to_string(&sample_theme()).unwrap();
        let mut last = 0;
        for slot in ThemeSlot::ALL {
            let key = format!("\"{}\":", slot.as_str());
            let at = json.find(&key).unwrap_or_else(|| panic!("missing {key}"));
            assert!(at >= last, "slot {slot} out of order");
            last = at;
        }
    }
}
