//! tint - Adaptive UI theme derivation
//!
//! A library for turning an arbitrary background image into a small set of
//! UI colours that stay legible: the image is acquired under single-flight
//! and timeout control, its dominant colours are sampled, and a six-slot
//! theme is synthesized with bounded contrast correction against the
//! chosen text polarity.

pub mod acquire;
pub mod cli;
pub mod colour;
pub mod contrast;
pub mod error;
pub mod extract;
pub mod math;
pub mod sink;
pub mod synth;
pub mod theme;

pub use acquire::{
    AcquireOptions, Acquired, FsImageSource, ImageSource, ThemeAcquirer, DECODE_TIMEOUT,
    DEFAULT_BACKGROUND,
};
pub use colour::Colour;
pub use contrast::{contrast_ratio, meets_contrast};
pub use error::{Result, TintError};
pub use extract::{ExtractedPalette, MedianCutExtractor, PaletteExtraction, DEFAULT_SAMPLE_COUNT};
pub use sink::{CssVariableSink, NullSink, ThemeSink};
pub use synth::synthesize;
pub use theme::{TextPolarity, ThemeColours, ThemeSlot, POLARITY_THRESHOLD};
