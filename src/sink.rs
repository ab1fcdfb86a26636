//! Write-only consumers of synthesized themes.
//!
//! Sinks sit outside the engine's error contract: applying a theme cannot
//! fail back into an acquisition. Failures on the sink side stay there.

use std::io::Write;
use std::sync::Mutex;

use crate::theme::ThemeColours;

/// Receives each freshly synthesized colour set.
pub trait ThemeSink: Send + Sync {
    /// Apply a colour set to the presentation context.
    fn apply(&self, colours: &ThemeColours);
}

/// Writes each slot as a CSS custom-property line: `--slot: value;`.
///
/// Lines follow slot order, so output is byte-stable for a given theme.
pub struct CssVariableSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> CssVariableSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Take the writer back out of the sink.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> ThemeSink for CssVariableSink<W> {
    fn apply(&self, colours: &ThemeColours) {
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        for (slot, colour) in colours.iter() {
            let _ = writeln!(writer, "--{slot}: {colour};");
        }
        let _ = writer.flush();
    }
}

/// Discards every theme. For callers that only want the polarity result.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ThemeSink for NullSink {
    fn apply(&self, _colours: &ThemeColours) {}
}
