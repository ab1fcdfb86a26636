//! Background acquisition: resolve a reference, decode under a deadline,
//! fall back at most once, then synthesize and push the theme to the sink.

use std::any::type_name_of_val;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use image::DynamicImage;
use tracing::{debug, error, info, warn};

use crate::error::{Result, TintError};
use crate::extract::{MedianCutExtractor, PaletteExtraction, DEFAULT_SAMPLE_COUNT};
use crate::sink::ThemeSink;
use crate::synth::synthesize;
use crate::theme::{TextPolarity, ThemeColours};

/// Reference used when the requested background cannot be acquired.
pub const DEFAULT_BACKGROUND: &str = "url(\"/images/default.jpg\")";

/// How long a load may run before the acquisition falls back.
pub const DECODE_TIMEOUT: Duration = Duration::from_secs(15);

/// Fallback hops allowed after the requested reference fails.
const MAX_FALLBACK_HOPS: u32 = 1;

/// Supplies decoded images for background references.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Load and decode the image at `location`.
    async fn load(&self, location: &str) -> Result<DynamicImage>;
}

/// Loads images from a directory root on the local filesystem.
///
/// Absolute-style locations (`/images/a.jpg`) resolve inside the root, the
/// way a static-asset server maps request paths onto its document root.
/// Locations that climb out of the root with `..` are refused.
#[derive(Debug, Clone)]
pub struct FsImageSource {
    root: PathBuf,
}

impl FsImageSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, location: &str) -> Result<PathBuf> {
        let relative = Path::new(location.trim_start_matches('/'));
        if relative
            .components()
            .any(|component| matches!(component, Component::ParentDir))
        {
            return Err(TintError::Decode {
                location: location.to_string(),
                message: "path escapes the image root".to_string(),
            });
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ImageSource for FsImageSource {
    async fn load(&self, location: &str) -> Result<DynamicImage> {
        let path = self.resolve(location)?;
        debug!(location, path = %path.display(), "loading background image");

        let task_location = location.to_string();
        let decoded = tokio::task::spawn_blocking(move || {
            image::open(&path).map_err(|err| TintError::Decode {
                location: task_location,
                message: err.to_string(),
            })
        })
        .await
        .map_err(|err| TintError::Decode {
            location: location.to_string(),
            message: format!("decode task failed: {err}"),
        })??;

        Ok(decoded)
    }
}

/// Tunables for a [`ThemeAcquirer`].
#[derive(Debug, Clone)]
pub struct AcquireOptions {
    /// Load deadline; losing the race triggers the fallback hop.
    pub timeout: Duration,
    /// Palette samples requested per image.
    pub samples: usize,
    /// Reference tried when the requested one fails; `None` disables the hop.
    pub fallback: Option<String>,
}

impl Default for AcquireOptions {
    fn default() -> Self {
        Self {
            timeout: DECODE_TIMEOUT,
            samples: DEFAULT_SAMPLE_COUNT,
            fallback: Some(DEFAULT_BACKGROUND.to_string()),
        }
    }
}

/// A successful acquisition, as handed back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Acquired {
    /// The reference that actually loaded (the fallback's after a hop).
    pub reference: String,
    /// Whether light text was chosen over the derived theme.
    pub light_text: bool,
    /// The synthesized colour set, already pushed to the sink.
    pub colours: ThemeColours,
}

/// Drives one background acquisition at a time.
///
/// Overlapping requests are rejected, not queued: while one acquisition is
/// in flight every other call returns `None` immediately. The flight slot
/// is held across the fallback hop, so a request and its fallback count as
/// one acquisition.
pub struct ThemeAcquirer {
    source: Arc<dyn ImageSource>,
    extractor: Arc<dyn PaletteExtraction>,
    sink: Arc<dyn ThemeSink>,
    options: AcquireOptions,
    loading: AtomicBool,
}

impl fmt::Debug for ThemeAcquirer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeAcquirer")
            .field("source", &type_name_of_val(self.source.as_ref()))
            .field("extractor", &type_name_of_val(self.extractor.as_ref()))
            .field("sink", &type_name_of_val(self.sink.as_ref()))
            .field("options", &self.options)
            .field("loading", &self.loading.load(Ordering::SeqCst))
            .finish()
    }
}

impl ThemeAcquirer {
    pub fn new(source: Arc<dyn ImageSource>, sink: Arc<dyn ThemeSink>) -> Self {
        Self {
            source,
            extractor: Arc::new(MedianCutExtractor),
            sink,
            options: AcquireOptions::default(),
            loading: AtomicBool::new(false),
        }
    }

    /// Swap in a different palette extraction strategy.
    pub fn with_extractor(mut self, extractor: Arc<dyn PaletteExtraction>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_options(mut self, options: AcquireOptions) -> Self {
        self.options = options;
        self
    }

    /// Acquire a background and derive its theme.
    ///
    /// Returns `None` when the reference is not `url(...)`-wrapped, when
    /// another acquisition is already in flight, or when both the request
    /// and its fallback fail. Failures never surface as errors; they are
    /// logged and degrade to the fallback.
    pub async fn acquire(&self, reference: &str) -> Option<Acquired> {
        let location = match parse_reference(reference) {
            Ok(location) => location.to_string(),
            Err(_) => {
                debug!(reference, "not an image reference, dropping");
                return None;
            }
        };

        if self.loading.swap(true, Ordering::SeqCst) {
            warn!(reference, "acquisition already in flight, dropping request");
            return None;
        }
        let _guard = FlightGuard(&self.loading);

        let mut next = Some((reference.to_string(), location));
        let mut hops = 0;
        while let Some((reference, location)) = next.take() {
            match self.attempt(&reference, &location).await {
                Ok(acquired) => return Some(acquired),
                Err(err) => {
                    match &err {
                        TintError::Timeout { .. } => warn!(%reference, "{err}"),
                        _ => error!(%reference, "{err}"),
                    }
                    if hops >= MAX_FALLBACK_HOPS {
                        break;
                    }
                    hops += 1;
                    next = self.fallback_attempt();
                }
            }
        }

        None
    }

    async fn attempt(&self, reference: &str, location: &str) -> Result<Acquired> {
        if location.is_empty() {
            return Err(TintError::Decode {
                location: location.to_string(),
                message: "empty image path".to_string(),
            });
        }

        let image =
            match tokio::time::timeout(self.options.timeout, self.source.load(location)).await {
                Ok(Ok(image)) => image,
                Ok(Err(err)) => return Err(err),
                // the racing load future is dropped here, so a late
                // completion has nothing left to resolve
                Err(_) => {
                    return Err(TintError::Timeout {
                        location: location.to_string(),
                        after: self.options.timeout,
                    })
                }
            };

        let palette = self.extractor.extract(&image, self.options.samples)?;
        let average = palette.average_luminance();
        let polarity = TextPolarity::from_average_luminance(average);

        let colours = synthesize(palette.base, average);
        self.sink.apply(&colours);
        info!(
            reference,
            light_text = polarity.is_light(),
            "background theme applied"
        );

        Ok(Acquired {
            reference: reference.to_string(),
            light_text: polarity.is_light(),
            colours,
        })
    }

    fn fallback_attempt(&self) -> Option<(String, String)> {
        let fallback = match self.options.fallback.as_deref() {
            Some(fallback) => fallback,
            None => {
                info!("no fallback background configured");
                return None;
            }
        };
        match parse_reference(fallback) {
            Ok(location) if !location.is_empty() => {
                info!(fallback, "falling back to default background");
                Some((fallback.to_string(), location.to_string()))
            }
            _ => {
                warn!(fallback, "configured fallback is not a usable image reference");
                None
            }
        }
    }
}

/// Clears the loading flag when an acquisition ends, however it ends.
struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Pull the inner path out of a `url("...")` wrapper.
///
/// Quotes are optional and whitespace inside the wrapper is trimmed.
/// Anything not wrapped is not an image reference.
fn parse_reference(reference: &str) -> Result<&str> {
    let inner = reference
        .trim()
        .strip_prefix("url(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| TintError::InvalidReference {
            reference: reference.to_string(),
        })?;
    Ok(trim_quotes(inner.trim()))
}

fn trim_quotes(inner: &str) -> &str {
    inner
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .or_else(|| {
            inner
                .strip_prefix('\'')
                .and_then(|rest| rest.strip_suffix('\''))
        })
        .unwrap_or(inner)
}
