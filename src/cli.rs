//! Command-line interface for deriving themes.
//!
//! Emits the derived theme on stdout; logs and diagnostics go to stderr.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use miette::{miette, IntoDiagnostic};

use crate::acquire::{AcquireOptions, FsImageSource, ThemeAcquirer, DEFAULT_BACKGROUND};
use crate::extract::DEFAULT_SAMPLE_COUNT;
use crate::sink::{CssVariableSink, NullSink, ThemeSink};

/// tint - Adaptive UI theme derivation
#[derive(Parser, Debug)]
#[command(name = "tint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Background image reference: a bare path or a url("...") wrapper
    pub reference: String,

    /// Directory that image locations resolve inside
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Fallback reference tried when the requested one fails
    #[arg(long, default_value = DEFAULT_BACKGROUND)]
    pub fallback: String,

    /// Disable the fallback hop
    #[arg(long)]
    pub no_fallback: bool,

    /// Palette samples to request per image
    #[arg(long, default_value_t = DEFAULT_SAMPLE_COUNT)]
    pub samples: usize,

    /// Load deadline in seconds
    #[arg(long, default_value_t = 15)]
    pub timeout: u64,

    /// Print the theme as JSON instead of CSS custom properties
    #[arg(long)]
    pub json: bool,
}

pub async fn run(cli: Cli) -> miette::Result<()> {
    let reference = wrap_reference(&cli.reference);
    let fallback = (!cli.no_fallback).then(|| wrap_reference(&cli.fallback));

    let options = AcquireOptions {
        timeout: Duration::from_secs(cli.timeout),
        samples: cli.samples,
        fallback,
    };

    let sink: Arc<dyn ThemeSink> = if cli.json {
        Arc::new(NullSink)
    } else {
        Arc::new(CssVariableSink::new(io::stdout()))
    };
    let acquirer = ThemeAcquirer::new(Arc::new(FsImageSource::new(cli.root)), sink)
        .with_options(options);

    let Some(acquired) = acquirer.acquire(&reference).await else {
        return Err(miette!(
            "no theme could be derived from {}",
            cli.reference
        ));
    };

    if cli.json {
        let rendered = serde_json::to_string_pretty(&acquired.colours).into_diagnostic()?;
        println!("{rendered}");
    }

    Ok(())
}

/// Accept bare paths by wrapping them the way a stylesheet would.
fn wrap_reference(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("url(") {
        trimmed.to_string()
    } else {
        format!("url(\"{trimmed}\")")
    }
}
