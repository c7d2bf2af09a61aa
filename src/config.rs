use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::carousel::{Align, SlideBasis};
use crate::error::Error;

/// Options fixed when the carousel engine is constructed.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct CarouselOptions {
    /// Anchor of the active slide inside the viewport.
    pub align: Align,
    /// Wrap around at either end instead of stopping.
    #[serde(rename = "loop")]
    pub loop_enabled: bool,
    /// Width of each slide relative to the viewport.
    pub slide_basis: SlideBasis,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            align: Align::Start,
            loop_enabled: false,
            slide_basis: SlideBasis::Full,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct AutoplayOptions {
    pub enabled: bool,
    /// How long each slide stays on screen before advancing.
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    /// Restart the dwell timer after a manual navigation.
    pub reset_on_interaction: bool,
}

impl AutoplayOptions {
    const fn default_interval() -> Duration {
        Duration::from_secs(5)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            !self.enabled || !self.interval.is_zero(),
            "autoplay.interval must be positive when autoplay is enabled"
        );
        Ok(())
    }
}

impl Default for AutoplayOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            interval: Self::default_interval(),
            reset_on_interaction: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Configuration {
    /// Banner feed (JSON) to load slides from.
    pub feed_path: Option<PathBuf>,
    /// Container width used until the first resize.
    pub viewport_width: f32,
    /// Engine options.
    pub carousel: CarouselOptions,
    /// How long a slide transition takes before it settles.
    #[serde(with = "humantime_serde")]
    pub transition_duration: Duration,
    /// Automatic advance.
    pub autoplay: AutoplayOptions,
}

impl Configuration {
    /// Parse a YAML file. Defaults fill in anything the file leaves out;
    /// call [`Configuration::validated`] afterwards.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = File::open(path)?;
        let cfg = serde_yaml::from_reader(BufReader::new(file))?;
        Ok(cfg)
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(
            self.viewport_width.is_finite() && self.viewport_width >= 0.0,
            "viewport-width must be a non-negative number"
        );
        ensure!(
            self.carousel.slide_basis.is_valid(),
            "carousel.slide-basis must be positive, got {}",
            self.carousel.slide_basis
        );
        if let Some(path) = &self.feed_path {
            ensure!(
                !path.as_os_str().is_empty(),
                "feed-path must not be empty"
            );
        }
        self.autoplay
            .validate()
            .context("invalid autoplay configuration")?;
        Ok(self)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            feed_path: None,
            viewport_width: 1280.0,
            carousel: CarouselOptions::default(),
            transition_duration: Duration::from_millis(300),
            autoplay: AutoplayOptions::default(),
        }
    }
}
