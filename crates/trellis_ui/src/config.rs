//! UI configuration.
//!
//! ```toml
//! draw_on_demand = true
//! input_enabled = true
//! viewport_width = 1280
//! viewport_height = 720
//! glyph_range = [32, 255]
//!
//! [default_font]
//! name = "Tahoma"
//! size = 11
//! flags = "BOLD"
//! charset = "ansi"
//! ```

use std::ops::RangeInclusive;
use std::path::Path;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::element::FontDesc;
use crate::error::{UiError, UiResult};

bitflags! {
    /// Initialisation parameters.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InitParams: u32 {
        /// Render only when something requested a redraw.
        const DRAW_ON_DEMAND = 1 << 0;
        /// Ignore platform input; the UI is only drawn.
        const WITHOUT_INPUT = 1 << 1;
    }
}

/// Configuration of a [`crate::Ui`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Render only after a redraw request instead of every frame.
    pub draw_on_demand: bool,
    /// Whether platform input is dispatched.
    pub input_enabled: bool,
    /// Initial viewport width in pixels.
    pub viewport_width: u32,
    /// Initial viewport height in pixels.
    pub viewport_height: u32,
    /// Font used by newly created elements.
    pub default_font: FontDesc,
    /// Advisory glyph range passed to the backend when loading fonts.
    pub glyph_range: [u32; 2],
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            draw_on_demand: true,
            input_enabled: true,
            viewport_width: 800,
            viewport_height: 600,
            default_font: FontDesc::default(),
            glyph_range: [32, 255],
        }
    }
}

impl UiConfig {
    /// Parses a configuration from TOML text. Missing keys use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ConfigParse`] on malformed TOML and
    /// [`UiError::InvalidConfig`] on an inverted glyph range.
    pub fn from_toml_str(text: &str) -> UiResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ConfigRead`] if the file can't be read, otherwise
    /// whatever [`UiConfig::from_toml_str`] returns.
    pub fn load(path: impl AsRef<Path>) -> UiResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| UiError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Builds a default configuration from an init parameter bitmask.
    #[must_use]
    pub fn with_params(params: InitParams) -> Self {
        Self {
            draw_on_demand: params.contains(InitParams::DRAW_ON_DEMAND),
            input_enabled: !params.contains(InitParams::WITHOUT_INPUT),
            ..Self::default()
        }
    }

    /// Returns the init parameter bitmask this configuration implies.
    #[must_use]
    pub fn params(&self) -> InitParams {
        let mut params = InitParams::empty();
        params.set(InitParams::DRAW_ON_DEMAND, self.draw_on_demand);
        params.set(InitParams::WITHOUT_INPUT, !self.input_enabled);
        params
    }

    /// Glyph range as passed to [`crate::render::Renderer::load_font`].
    #[must_use]
    pub fn glyphs(&self) -> RangeInclusive<u32> {
        self.glyph_range[0]..=self.glyph_range[1]
    }

    fn validate(&self) -> UiResult<()> {
        if self.glyph_range[0] > self.glyph_range[1] {
            return Err(UiError::InvalidConfig(format!(
                "glyph range {}..={} is empty",
                self.glyph_range[0], self.glyph_range[1]
            )));
        }
        Ok(())
    }
}
