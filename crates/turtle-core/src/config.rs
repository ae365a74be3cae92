//! Host configuration
//!
//! Stored as RON:
//!
//! ```ron
//! (
//!     surface: (width: 650.0, height: 400.0),
//!     policy: Clamped,
//!     clamp: MinRatio,
//!     icon: Some("assets/turtle.gif"),
//! )
//! ```
//!
//! Every field is optional and falls back to its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH};
use crate::session::Session;
use crate::surface::Canvas;
use crate::turtle::{ClampAlgorithm, MovementPolicy, Turtle};

/// Size of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
        }
    }
}

/// Everything a host needs to set up a turtle session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurtleConfig {
    /// Drawing surface extents
    pub surface: SurfaceConfig,
    /// Default movement policy of the turtle
    pub policy: MovementPolicy,
    /// Clamping algorithm for the clamped policy
    pub clamp: ClampAlgorithm,
    /// Turtle icon image handed to the surface
    pub icon: Option<PathBuf>,
}

impl TurtleConfig {
    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Parse and validate a configuration from RON text
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: TurtleConfig =
            ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the surface has a usable size
    pub fn validate(&self) -> Result<(), ConfigError> {
        let SurfaceConfig { width, height } = self.surface;
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "surface must have a positive finite size, got {}x{}",
                width, height
            )));
        }
        Ok(())
    }

    /// Build a blank canvas, with the icon attached when one is configured
    pub fn build_canvas(&self) -> Canvas {
        let canvas = Canvas::new(self.surface.width, self.surface.height);
        match &self.icon {
            Some(icon) => canvas.with_icon(icon),
            None => canvas,
        }
    }

    /// Build a turtle on a fresh canvas
    pub fn build_turtle(&self) -> Turtle<Canvas> {
        Turtle::new(self.build_canvas())
            .with_policy(self.policy)
            .with_clamp(self.clamp)
    }

    /// Build a session on a fresh canvas
    pub fn build_session(&self) -> Session {
        tracing::debug!(
            "New session: {}x{} surface, {:?} policy, {:?} clamp",
            self.surface.width,
            self.surface.height,
            self.policy,
            self.clamp
        );
        Session::new(self.build_turtle())
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
