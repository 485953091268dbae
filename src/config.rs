//////////////////////////////////////////////////
// Using

use log::LevelFilter;

use crate::error::{Result, SquareError};

//////////////////////////////////////////////////
// Const

pub const DEFAULT_TITLE: &str = "OpenGL Square";
pub const DEFAULT_TRANSLATION_STEP: f32 = 0.075;

pub const ENV_TRANSLUCENT: &str = "SQUARE_GL_TRANSLUCENT";
pub const ENV_STEP: &str = "SQUARE_GL_STEP";

//////////////////////////////////////////////////
// Definitions

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub title: String,
    /// Clear to transparent black instead of opaque white.
    pub translucent_background: bool,
    pub vsync: bool,
    /// Phase added to the vertical oscillation after every frame.
    pub translation_step: f32,
    pub log_level: LevelFilter,
    pub gles_version: (u8, u8),
}

//////////////////////////////////////////////////
// Android

#[cfg(target_os = "android")]
impl Default for Config {
    fn default() -> Self {
        Config {
            title: DEFAULT_TITLE.to_owned(),
            translucent_background: true,
            vsync: true,
            translation_step: DEFAULT_TRANSLATION_STEP,
            log_level: LevelFilter::Trace,
            gles_version: (1, 1),
        }
    }
}

//////////////////////////////////////////////////
// Desktop

#[cfg(not(target_os = "android"))]
impl Default for Config {
    fn default() -> Self {
        Config {
            title: DEFAULT_TITLE.to_owned(),
            translucent_background: true,
            vsync: true,
            translation_step: DEFAULT_TRANSLATION_STEP,
            log_level: LevelFilter::Info,
            gles_version: (1, 1),
        }
    }
}

//////////////////////////////////////////////////
// Implementation

impl Config {
    pub fn new() -> Self {
        Default::default()
    }

    /// Default config with overrides taken from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(value) = lookup(ENV_TRANSLUCENT) {
            self.translucent_background = parse_flag(&value).ok_or(SquareError::InvalidEnv { key: ENV_TRANSLUCENT, value })?;
        }
        if let Some(value) = lookup(ENV_STEP) {
            self.translation_step = value
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|step| step.is_finite())
                .ok_or(SquareError::InvalidEnv { key: ENV_STEP, value })?;
        }
        Ok(self)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_translucent_background(mut self, translucent_background: bool) -> Self {
        self.translucent_background = translucent_background;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_translation_step(mut self, translation_step: f32) -> Self {
        self.translation_step = translation_step;
        self
    }

    pub fn with_log_level(mut self, log_level: LevelFilter) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn with_gles_version(mut self, major: u8, minor: u8) -> Self {
        self.gles_version = (major, minor);
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

//////////////////////////////////////////////////
// Tests
