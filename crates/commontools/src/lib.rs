//! commontools — HEX/RGB/HSL color conversion and settings-file loading.

pub mod color;
pub mod error;
pub mod settings;

pub use color::{ColorConverter, ColorOptions, Hsl, Rgb};
pub use error::CommonToolsError;
pub use settings::{Settings, SettingsLoader};
