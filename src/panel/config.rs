//! # Panel Configuration
//!
//! Board geometries and the settings needed to open a [`Panel`].
//!
//! ## Supported Boards
//!
//! | Preset | Columns | Rows | Notes |
//! |--------|---------|------|-------|
//! | `xy5-7x7` | 7 | 7 | Single module |
//! | `xy5-14x7` | 14 | 7 | Half board |
//! | `xy5-28x7` | 28 | 7 | Standard AlfaZeta XY5 board |
//! | `xy5-56x7` | 56 | 7 | Two boards on one controller |
//! | `xy5-112x7` | 112 | 7 | Four boards on one controller |
//!
//! The column count has to be one the controller has a command for; rows
//! are limited to 8 by the one-byte-per-column payload.
//!
//! ## Config File
//!
//! ```json
//! {
//!   "width": 28,
//!   "height": 7,
//!   "device": "/dev/ttyUSB0",
//!   "baud": 57600,
//!   "address": [1]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Panel;
use crate::error::PanelError;
use crate::protocol::Address;
use crate::transport::serial::DEFAULT_BAUD;

/// # Panel Geometry
///
/// Dot dimensions of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGeometry {
    /// Preset name
    pub name: &'static str,

    /// Columns (one payload byte each)
    pub width: usize,

    /// Rows (bits per payload byte)
    pub height: usize,
}

impl PanelGeometry {
    pub const XY5_7X7: Self = Self {
        name: "xy5-7x7",
        width: 7,
        height: 7,
    };

    pub const XY5_14X7: Self = Self {
        name: "xy5-14x7",
        width: 14,
        height: 7,
    };

    /// The common 28 × 7 board.
    pub const XY5_28X7: Self = Self {
        name: "xy5-28x7",
        width: 28,
        height: 7,
    };

    pub const XY5_56X7: Self = Self {
        name: "xy5-56x7",
        width: 56,
        height: 7,
    };

    pub const XY5_112X7: Self = Self {
        name: "xy5-112x7",
        width: 112,
        height: 7,
    };

    /// All presets, smallest first.
    pub const PRESETS: &'static [Self] = &[
        Self::XY5_7X7,
        Self::XY5_14X7,
        Self::XY5_28X7,
        Self::XY5_56X7,
        Self::XY5_112X7,
    ];

    /// Look up a preset by name.
    pub fn by_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::PRESETS.iter().copied().find(|g| g.name == name)
    }

    /// Parse a preset name or a `WIDTHxHEIGHT` string.
    ///
    /// ```
    /// use flipdot_panel::panel::PanelGeometry;
    ///
    /// assert_eq!(PanelGeometry::parse("xy5-28x7").unwrap().width, 28);
    /// let custom = PanelGeometry::parse("14x5").unwrap();
    /// assert_eq!((custom.width, custom.height), (14, 5));
    /// ```
    pub fn parse(s: &str) -> Result<Self, PanelError> {
        if let Some(geometry) = Self::by_name(s) {
            return Ok(geometry);
        }

        let lower = s.to_lowercase();
        let (w, h) = lower.split_once('x').ok_or_else(|| {
            PanelError::Config(format!(
                "Unknown panel size '{}'. Use a preset name or WIDTHxHEIGHT",
                s
            ))
        })?;
        let width: usize = w
            .trim()
            .parse()
            .map_err(|_| PanelError::Config(format!("Invalid width: {}", w)))?;
        let height: usize = h
            .trim()
            .parse()
            .map_err(|_| PanelError::Config(format!("Invalid height: {}", h)))?;
        if width == 0 || height == 0 {
            return Err(PanelError::InvalidDimensions { width, height });
        }

        Ok(Self {
            name: "custom",
            width,
            height,
        })
    }
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self::XY5_28X7
    }
}

// ============================================================================
// PANEL CONFIG
// ============================================================================

/// Everything needed to open one panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub width: usize,
    pub height: usize,
    /// Serial device path; empty runs the panel in debug mode.
    pub device: String,
    /// Baud rate; zero runs the panel in debug mode.
    pub baud: u32,
    /// Address bytes; empty means broadcast.
    pub address: Address,
}

impl Default for PanelConfig {
    fn default() -> Self {
        let geometry = PanelGeometry::default();
        Self {
            width: geometry.width,
            height: geometry.height,
            device: String::new(),
            baud: DEFAULT_BAUD,
            address: Address::broadcast(),
        }
    }
}

impl PanelConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PanelError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
            .map_err(|e| PanelError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json(text: &str) -> Result<Self, PanelError> {
        serde_json::from_str(text).map_err(|e| PanelError::Config(e.to_string()))
    }

    pub fn with_geometry(self, geometry: PanelGeometry) -> Self {
        Self {
            width: geometry.width,
            height: geometry.height,
            ..self
        }
    }

    /// Open the panel this config describes.
    pub fn open(&self) -> Result<Panel, PanelError> {
        Ok(Panel::new(self.width, self.height, &self.device, self.baud)?
            .with_address(self.address.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_have_supported_widths() {
        use crate::protocol::commands::SUPPORTED_LENGTHS;
        for preset in PanelGeometry::PRESETS {
            assert!(SUPPORTED_LENGTHS.contains(&preset.width), "{}", preset.name);
            assert!(preset.height <= 8);
        }
    }

    #[test]
    fn test_parse_preset_case_insensitive() {
        assert_eq!(
            PanelGeometry::parse("XY5-56x7").unwrap(),
            PanelGeometry::XY5_56X7
        );
    }

    #[test]
    fn test_parse_custom() {
        let g = PanelGeometry::parse("112x8").unwrap();
        assert_eq!((g.width, g.height), (112, 8));
        assert!(PanelGeometry::parse("0x7").is_err());
        assert!(PanelGeometry::parse("28").is_err());
        assert!(PanelGeometry::parse("ax7").is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config = PanelConfig::default();
        assert_eq!((config.width, config.height), (28, 7));
        assert_eq!(config.baud, 57600);
        assert!(config.device.is_empty());
        assert!(config.address.is_broadcast());
    }

    #[test]
    fn test_config_from_json() {
        let config = PanelConfig::from_json(
            r#"{"width": 14, "device": "/dev/ttyUSB1", "address": [2, 3]}"#,
        )
        .unwrap();
        assert_eq!(config.width, 14);
        assert_eq!(config.height, 7);
        assert_eq!(config.device, "/dev/ttyUSB1");
        assert_eq!(config.address, Address::new(vec![2, 3]));
    }

    #[test]
    fn test_config_rejects_bad_json() {
        assert!(matches!(
            PanelConfig::from_json("{\"width\": \"wide\"}"),
            Err(PanelError::Config(_))
        ));
    }

    #[test]
    fn test_open_debug_panel() {
        let panel = PanelConfig::default()
            .with_geometry(PanelGeometry::XY5_7X7)
            .open()
            .unwrap();
        assert!(panel.is_debug());
        assert_eq!(panel.bitmap().width(), 7);
    }
}
