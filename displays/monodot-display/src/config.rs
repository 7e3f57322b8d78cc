//! Display configuration
//!
//! Geometry and panel settings for SSD1306-class controllers, and the
//! initialization command table derived from them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// SSD1306 commands
#[allow(dead_code)]
pub(crate) mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const RESUME_RAM: u8 = 0xA4;
    pub const IGNORE_RAM: u8 = 0xA5;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_SEG_REMAP: u8 = 0xA0;
    pub const SET_COM_SCAN_INC: u8 = 0xC0;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_VCOM_DESELECT: u8 = 0xDB;

    /// Horizontal addressing: column pointer wraps into the next page
    pub const MEMORY_MODE_HORIZONTAL: u8 = 0x00;
    /// Internal charge pump enabled during display on
    pub const CHARGE_PUMP_ON: u8 = 0x14;
    /// Divide ratio 1, default oscillator frequency
    pub const CLOCK_DIV_DEFAULT: u8 = 0x80;
}

/// Largest supported width in pixels (SSD1306 segment count)
pub const MAX_WIDTH: u16 = 128;

/// Largest supported number of 8-row pages (SSD1306 COM count / 8)
pub const MAX_PAGES: u8 = 8;

/// Frame buffer capacity in bytes
pub const MAX_BUFFER_LEN: usize = MAX_WIDTH as usize * MAX_PAGES as usize;

/// Number of bytes in the initialization command table
pub const INIT_SEQUENCE_LEN: usize = 31;

/// Pixel geometry of a display
///
/// The controller addresses memory in pages of 8 vertically stacked pixels,
/// so the height is always a multiple of 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Geometry {
    /// Width in pixels (1-128)
    pub width: u16,
    /// Number of 8-row pages (1-8)
    pub page_count: u8,
}

impl Geometry {
    /// 128x64 panel
    pub const W128_H64: Self = Self::new(128, 8);

    /// 128x32 panel
    pub const W128_H32: Self = Self::new(128, 4);

    /// Create a geometry
    pub const fn new(width: u16, page_count: u8) -> Self {
        Self { width, page_count }
    }

    /// Height in pixels
    pub const fn height(&self) -> u16 {
        self.page_count as u16 * 8
    }

    /// Index of the last page
    pub const fn last_page(&self) -> u8 {
        self.page_count.saturating_sub(1)
    }

    /// Frame buffer size in bytes
    pub const fn buffer_len(&self) -> usize {
        self.width as usize * self.page_count as usize
    }

    /// Check the geometry fits the controller and the frame buffer
    pub const fn is_valid(&self) -> bool {
        self.width > 0
            && self.width <= MAX_WIDTH
            && self.page_count > 0
            && self.page_count <= MAX_PAGES
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::W128_H64
    }
}

/// Display panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Pixel geometry
    pub geometry: Geometry,
    /// 7-bit I2C address (0x3C or 0x3D)
    pub address: u8,
    /// Contrast (0-255, reset value 0x7F)
    pub contrast: u8,
    /// Pre-charge periods (phase 2 in the high nibble, phase 1 in the low)
    pub precharge: u8,
    /// VCOMH deselect level
    pub vcom_deselect: u8,
    /// COM pins hardware configuration (0x12 alternative, 0x02 sequential)
    pub com_pins: u8,
    /// Map column 127 to SEG0 (mirror horizontally)
    pub segment_remap: bool,
    /// Scan from COM[N-1] to COM0 (mirror vertically)
    pub com_scan_reversed: bool,
}

impl DisplayConfig {
    /// 128x64 SSD1306 module
    pub const SSD1306_128X64: Self = Self {
        geometry: Geometry::W128_H64,
        address: 0x3C,
        contrast: 0x7F,
        precharge: 0xC2,
        vcom_deselect: 0x20,
        com_pins: 0x12,
        segment_remap: true,
        com_scan_reversed: true,
    };

    /// 128x32 SSD1306 module
    pub const SSD1306_128X32: Self = Self {
        geometry: Geometry::W128_H32,
        com_pins: 0x02,
        ..Self::SSD1306_128X64
    };

    /// Build the initialization command table
    ///
    /// Every byte, arguments included, is sent as its own command.
    pub fn init_sequence(&self) -> [u8; INIT_SEQUENCE_LEN] {
        let g = &self.geometry;
        // Clamped; invalid geometry never reaches the bus
        let last_column = g.width.saturating_sub(1).min(u8::MAX as u16) as u8;
        let mux_ratio = g.height().saturating_sub(1).min(u8::MAX as u16) as u8;

        [
            cmd::DISPLAY_OFF,
            cmd::SET_MUX_RATIO,
            mux_ratio,
            cmd::SET_MEMORY_MODE,
            cmd::MEMORY_MODE_HORIZONTAL,
            cmd::SET_COLUMN_ADDR,
            0,
            last_column,
            cmd::SET_PAGE_ADDR,
            0,
            g.last_page(),
            cmd::SET_START_LINE,
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_SEG_REMAP | self.segment_remap as u8,
            if self.com_scan_reversed {
                cmd::SET_COM_SCAN_DEC
            } else {
                cmd::SET_COM_SCAN_INC
            },
            cmd::SET_COM_PINS,
            self.com_pins,
            cmd::SET_CONTRAST,
            self.contrast,
            cmd::RESUME_RAM,
            cmd::SET_NORMAL,
            cmd::SET_CLOCK_DIV,
            cmd::CLOCK_DIV_DEFAULT,
            cmd::SET_PRECHARGE,
            self.precharge,
            cmd::SET_VCOM_DESELECT,
            self.vcom_deselect,
            cmd::SET_CHARGE_PUMP,
            cmd::CHARGE_PUMP_ON,
            cmd::DISPLAY_ON,
        ]
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::SSD1306_128X64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_presets() {
        let g = Geometry::W128_H64;
        assert_eq!(g.height(), 64);
        assert_eq!(g.last_page(), 7);
        assert_eq!(g.buffer_len(), 1024);
        assert!(g.is_valid());

        let g = Geometry::W128_H32;
        assert_eq!(g.height(), 32);
        assert_eq!(g.last_page(), 3);
        assert_eq!(g.buffer_len(), 512);
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(!Geometry::new(0, 8).is_valid());
        assert!(!Geometry::new(129, 8).is_valid());
        assert!(!Geometry::new(128, 0).is_valid());
        assert!(!Geometry::new(128, 9).is_valid());
        assert!(Geometry::new(64, 6).is_valid());
    }

    #[test]
    fn test_init_sequence_128x64() {
        let seq = DisplayConfig::SSD1306_128X64.init_sequence();

        assert_eq!(seq[0], cmd::DISPLAY_OFF);
        assert_eq!(&seq[1..3], &[cmd::SET_MUX_RATIO, 63]);
        assert_eq!(&seq[5..8], &[cmd::SET_COLUMN_ADDR, 0, 127]);
        assert_eq!(&seq[8..11], &[cmd::SET_PAGE_ADDR, 0, 7]);
        assert_eq!(seq[14], 0xA1);
        assert_eq!(seq[15], 0xC8);
        assert_eq!(&seq[16..18], &[cmd::SET_COM_PINS, 0x12]);
        assert_eq!(&seq[18..20], &[cmd::SET_CONTRAST, 0x7F]);
        assert_eq!(&seq[28..30], &[cmd::SET_CHARGE_PUMP, 0x14]);
        assert_eq!(seq[INIT_SEQUENCE_LEN - 1], cmd::DISPLAY_ON);
    }

    #[test]
    fn test_init_sequence_128x32() {
        let seq = DisplayConfig::SSD1306_128X32.init_sequence();

        assert_eq!(seq[2], 31);
        assert_eq!(seq[10], 3);
        assert_eq!(seq[17], 0x02);
    }

    #[test]
    fn test_init_sequence_unmirrored() {
        let config = DisplayConfig {
            segment_remap: false,
            com_scan_reversed: false,
            ..DisplayConfig::default()
        };
        let seq = config.init_sequence();

        assert_eq!(seq[14], cmd::SET_SEG_REMAP);
        assert_eq!(seq[15], cmd::SET_COM_SCAN_INC);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_from_toml() {
        let config: DisplayConfig = toml::from_str(
            r#"
            address = 61
            contrast = 207

            [geometry]
            width = 128
            page_count = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.geometry, Geometry::W128_H32);
        assert_eq!(config.address, 0x3D);
        assert_eq!(config.contrast, 0xCF);
        // Unspecified fields keep the 128x64 defaults
        assert_eq!(config.precharge, 0xC2);
        assert!(config.segment_remap);
    }
}
