//! Driver for SSD1306-class monochrome OLED displays
//!
//! This crate provides:
//! - `FrameBuffer`: the 1-bpp pixel cache in the controller's paged layout
//! - `Rasterizer`: pixels, Bresenham lines, rectangles, text and bitmaps
//! - `Cursor`: the text write position with row wrapping
//! - `DisplayController`: initialization, display modes and flushing
//!
//! # Architecture
//!
//! Drawing only ever touches the in-memory frame buffer. Nothing reaches
//! the display until [`DisplayController::flush`] pushes the whole buffer
//! through a [`DisplayTransport`]. [`I2cTransport`] implements the
//! transport over any bus from `monodot-hal`.
//!
//! ## Memory layout
//!
//! ```text
//!          x = 0    x = 1         x = width-1
//! page 0 ┌────────┬────────┬ ─ ─ ┬────────┐  rows 0..=7, bit 0 on top
//! page 1 ├────────┼────────┼ ─ ─ ┼────────┤  rows 8..=15
//!   ...  │        │        │     │        │
//! ```
//!
//! The byte for column `x` of page `p` lives at `x + p * width`.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod bitmap;
pub mod config;
pub mod controller;
pub mod cursor;
pub mod font;
pub mod framebuffer;
pub mod interface;
pub mod raster;

#[cfg(feature = "graphics")]
mod graphics;

// Re-export key types
pub use backend::{DisplayError, DisplayTransport, DrawError};
pub use bitmap::Bitmap;
pub use config::{DisplayConfig, Geometry};
pub use controller::DisplayController;
pub use cursor::Cursor;
pub use font::{Font, FONT_5X8};
pub use framebuffer::FrameBuffer;
pub use interface::I2cTransport;
pub use raster::Rasterizer;
