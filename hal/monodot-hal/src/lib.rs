//! monodot Hardware Abstraction Layer
//!
//! This crate defines the bus traits the display driver talks through.
//! Any `embedded-hal` 1.0 I2C master can be used directly; board support
//! code only has to hand one over.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  monodot-display (framebuffer, raster)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  monodot-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embedded-hal I2C implementation (MCU)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus write operations

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::I2cBus;
