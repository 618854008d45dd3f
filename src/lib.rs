//! DS620 Rust Driver
//!
//! Register-level access to the Maxim DS620 digital thermometer/thermostat over I2C,
//! plus decoding of its fixed-point temperature format and configuration bitfield.
//! no-std, blocking by default, optional async and defmt support.
//!
//! ```ignore
//! use ds620_rs::{Ds620, SensorAddress};
//!
//! let mut sensor = Ds620::new(i2c, SensorAddress::new(0b001)?);
//! let temp = sensor.temperature()?;
//! let whole = temp.to_decimal();
//! ```

#![no_std]

pub mod data_types;
pub mod driver;
pub mod error;
pub mod registers;

pub use data_types::{Configuration, SensorAddress, Temperature};
pub use driver::Ds620;
pub use error::Error;
