//! Data types for DS620 driver: typed views over raw register values.

use crate::error::Error;
use crate::registers::{
    addr, bus_address, degrees_to_raw, fraction_ten_thousandths, to_decimal, ConfigBits, SENSOR_ID_MASK,
};

/// Pin-strapped sensor identifier (A2..A0), 0-7.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SensorAddress(u8);

impl SensorAddress {
    /// Validate a 3-bit sensor identifier.
    pub fn new<E>(id: u8) -> Result<Self, Error<E>> {
        if id > SENSOR_ID_MASK {
            return Err(Error::OutOfRange);
        }
        Ok(Self(id))
    }

    /// Build from the logic levels strapped on A2, A1 and A0.
    pub const fn from_pins(a2: bool, a1: bool, a0: bool) -> Self {
        Self(((a2 as u8) << 2) | ((a1 as u8) << 1) | a0 as u8)
    }

    pub fn id(&self) -> u8 {
        self.0
    }

    /// 8-bit bus address with the R/W bit clear (`1001 A2 A1 A0 0`).
    pub fn bus_address(&self) -> u8 {
        bus_address(self.0)
    }

    /// 7-bit address as expected by `embedded-hal`.
    pub fn i2c_address(&self) -> u8 {
        self.bus_address() >> 1
    }
}

/// Raw 16-bit temperature: 9-bit two's-complement integer, 4 resolution bits, 3 zero bits.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Temperature(pub u16);

impl Temperature {
    /// Whole degrees at the given value, clamped to the operating range. Used for trip points.
    pub fn from_degrees(degrees: i16) -> Self {
        Self(degrees_to_raw(degrees))
    }

    pub fn raw(&self) -> u16 {
        self.0
    }

    /// Signed whole-degree part (floors for negative readings).
    pub fn to_decimal(&self) -> i16 {
        to_decimal(self.0)
    }

    /// Sub-degree magnitude in 1/10000 °C (0.0625 °C steps at 13-bit resolution).
    pub fn fraction_ten_thousandths(&self) -> u16 {
        fraction_ten_thousandths(self.0)
    }

    pub fn is_negative(&self) -> bool {
        (self.0 as i16) < 0
    }
}

impl core::fmt::Display for Temperature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let magnitude = (self.0 as i16).unsigned_abs();
        let whole = magnitude >> crate::registers::TEMP_FRACTION_BITS;
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}{}.{:04}", sign, whole, self.fraction_ten_thousandths())
    }
}

/// Write a raw reading as a human-readable temperature, e.g. `-10.1250 C`.
pub fn print_temperature<W: core::fmt::Write>(out: &mut W, raw: u16) -> core::fmt::Result {
    write!(out, "{} C", Temperature(raw))
}

/// Conversion mode (1SHOT bit).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConversionMode {
    Continuous,
    OneShot,
}

/// ADC resolution (R1:R0).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Resolution {
    Bits10,
    Bits11,
    Bits12,
    Bits13,
}

impl Resolution {
    /// Maximum conversion time from the datasheet.
    pub fn conversion_time_ms(&self) -> u16 {
        match self {
            Resolution::Bits10 => 25,
            Resolution::Bits11 => 50,
            Resolution::Bits12 => 100,
            Resolution::Bits13 => 200,
        }
    }
}

/// PO pin behaviour (PO2:PO1). See the datasheet PO pin table.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ThermostatMode {
    ForceLow,
    ForceHigh,
    ThermostatHigh,
    ThermostatHighLow,
}

/// EEPROM-backed general purpose bytes.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UserRegister {
    User1,
    User2,
    User3,
    User4,
}

impl UserRegister {
    pub fn addr(&self) -> u8 {
        match self {
            UserRegister::User1 => addr::USER1,
            UserRegister::User2 => addr::USER2,
            UserRegister::User3 => addr::USER3,
            UserRegister::User4 => addr::USER4,
        }
    }
}

/// Configuration register. One 16-bit storage; every field is a mask-and-shift view over it,
/// so writing through `raw` and reading a named flag (or the reverse) always agree.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Configuration(pub u16);

impl Configuration {
    pub fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u16 {
        self.0
    }

    pub fn from_flags(flags: ConfigBits) -> Self {
        Self(flags.bits())
    }

    pub fn flags(&self) -> ConfigBits {
        ConfigBits::from_bits_retain(self.0)
    }

    pub fn conversion_done(&self) -> bool {
        self.flags().contains(ConfigBits::DONE)
    }

    pub fn nv_busy(&self) -> bool {
        self.flags().contains(ConfigBits::NVB)
    }

    pub fn high_trip_flag(&self) -> bool {
        self.flags().contains(ConfigBits::THF)
    }

    pub fn low_trip_flag(&self) -> bool {
        self.flags().contains(ConfigBits::TLF)
    }

    /// Clear THF and TLF. Takes effect once written back to the device.
    pub fn clear_trip_flags(&mut self) {
        self.set_flag(ConfigBits::THF | ConfigBits::TLF, false);
    }

    pub fn resolution(&self) -> Resolution {
        match self.selector(ConfigBits::R1, ConfigBits::R0) {
            0b00 => Resolution::Bits10,
            0b01 => Resolution::Bits11,
            0b10 => Resolution::Bits12,
            _ => Resolution::Bits13,
        }
    }

    pub fn set_resolution(&mut self, resolution: Resolution) {
        let sel = match resolution {
            Resolution::Bits10 => 0b00,
            Resolution::Bits11 => 0b01,
            Resolution::Bits12 => 0b10,
            Resolution::Bits13 => 0b11,
        };
        self.set_selector(ConfigBits::R1, ConfigBits::R0, sel);
    }

    pub fn auto_convert(&self) -> bool {
        self.flags().contains(ConfigBits::AUTOC)
    }

    pub fn set_auto_convert(&mut self, enable: bool) {
        self.set_flag(ConfigBits::AUTOC, enable);
    }

    pub fn conversion_mode(&self) -> ConversionMode {
        if self.flags().contains(ConfigBits::ONESHOT) {
            ConversionMode::OneShot
        } else {
            ConversionMode::Continuous
        }
    }

    pub fn set_conversion_mode(&mut self, mode: ConversionMode) {
        self.set_flag(ConfigBits::ONESHOT, matches!(mode, ConversionMode::OneShot));
    }

    pub fn thermostat_mode(&self) -> ThermostatMode {
        match self.selector(ConfigBits::PO2, ConfigBits::PO1) {
            0b00 => ThermostatMode::ForceLow,
            0b01 => ThermostatMode::ForceHigh,
            0b10 => ThermostatMode::ThermostatHigh,
            _ => ThermostatMode::ThermostatHighLow,
        }
    }

    pub fn set_thermostat_mode(&mut self, mode: ThermostatMode) {
        let sel = match mode {
            ThermostatMode::ForceLow => 0b00,
            ThermostatMode::ForceHigh => 0b01,
            ThermostatMode::ThermostatHigh => 0b10,
            ThermostatMode::ThermostatHighLow => 0b11,
        };
        self.set_selector(ConfigBits::PO2, ConfigBits::PO1, sel);
    }

    /// Levels of A2:A1:A0 as seen by the device (read only).
    pub fn address_pins(&self) -> u8 {
        let flags = self.flags();
        ((flags.contains(ConfigBits::A2) as u8) << 2)
            | ((flags.contains(ConfigBits::A1) as u8) << 1)
            | flags.contains(ConfigBits::A0) as u8
    }

    /// USER2:USER1:USER0 as a 3-bit value.
    pub fn user_bits(&self) -> u8 {
        let flags = self.flags();
        ((flags.contains(ConfigBits::USER2) as u8) << 2)
            | ((flags.contains(ConfigBits::USER1) as u8) << 1)
            | flags.contains(ConfigBits::USER0) as u8
    }

    /// Store a 3-bit value in USER2:USER1:USER0; higher bits are ignored.
    pub fn set_user_bits(&mut self, value: u8) {
        self.set_flag(ConfigBits::USER2, value & 0b100 != 0);
        self.set_flag(ConfigBits::USER1, value & 0b010 != 0);
        self.set_flag(ConfigBits::USER0, value & 0b001 != 0);
    }

    fn set_flag(&mut self, flag: ConfigBits, on: bool) {
        let mut flags = self.flags();
        flags.set(flag, on);
        self.0 = flags.bits();
    }

    fn selector(&self, hi: ConfigBits, lo: ConfigBits) -> u8 {
        let flags = self.flags();
        ((flags.contains(hi) as u8) << 1) | flags.contains(lo) as u8
    }

    fn set_selector(&mut self, hi: ConfigBits, lo: ConfigBits, value: u8) {
        self.set_flag(hi, value & 0b10 != 0);
        self.set_flag(lo, value & 0b01 != 0);
    }
}
