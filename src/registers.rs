//! Register map and constants for DS620.
//! Command bytes and memory locations are copied from the datasheet.

/// 8-bit bus address pattern: fixed `1001` family prefix, then A2..A0 in bits 3..1, then R/W.
pub const BUS_ADDRESS_BASE: u8 = 0b1001_0000;
/// Mask for the pin-strapped sensor identifier.
pub const SENSOR_ID_MASK: u8 = 0b111;

/// Command bytes. Sent as a single-byte write with no register address.
pub mod cmd {
    /// In one-shot mode triggers a single conversion, in continuous mode starts periodic conversion.
    pub const START_CONVERT: u8 = 0x51;
    /// Stop continuous conversion.
    pub const STOP_CONVERT: u8 = 0x22;
    /// Copy EEPROM into SRAM shadow registers.
    pub const RECALL_DATA: u8 = 0xB8;
    /// Copy SRAM shadow registers into EEPROM.
    pub const COPY_DATA: u8 = 0x48;
}

/// Internal memory locations.
pub mod addr {
    /// Thermostat upper trip-point.
    pub const TH_MSB: u8 = 0xA0;
    pub const TH_LSB: u8 = 0xA1;
    /// Thermostat lower trip-point.
    pub const TL_MSB: u8 = 0xA2;
    pub const TL_LSB: u8 = 0xA3;
    /// General purpose user bytes (EEPROM backed).
    pub const USER1: u8 = 0xA4;
    pub const USER2: u8 = 0xA5;
    pub const USER3: u8 = 0xA6;
    pub const USER4: u8 = 0xA7;
    /// Last conversion result.
    pub const TEMP_MSB: u8 = 0xAA;
    pub const TEMP_LSB: u8 = 0xAB;
    /// Configuration register.
    pub const CONFIG_MSB: u8 = 0xAC;
    pub const CONFIG_LSB: u8 = 0xAD;
}

/// Temperature LSB is 1/128 °C; the low 3 bits always read zero.
pub const TEMP_FRACTION_BITS: u32 = 7;
pub const TEMP_FRACTION_MASK: u16 = (1 << TEMP_FRACTION_BITS) - 1;
pub const TEMP_RESERVED_MASK: u16 = 0b111;

/// Operating range used to clamp trip-point settings.
pub const TEMP_MIN_C: i16 = -55;
pub const TEMP_MAX_C: i16 = 125;

bitflags::bitflags! {
    /// Configuration register bits (0xAC/0xAD as one 16-bit value, MSB first on the bus).
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct ConfigBits: u16 {
        /// Bit 0: Conversion finished (read only).
        const DONE    = 1 << 0;
        /// Bit 1: EEPROM write in progress (read only).
        const NVB     = 1 << 1;
        /// Bit 2: Temperature met or exceeded TH. Cleared by the user or reset.
        const THF     = 1 << 2;
        /// Bit 3: Temperature met or fell below TL. Cleared by the user or reset.
        const TLF     = 1 << 3;
        /// Bits 4-5: Conversion resolution (R1 is the high bit of the selector).
        const R1      = 1 << 4;
        const R0      = 1 << 5;
        /// Bit 6: Start converting on power-up.
        const AUTOC   = 1 << 6;
        /// Bit 7: 1 = one-shot, 0 = continuous.
        const ONESHOT = 1 << 7;
        /// Bits 8-9: PO pin thermostat mode (PO2 is the high bit of the selector).
        const PO2     = 1 << 8;
        const PO1     = 1 << 9;
        /// Bits 10-12: Address pin levels (read only).
        const A2      = 1 << 10;
        const A1      = 1 << 11;
        const A0      = 1 << 12;
        /// Bits 13-15: General purpose user bits.
        const USER2   = 1 << 13;
        const USER1   = 1 << 14;
        const USER0   = 1 << 15;
    }
}

/// Compute the 8-bit bus address (R/W bit clear) for a sensor id. Only the low 3 bits are used.
pub fn bus_address(sensor_id: u8) -> u8 {
    BUS_ADDRESS_BASE | ((sensor_id & SENSOR_ID_MASK) << 1)
}

/// Whole degrees of a raw reading, sign extended from the 9-bit integer field.
/// Negative fractions floor toward negative infinity (-0.5 °C gives -1).
pub fn to_decimal(raw: u16) -> i16 {
    ((raw & !TEMP_FRACTION_MASK) as i16) >> TEMP_FRACTION_BITS
}

/// Convert whole degrees to the raw register format. Clamps to the operating range.
pub fn degrees_to_raw(degrees: i16) -> u16 {
    let degrees = degrees.clamp(TEMP_MIN_C, TEMP_MAX_C);
    (degrees << TEMP_FRACTION_BITS) as u16
}

/// Magnitude of the sub-degree part of a raw reading in 1/10000 °C.
pub fn fraction_ten_thousandths(raw: u16) -> u16 {
    let magnitude = (raw as i16).unsigned_abs() as u32;
    let frac = magnitude & TEMP_FRACTION_MASK as u32;
    ((frac * 10_000) >> TEMP_FRACTION_BITS) as u16
}
