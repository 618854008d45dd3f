//! Register access layer for DS620.
//! Blocking I2C helpers; the async version mirrors this API behind the `async` feature.
//!
//! 16-bit registers are transferred as two single-byte transactions (MSB at `reg`, LSB at
//! `reg + 1`). Nothing guards against the device updating the pair between the two transfers,
//! so a temperature read during an active conversion can be torn.

use crate::data_types::{Configuration, ConversionMode, Resolution, SensorAddress, Temperature, UserRegister};
use crate::error::Error;
use crate::registers::{addr, cmd, ConfigBits};

/// DS620 driver bound to one sensor address on the bus.
pub struct Ds620<I2C> {
    i2c: I2C,
    address: SensorAddress,
}

impl<I2C> Ds620<I2C> {
    /// Create a new driver instance for the sensor strapped at `address`.
    pub fn new(i2c: I2C, address: SensorAddress) -> Self {
        Self { i2c, address }
    }

    /// Sensor address used for every transaction.
    pub fn address(&self) -> SensorAddress {
        self.address
    }

    /// Target another sensor on the same bus.
    pub fn set_address(&mut self, address: SensorAddress) {
        self.address = address;
    }

    /// Release the underlying bus.
    pub fn free(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Ds620<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Write a single register (SRAM only; see [`Self::copy_data`]).
    pub fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address.i2c_address(), &[reg, value])
            .map_err(Error::I2c)
    }

    /// Read a single register.
    pub fn read_reg(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address.i2c_address(), &[reg], &mut buf)
            .map_err(Error::I2c)?;
        Ok(buf[0])
    }

    /// Read two adjacent registers as a big-endian 16-bit value.
    pub fn read_reg16(&mut self, reg: u8) -> Result<u16, Error<I2C::Error>> {
        let msb = self.read_reg(reg)?;
        let lsb = self.read_reg(reg.wrapping_add(1))?;
        Ok(u16::from_be_bytes([msb, lsb]))
    }

    /// Write two adjacent registers, MSB first.
    pub fn write_reg16(&mut self, reg: u8, value: u16) -> Result<(), Error<I2C::Error>> {
        let [msb, lsb] = value.to_be_bytes();
        self.write_reg(reg, msb)?;
        self.write_reg(reg.wrapping_add(1), lsb)
    }

    fn command(&mut self, command: u8) -> Result<(), Error<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("ds620 {=u8}: command {=u8:#x}", self.address.id(), command);
        self.i2c
            .write(self.address.i2c_address(), &[command])
            .map_err(Error::I2c)
    }

    /// Copy SRAM shadow registers to EEPROM.
    ///
    /// The device runs a conversion in continuous mode while copying and leaves conversion
    /// stopped afterwards; restart it if needed. Completion is reported by the NVB flag,
    /// which this call does not wait for.
    pub fn copy_data(&mut self) -> Result<(), Error<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("ds620 {=u8}: copy SRAM to EEPROM", self.address.id());
        self.command(cmd::COPY_DATA)
    }

    /// Reload SRAM shadow registers from EEPROM.
    pub fn recall_data(&mut self) -> Result<(), Error<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("ds620 {=u8}: recall EEPROM to SRAM", self.address.id());
        self.command(cmd::RECALL_DATA)
    }

    /// One-shot mode: single conversion. Continuous mode: start periodic conversion.
    pub fn start_conversion(&mut self) -> Result<(), Error<I2C::Error>> {
        self.command(cmd::START_CONVERT)
    }

    /// Stop periodic conversion (continuous mode only).
    pub fn stop_conversion(&mut self) -> Result<(), Error<I2C::Error>> {
        self.command(cmd::STOP_CONVERT)
    }

    /// Read the last conversion result.
    pub fn temperature(&mut self) -> Result<Temperature, Error<I2C::Error>> {
        self.read_reg16(addr::TEMP_MSB).map(Temperature)
    }

    pub fn configuration(&mut self) -> Result<Configuration, Error<I2C::Error>> {
        self.read_reg16(addr::CONFIG_MSB).map(Configuration)
    }

    /// Write the configuration register. Not persisted until [`Self::copy_data`].
    pub fn set_configuration(&mut self, config: Configuration) -> Result<(), Error<I2C::Error>> {
        self.write_reg16(addr::CONFIG_MSB, config.raw())
    }

    /// Read-modify-write of the 1SHOT bit.
    pub fn set_conversion_mode(&mut self, mode: ConversionMode) -> Result<(), Error<I2C::Error>> {
        let mut config = self.configuration()?;
        config.set_conversion_mode(mode);
        self.set_configuration(config)
    }

    /// Read-modify-write of R1:R0.
    pub fn set_resolution(&mut self, resolution: Resolution) -> Result<(), Error<I2C::Error>> {
        let mut config = self.configuration()?;
        config.set_resolution(resolution);
        self.set_configuration(config)
    }

    /// Single read of the DONE flag; no polling.
    pub fn is_conversion_done(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.configuration()?.flags().contains(ConfigBits::DONE))
    }

    /// Single read of the NVB flag; no polling.
    pub fn is_nv_busy(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.configuration()?.flags().contains(ConfigBits::NVB))
    }

    pub fn high_trip(&mut self) -> Result<Temperature, Error<I2C::Error>> {
        self.read_reg16(addr::TH_MSB).map(Temperature)
    }

    pub fn set_high_trip(&mut self, trip: Temperature) -> Result<(), Error<I2C::Error>> {
        self.write_reg16(addr::TH_MSB, trip.raw())
    }

    pub fn low_trip(&mut self) -> Result<Temperature, Error<I2C::Error>> {
        self.read_reg16(addr::TL_MSB).map(Temperature)
    }

    pub fn set_low_trip(&mut self, trip: Temperature) -> Result<(), Error<I2C::Error>> {
        self.write_reg16(addr::TL_MSB, trip.raw())
    }

    pub fn read_user(&mut self, reg: UserRegister) -> Result<u8, Error<I2C::Error>> {
        self.read_reg(reg.addr())
    }

    pub fn write_user(&mut self, reg: UserRegister, value: u8) -> Result<(), Error<I2C::Error>> {
        self.write_reg(reg.addr(), value)
    }
}

#[cfg(feature = "async")]
impl<I2C> Ds620<I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    pub async fn write_reg_async(&mut self, reg: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address.i2c_address(), &[reg, value])
            .await
            .map_err(Error::I2c)
    }

    pub async fn read_reg_async(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address.i2c_address(), &[reg], &mut buf)
            .await
            .map_err(Error::I2c)?;
        Ok(buf[0])
    }

    pub async fn read_reg16_async(&mut self, reg: u8) -> Result<u16, Error<I2C::Error>> {
        let msb = self.read_reg_async(reg).await?;
        let lsb = self.read_reg_async(reg.wrapping_add(1)).await?;
        Ok(u16::from_be_bytes([msb, lsb]))
    }

    pub async fn write_reg16_async(&mut self, reg: u8, value: u16) -> Result<(), Error<I2C::Error>> {
        let [msb, lsb] = value.to_be_bytes();
        self.write_reg_async(reg, msb).await?;
        self.write_reg_async(reg.wrapping_add(1), lsb).await
    }

    async fn command_async(&mut self, command: u8) -> Result<(), Error<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("ds620 {=u8}: command {=u8:#x}", self.address.id(), command);
        self.i2c
            .write(self.address.i2c_address(), &[command])
            .await
            .map_err(Error::I2c)
    }

    pub async fn copy_data_async(&mut self) -> Result<(), Error<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("ds620 {=u8}: copy SRAM to EEPROM", self.address.id());
        self.command_async(cmd::COPY_DATA).await
    }

    pub async fn recall_data_async(&mut self) -> Result<(), Error<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("ds620 {=u8}: recall EEPROM to SRAM", self.address.id());
        self.command_async(cmd::RECALL_DATA).await
    }

    pub async fn start_conversion_async(&mut self) -> Result<(), Error<I2C::Error>> {
        self.command_async(cmd::START_CONVERT).await
    }

    pub async fn stop_conversion_async(&mut self) -> Result<(), Error<I2C::Error>> {
        self.command_async(cmd::STOP_CONVERT).await
    }

    pub async fn temperature_async(&mut self) -> Result<Temperature, Error<I2C::Error>> {
        self.read_reg16_async(addr::TEMP_MSB).await.map(Temperature)
    }

    pub async fn configuration_async(&mut self) -> Result<Configuration, Error<I2C::Error>> {
        self.read_reg16_async(addr::CONFIG_MSB).await.map(Configuration)
    }

    pub async fn set_configuration_async(&mut self, config: Configuration) -> Result<(), Error<I2C::Error>> {
        self.write_reg16_async(addr::CONFIG_MSB, config.raw()).await
    }

    pub async fn set_conversion_mode_async(&mut self, mode: ConversionMode) -> Result<(), Error<I2C::Error>> {
        let mut config = self.configuration_async().await?;
        config.set_conversion_mode(mode);
        self.set_configuration_async(config).await
    }

    pub async fn set_resolution_async(&mut self, resolution: Resolution) -> Result<(), Error<I2C::Error>> {
        let mut config = self.configuration_async().await?;
        config.set_resolution(resolution);
        self.set_configuration_async(config).await
    }

    pub async fn is_conversion_done_async(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.configuration_async().await?.flags().contains(ConfigBits::DONE))
    }

    pub async fn is_nv_busy_async(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.configuration_async().await?.flags().contains(ConfigBits::NVB))
    }

    pub async fn high_trip_async(&mut self) -> Result<Temperature, Error<I2C::Error>> {
        self.read_reg16_async(addr::TH_MSB).await.map(Temperature)
    }

    pub async fn set_high_trip_async(&mut self, trip: Temperature) -> Result<(), Error<I2C::Error>> {
        self.write_reg16_async(addr::TH_MSB, trip.raw()).await
    }

    pub async fn low_trip_async(&mut self) -> Result<Temperature, Error<I2C::Error>> {
        self.read_reg16_async(addr::TL_MSB).await.map(Temperature)
    }

    pub async fn set_low_trip_async(&mut self, trip: Temperature) -> Result<(), Error<I2C::Error>> {
        self.write_reg16_async(addr::TL_MSB, trip.raw()).await
    }

    pub async fn read_user_async(&mut self, reg: UserRegister) -> Result<u8, Error<I2C::Error>> {
        self.read_reg_async(reg.addr()).await
    }

    pub async fn write_user_async(&mut self, reg: UserRegister, value: u8) -> Result<(), Error<I2C::Error>> {
        self.write_reg_async(reg.addr(), value).await
    }
}
