use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};
use ds620_rs::data_types::{ConversionMode, Resolution, SensorAddress, Temperature, UserRegister};
use ds620_rs::driver::Ds620;
use ds620_rs::Error;

// Sensor 0b001 -> 8-bit 0x92 -> 7-bit 0x49.
const SENSOR: SensorAddress = SensorAddress::from_pins(false, false, true);
const I2C_ADDR: u8 = 0x49;

#[test]
fn temperature_reads_msb_then_lsb() {
    let expectations = [
        I2cTrans::write_read(I2C_ADDR, vec![0xAA], vec![0x01]),
        I2cTrans::write_read(I2C_ADDR, vec![0xAB], vec![0x80]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Ds620::new(mock, SENSOR);
    let temp = driver.temperature().unwrap();
    assert_eq!(temp.raw(), 0x0180);
    assert_eq!(temp.to_decimal(), 3);
    driver.free().done();
}

#[test]
fn write_reg16_splits_msb_first() {
    let expectations = [
        I2cTrans::write(I2C_ADDR, vec![0xA0, 0x12]),
        I2cTrans::write(I2C_ADDR, vec![0xA1, 0x34]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Ds620::new(mock, SENSOR);
    driver.write_reg16(0xA0, 0x1234).unwrap();
    driver.free().done();
}

#[test]
fn reg16_wraps_register_address() {
    let expectations = [
        I2cTrans::write_read(I2C_ADDR, vec![0xFF], vec![0xAB]),
        I2cTrans::write_read(I2C_ADDR, vec![0x00], vec![0xCD]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Ds620::new(mock, SENSOR);
    assert_eq!(driver.read_reg16(0xFF).unwrap(), 0xABCD);
    driver.free().done();
}

#[test]
fn trip_point_write_then_read_back() {
    let trip = Temperature::from_degrees(-10);
    let [msb, lsb] = trip.raw().to_be_bytes();
    let expectations = [
        I2cTrans::write(I2C_ADDR, vec![0xA2, msb]),
        I2cTrans::write(I2C_ADDR, vec![0xA3, lsb]),
        I2cTrans::write_read(I2C_ADDR, vec![0xA2], vec![msb]),
        I2cTrans::write_read(I2C_ADDR, vec![0xA3], vec![lsb]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Ds620::new(mock, SENSOR);
    driver.set_low_trip(trip).unwrap();
    let back = driver.low_trip().unwrap();
    assert_eq!(back, trip);
    assert_eq!(back.to_decimal(), -10);
    driver.free().done();
}

#[test]
fn commands_are_single_bytes() {
    let expectations = [
        I2cTrans::write(I2C_ADDR, vec![0x51]),
        I2cTrans::write(I2C_ADDR, vec![0x22]),
        I2cTrans::write(I2C_ADDR, vec![0x48]),
        I2cTrans::write(I2C_ADDR, vec![0xB8]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Ds620::new(mock, SENSOR);
    driver.start_conversion().unwrap();
    driver.stop_conversion().unwrap();
    driver.copy_data().unwrap();
    driver.recall_data().unwrap();
    driver.free().done();
}

#[test]
fn configuration_reads_flags() {
    // DONE | ONESHOT | R1 | R0
    let expectations = [
        I2cTrans::write_read(I2C_ADDR, vec![0xAC], vec![0x00]),
        I2cTrans::write_read(I2C_ADDR, vec![0xAD], vec![0xB1]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Ds620::new(mock, SENSOR);
    let config = driver.configuration().unwrap();
    assert!(config.conversion_done());
    assert_eq!(config.conversion_mode(), ConversionMode::OneShot);
    assert_eq!(config.resolution(), Resolution::Bits13);
    driver.free().done();
}

#[test]
fn set_conversion_mode_preserves_other_bits() {
    let expectations = [
        I2cTrans::write_read(I2C_ADDR, vec![0xAC], vec![0x04]),
        I2cTrans::write_read(I2C_ADDR, vec![0xAD], vec![0x01]),
        I2cTrans::write(I2C_ADDR, vec![0xAC, 0x04]),
        I2cTrans::write(I2C_ADDR, vec![0xAD, 0x81]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Ds620::new(mock, SENSOR);
    driver.set_conversion_mode(ConversionMode::OneShot).unwrap();
    driver.free().done();
}

#[test]
fn set_resolution_updates_selector() {
    let expectations = [
        I2cTrans::write_read(I2C_ADDR, vec![0xAC], vec![0x00]),
        I2cTrans::write_read(I2C_ADDR, vec![0xAD], vec![0x80]),
        I2cTrans::write(I2C_ADDR, vec![0xAC, 0x00]),
        I2cTrans::write(I2C_ADDR, vec![0xAD, 0xA0]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Ds620::new(mock, SENSOR);
    driver.set_resolution(Resolution::Bits11).unwrap();
    driver.free().done();
}

#[test]
fn status_flags_need_one_config_read_each() {
    let expectations = [
        I2cTrans::write_read(I2C_ADDR, vec![0xAC], vec![0x00]),
        I2cTrans::write_read(I2C_ADDR, vec![0xAD], vec![0x02]),
        I2cTrans::write_read(I2C_ADDR, vec![0xAC], vec![0x00]),
        I2cTrans::write_read(I2C_ADDR, vec![0xAD], vec![0x02]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Ds620::new(mock, SENSOR);
    assert!(driver.is_nv_busy().unwrap());
    assert!(!driver.is_conversion_done().unwrap());
    driver.free().done();
}

#[test]
fn user_registers_map_to_a4_a7() {
    let expectations = [
        I2cTrans::write(I2C_ADDR, vec![0xA4, 0x5A]),
        I2cTrans::write_read(I2C_ADDR, vec![0xA7], vec![0xC3]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Ds620::new(mock, SENSOR);
    driver.write_user(UserRegister::User1, 0x5A).unwrap();
    assert_eq!(driver.read_user(UserRegister::User4).unwrap(), 0xC3);
    driver.free().done();
}

#[test]
fn set_address_targets_other_sensor() {
    let expectations = [
        I2cTrans::write(0x49, vec![0x51]),
        I2cTrans::write(0x4F, vec![0x51]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Ds620::new(mock, SENSOR);
    driver.start_conversion().unwrap();
    driver.set_address(SensorAddress::new::<ErrorKind>(7).unwrap());
    driver.start_conversion().unwrap();
    assert_eq!(driver.address().id(), 7);
    driver.free().done();
}

#[test]
fn bus_error_is_passed_through() {
    let expectations = [I2cTrans::write_read(I2C_ADDR, vec![0xAA], vec![0x00]).with_error(ErrorKind::Other)];
    let mock = I2cMock::new(&expectations);
    let mut driver = Ds620::new(mock, SENSOR);
    assert_eq!(driver.temperature(), Err(Error::I2c(ErrorKind::Other)));
    driver.free().done();
}

#[test]
fn failed_msb_write_skips_lsb() {
    let expectations = [I2cTrans::write(I2C_ADDR, vec![0xAC, 0x00]).with_error(ErrorKind::Other)];
    let mock = I2cMock::new(&expectations);
    let mut driver = Ds620::new(mock, SENSOR);
    let config = ds620_rs::Configuration::from_raw(0x0080);
    assert!(matches!(driver.set_configuration(config), Err(Error::I2c(ErrorKind::Other))));
    driver.free().done();
}
