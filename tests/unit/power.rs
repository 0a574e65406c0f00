//! Power, clock, standby and reset sequencing

use crate::common::{create_mock_driver, create_mock_driver_with};
use mpu6050::{AccelScale, Axis, ClockSource, Error, GyroScale, LowPowerWake,
              Mpu6050Config, PwrMgmt1, PwrMgmt2, Register, StandbyAxes,
              TransportStatus, SAMPLES_PER_RANGE};

fn pwr_mgmt_1(device: &crate::common::MockDevice) -> PwrMgmt1 {
    PwrMgmt1::from_bits(device.register(Register::PWR_MGMT_1))
}

fn pwr_mgmt_2(device: &crate::common::MockDevice) -> PwrMgmt2 {
    PwrMgmt2::from_bits(device.register(Register::PWR_MGMT_2))
}

#[test]
fn enable_wakes_and_activates_every_axis() {
    let mut config = Mpu6050Config::new();
    config.clock_source(ClockSource::PllGyroX);
    let (mut driver, device) = create_mock_driver_with(config);
    device.set_register(Register::PWR_MGMT_1, 0b0100_1000);
    device.set_register(Register::PWR_MGMT_2, 0b1011_1111);

    driver.enable().unwrap();

    let pwr1 = pwr_mgmt_1(&device);
    assert!(!pwr1.sleep());
    assert!(!pwr1.temp_dis());
    assert_eq!(pwr1.clksel(), ClockSource::PllGyroX as u8);
    let pwr2 = pwr_mgmt_2(&device);
    assert_eq!(pwr2.into_bits(), 0b1000_0000);
    assert_eq!(driver.accel_range(), AccelScale::_2G);
    assert_eq!(driver.gyro_range(), GyroScale::_250DPS);
}

#[test]
fn enable_then_disable_sleeps_with_axes_in_standby() {
    let (mut driver, device) = create_mock_driver();
    driver.enable().unwrap();
    driver.disable().unwrap();

    let pwr1 = pwr_mgmt_1(&device);
    assert!(pwr1.sleep());
    assert!(pwr1.temp_dis());
    let pwr2 = pwr_mgmt_2(&device);
    assert!(pwr2.stby_xa() && pwr2.stby_ya() && pwr2.stby_za());
    assert!(pwr2.stby_xg() && pwr2.stby_yg() && pwr2.stby_zg());
    assert_eq!(driver.standby().unwrap(), StandbyAxes::ALL);
}

#[test]
fn enable_without_calibration_is_cheap() {
    let (mut driver, device) = create_mock_driver();
    device.set_sample(Axis::AccelX, 55);
    driver.calibrate_axis(Axis::AccelX).unwrap();
    device.clear_operations();

    driver.enable().unwrap();

    assert!(device.operations().len() < 20);
    assert_eq!(driver.offset(Axis::AccelX), 0);
}

#[test]
fn enable_can_calibrate_every_axis() {
    let mut config = Mpu6050Config::new();
    config.calibrate_on_enable(true);
    let (mut driver, device) = create_mock_driver_with(config);
    for axis in Axis::ALL.iter() {
        device.set_sample(*axis, 7);
    }

    driver.enable().unwrap();

    for axis in Axis::ALL.iter() {
        let (low, _) = axis.registers();
        assert_eq!(device.read_count(low), 4 * SAMPLES_PER_RANGE as usize);
        assert_eq!(driver.offset(*axis), 7);
    }
    assert_eq!(driver.accel_range(), AccelScale::_2G);
    assert_eq!(driver.gyro_range(), GyroScale::_250DPS);
}

#[test]
fn enable_stops_at_first_failure() {
    let (mut driver, device) = create_mock_driver();
    device.fail_writes(Register::PWR_MGMT_1, TransportStatus::Nack);

    assert_eq!(driver.enable(), Err(Error::Communication));
    assert!(device.writes_to(Register::PWR_MGMT_2).is_empty());
}

#[test]
fn clock_select_preserves_other_bits() {
    let (mut driver, device) = create_mock_driver();
    device.set_register(Register::PWR_MGMT_1, 0b1100_1000);

    driver.set_clock_source(ClockSource::PllGyroZ).unwrap();

    let pwr1 = pwr_mgmt_1(&device);
    assert_eq!(pwr1.clksel(), 3);
    assert!(pwr1.sleep());
    assert!(pwr1.device_reset());
    assert!(pwr1.temp_dis());
}

#[test]
fn sleep_and_temperature_bits_are_independent() {
    let (mut driver, device) = create_mock_driver();
    device.set_register(Register::PWR_MGMT_1, 0b0000_0011);

    driver.sleep().unwrap();
    driver.disable_temp().unwrap();
    assert_eq!(device.register(Register::PWR_MGMT_1), 0b0100_1011);

    driver.wake_up().unwrap();
    assert_eq!(device.register(Register::PWR_MGMT_1), 0b0000_1011);
    driver.enable_temp().unwrap();
    assert_eq!(device.register(Register::PWR_MGMT_1), 0b0000_0011);
}

#[test]
fn standby_changes_only_named_axes() {
    let (mut driver, device) = create_mock_driver();
    device.set_register(Register::PWR_MGMT_2, 0b0100_0001);

    driver.set_standby(StandbyAxes::XA | StandbyAxes::YG, true).unwrap();
    assert_eq!(device.register(Register::PWR_MGMT_2), 0b0110_0011);

    driver.set_standby(StandbyAxes::ZG, false).unwrap();
    assert_eq!(device.register(Register::PWR_MGMT_2), 0b0110_0010);

    driver.set_low_power_wake(LowPowerWake::_40Hz).unwrap();
    assert_eq!(device.register(Register::PWR_MGMT_2), 0b1110_0010);
}

#[test]
fn reset_keeps_driver_state() {
    let (mut driver, device) = create_mock_driver();
    device.set_sample(Axis::GyroZ, 9);
    driver.calibrate_axis(Axis::GyroZ).unwrap();
    driver.set_accel_range(AccelScale::_16G).unwrap();
    device.set_register(Register::PWR_MGMT_1, 0b0000_0001);

    driver.reset().unwrap();

    assert_eq!(device.register(Register::PWR_MGMT_1), 0b1000_0001);
    assert_eq!(driver.offset(Axis::GyroZ), 9);
    assert_eq!(driver.accel_range(), AccelScale::_16G);
}

#[test]
fn signal_path_resets() {
    let (mut driver, device) = create_mock_driver();
    driver.reset_accel().unwrap();
    driver.reset_gyro().unwrap();
    driver.reset_temp().unwrap();

    assert_eq!(device.writes_to(Register::SIGNAL_PATH_RESET),
               vec![0b010, 0b100, 0b001]);
}

#[test]
fn self_tests_are_not_implemented_and_succeed() {
    let (mut driver, device) = create_mock_driver();
    device.fail_reads(Register::GYRO_CONFIG, 0, TransportStatus::Nack);

    assert_eq!(driver.self_test_x(), Ok(()));
    assert_eq!(driver.self_test_y(), Ok(()));
    assert_eq!(driver.self_test_z(), Ok(()));
    assert_eq!(driver.self_test_accel(Axis::AccelY), Ok(()));
    assert!(device.operations().is_empty());
}

#[test]
fn release_returns_the_device() {
    let (driver, device) = create_mock_driver();
    device.set_register(Register::INT_ENABLE, 0x11);
    let released = driver.release();
    assert_eq!(released.register(Register::INT_ENABLE), 0x11);
}
