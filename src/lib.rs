//! # VEML7700 Ambient Light Sensor Driver
//!
//! This is a platform-agnostic Rust driver for the VEML7700 high-accuracy
//! ambient light sensor, built using the [`embedded-hal`] traits for I2C
//! communication.
//!
//! The VEML7700 is a 16-bit digital ambient light sensor that provides:
//! - Ambient light and white channel measurements
//! - Programmable gain (1/8x to 2x)
//! - Programmable integration time (25ms to 800ms)
//! - Interrupt support with configurable thresholds
//! - Power saving modes
//! - I2C interface (address 0x10)
//!
//! ## Features
//!
//! - **High-level API** for illuminance measurements
//! - **Automatic ranging** that steps gain and integration time to keep raw
//!   counts between the noise floor and saturation
//! - **Configurable gain and integration time**
//! - **Lux calculation** from raw counts
//! - **Interrupt thresholds** and status polling
//! - **Power management** with shutdown and power-save modes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use veml7700::{Gain, IntegrationTime, Veml7700};
//!
//! # fn main() {
//! # let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
//! let mut sensor = Veml7700::new(i2c);
//!
//! // Initialize the sensor
//! sensor.init().unwrap();
//!
//! // Configure measurement settings
//! sensor.set_gain(Gain::Gain1_4).unwrap();
//! sensor.set_integration_time(IntegrationTime::Ms200).unwrap();
//!
//! // Let the driver keep raw counts in a usable band
//! sensor.enable_auto_range(true);
//!
//! // Read illuminance
//! let lux = sensor.read_lux().unwrap();
//! # }
//! ```
//!
//! ## Limitations
//!
//! - Configuration updates that preserve other register bits (shutdown,
//!   interrupt enable) are two separate bus transactions; the driver cannot
//!   make the read-modify-write atomic.
//! - Bus errors are surfaced immediately; there are no retries.
//! - The bus clock is fixed by the platform HAL when the I2C peripheral is
//!   created. The sensor supports clock rates from 100 kHz to 400 kHz.
//!
//! [`embedded-hal`]: https://crates.io/crates/embedded-hal

#![no_std]
#![deny(missing_docs)]

use embedded_hal::i2c::I2c;

/// Default I2C address of the VEML7700 sensor
pub const I2C_ADDRESS: u8 = 0x10;

/// Ambient light gain settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Gain {
    /// 1/8x gain
    Gain1_8,
    /// 1/4x gain
    Gain1_4,
    /// 1x gain
    Gain1,
    /// 2x gain
    Gain2,
}

impl Gain {
    // ALS_GAIN field encoding. The code order is a hardware contract and
    // does not follow the sensitivity order.
    fn bits(self) -> u16 {
        match self {
            Self::Gain1_8 => 0b11,
            Self::Gain1_4 => 0b10,
            Self::Gain1 => 0b00,
            Self::Gain2 => 0b01,
        }
    }

    // Resolution scales inversely with sensitivity.
    fn resolution_scale(self) -> f32 {
        match self {
            Self::Gain1_8 => 8.0,
            Self::Gain1_4 => 4.0,
            Self::Gain1 => 1.0,
            Self::Gain2 => 0.5,
        }
    }

    fn step_up(self) -> Option<Self> {
        match self {
            Self::Gain1_8 => Some(Self::Gain1_4),
            Self::Gain1_4 => Some(Self::Gain1),
            Self::Gain1 => Some(Self::Gain2),
            Self::Gain2 => None,
        }
    }

    fn step_down(self) -> Option<Self> {
        match self {
            Self::Gain1_8 => None,
            Self::Gain1_4 => Some(Self::Gain1_8),
            Self::Gain1 => Some(Self::Gain1_4),
            Self::Gain2 => Some(Self::Gain1),
        }
    }
}

/// Ambient light integration time settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum IntegrationTime {
    /// 25 ms integration time
    Ms25 = 0b000,
    /// 50 ms integration time
    Ms50 = 0b001,
    /// 100 ms integration time
    Ms100 = 0b010,
    /// 200 ms integration time
    Ms200 = 0b011,
    /// 400 ms integration time
    Ms400 = 0b100,
    /// 800 ms integration time
    Ms800 = 0b101,
}

impl IntegrationTime {
    /// Duration of one integration cycle in milliseconds.
    ///
    /// Useful for pacing reads so that each one returns a fresh sample.
    pub fn millis(self) -> u16 {
        match self {
            Self::Ms25 => 25,
            Self::Ms50 => 50,
            Self::Ms100 => 100,
            Self::Ms200 => 200,
            Self::Ms400 => 400,
            Self::Ms800 => 800,
        }
    }

    // Resolution scales inversely with exposure duration.
    fn resolution_scale(self) -> f32 {
        match self {
            Self::Ms25 => 4.0,
            Self::Ms50 => 2.0,
            Self::Ms100 => 1.0,
            Self::Ms200 => 0.5,
            Self::Ms400 => 0.25,
            Self::Ms800 => 0.125,
        }
    }

    fn step_up(self) -> Option<Self> {
        match self {
            Self::Ms25 => Some(Self::Ms50),
            Self::Ms50 => Some(Self::Ms100),
            Self::Ms100 => Some(Self::Ms200),
            Self::Ms200 => Some(Self::Ms400),
            Self::Ms400 => Some(Self::Ms800),
            Self::Ms800 => None,
        }
    }

    fn step_down(self) -> Option<Self> {
        match self {
            Self::Ms25 => None,
            Self::Ms50 => Some(Self::Ms25),
            Self::Ms100 => Some(Self::Ms50),
            Self::Ms200 => Some(Self::Ms100),
            Self::Ms400 => Some(Self::Ms200),
            Self::Ms800 => Some(Self::Ms400),
        }
    }
}

/// Outcome summary of the most recent driver operation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Status {
    /// Operation completed
    Ok,
    /// An I2C transaction was not acknowledged or returned short data
    BusError,
    /// A data read was attempted before successful initialization
    NotInitialized,
    /// A parameter was rejected
    InvalidParameter,
}

/// All possible errors in this crate
#[derive(Debug)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Error<E> {
    /// I2C communication error
    I2c(E),
    /// Data read attempted before successful initialization
    NotInitialized,
    /// Invalid parameter. Reserved; out-of-range power-save modes are
    /// clamped rather than rejected.
    InvalidParameter,
}

// Register addresses
const ALS_CONF: u8 = 0x00;
const ALS_WH: u8 = 0x01;
const ALS_WL: u8 = 0x02;
const ALS_PSM: u8 = 0x03;
const ALS_DATA: u8 = 0x04;
const WHITE_DATA: u8 = 0x05;
const ALS_INT: u8 = 0x06;

// ALS_CONF bits
const ALS_SD: u16 = 1 << 0;
const ALS_INT_EN: u16 = 1 << 1;

// ALS_PSM bits
const PSM_EN: u16 = 1 << 0;

// Lux per raw count at 1x gain, 100 ms integration time
const RESOLUTION_BASE: f32 = 0.0576;

// Raw counts outside this band trigger an auto-range step
const SATURATION_THRESHOLD: u16 = 0xFF00;
const LOW_LIGHT_THRESHOLD: u16 = 100;

/// High-level VEML7700 driver
pub struct Veml7700<I2C> {
    i2c: I2C,
    address: u8,
    // Device state tracking
    initialized: bool,
    auto_range: bool,
    gain: Gain,
    integration_time: IntegrationTime,
    last_status: Status,
}

impl<I2C, E> Veml7700<I2C>
where
    I2C: I2c<Error = E>,
{
    /// Create a new VEML7700 driver instance at the default I2C address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, I2C_ADDRESS)
    }

    /// Create a new VEML7700 driver instance at a non-default I2C address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            initialized: false,
            auto_range: false,
            gain: Gain::Gain1,
            integration_time: IntegrationTime::Ms100,
            last_status: Status::Ok,
        }
    }

    /// Initialize the sensor with default settings: 1x gain, 100 ms
    /// integration time, auto-ranging disabled.
    ///
    /// Data reads return [`Error::NotInitialized`] until this succeeds.
    pub fn init(&mut self) -> Result<(), Error<E>> {
        self.gain = Gain::Gain1;
        self.integration_time = IntegrationTime::Ms100;
        self.auto_range = false;
        let result = self.apply_config();
        self.initialized = result.is_ok();
        self.record(result)
    }

    /// Set the ambient light gain.
    ///
    /// The in-memory setting is updated even if the register write fails;
    /// the device then holds the previous configuration until the next
    /// successful write.
    pub fn set_gain(&mut self, gain: Gain) -> Result<(), Error<E>> {
        self.gain = gain;
        let result = self.apply_config();
        self.record(result)
    }

    /// Set the integration time.
    ///
    /// Follows the same update contract as [`Veml7700::set_gain`].
    pub fn set_integration_time(&mut self, it: IntegrationTime) -> Result<(), Error<E>> {
        self.integration_time = it;
        let result = self.apply_config();
        self.record(result)
    }

    /// Enable or disable automatic ranging.
    ///
    /// When enabled, a raw reading near saturation or the noise floor steps
    /// gain or integration time by one setting, taking effect from the next
    /// reading.
    pub fn enable_auto_range(&mut self, enable: bool) {
        self.auto_range = enable;
    }

    /// Whether automatic ranging is active
    pub fn auto_range_enabled(&self) -> bool {
        self.auto_range
    }

    /// Enter or leave shutdown mode
    pub fn set_shutdown(&mut self, enable: bool) -> Result<(), Error<E>> {
        let result = self.update_config_bit(ALS_SD, enable);
        self.record(result)
    }

    /// Enable or disable threshold interrupt generation
    pub fn set_interrupt_enable(&mut self, enable: bool) -> Result<(), Error<E>> {
        let result = self.update_config_bit(ALS_INT_EN, enable);
        self.record(result)
    }

    /// Configure the power-save register.
    ///
    /// `mode` selects one of the four refresh-rate trade-offs (0 to 3);
    /// larger values are clamped to 3. Disabling clears the whole register.
    pub fn set_power_save(&mut self, enable: bool, mode: u8) -> Result<(), Error<E>> {
        let mode = mode.min(3);
        let psm = if enable {
            PSM_EN | (u16::from(mode) << 1)
        } else {
            0
        };
        let result = self.write_register(ALS_PSM, psm);
        self.record(result)
    }

    /// Set the high interrupt threshold in raw counts
    pub fn set_high_threshold(&mut self, threshold: u16) -> Result<(), Error<E>> {
        let result = self.write_register(ALS_WH, threshold);
        self.record(result)
    }

    /// Set the low interrupt threshold in raw counts
    pub fn set_low_threshold(&mut self, threshold: u16) -> Result<(), Error<E>> {
        let result = self.write_register(ALS_WL, threshold);
        self.record(result)
    }

    /// Read the interrupt status register
    pub fn read_interrupt_status(&mut self) -> Result<u16, Error<E>> {
        let result = self.read_register(ALS_INT);
        self.record(result)
    }

    /// Read the raw ambient light count
    pub fn read_als_raw(&mut self) -> Result<u16, Error<E>> {
        let result = if self.initialized {
            self.read_register(ALS_DATA)
        } else {
            Err(Error::NotInitialized)
        };
        self.record(result)
    }

    /// Read the raw white channel count
    pub fn read_white_raw(&mut self) -> Result<u16, Error<E>> {
        let result = if self.initialized {
            self.read_register(WHITE_DATA)
        } else {
            Err(Error::NotInitialized)
        };
        self.record(result)
    }

    /// Read the ambient light level in lux.
    ///
    /// With auto-ranging enabled this may also rewrite the configuration
    /// register for the next reading; a failure of that adjustment does not
    /// fail the read.
    pub fn read_lux(&mut self) -> Result<f32, Error<E>> {
        let raw = self.read_als_raw()?;
        // The adjustment applies to the next reading; convert this count
        // with the settings it was sampled at.
        let resolution = self.resolution();
        let _ = self.maybe_auto_range(raw);
        Ok(f32::from(raw) * resolution)
    }

    /// Current conversion resolution in lux per raw count.
    ///
    /// Pure function of the configured gain and integration time; performs
    /// no bus traffic.
    pub fn resolution(&self) -> f32 {
        RESOLUTION_BASE
            * self.gain.resolution_scale()
            * self.integration_time.resolution_scale()
    }

    /// I2C address the driver is bound to
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Currently configured gain
    pub fn gain(&self) -> Gain {
        self.gain
    }

    /// Currently configured integration time
    pub fn integration_time(&self) -> IntegrationTime {
        self.integration_time
    }

    /// Outcome of the most recent fallible operation
    pub fn last_status(&self) -> Status {
        self.last_status
    }

    /// Destroy the driver and return the I2C interface
    pub fn destroy(self) -> I2C {
        self.i2c
    }

    // Encode the current gain and integration time into ALS_CONF. This
    // path writes the shutdown and interrupt-enable bits as zero.
    fn apply_config(&mut self) -> Result<(), Error<E>> {
        let conf = ((self.integration_time as u16) << 4) | (self.gain.bits() << 9);
        self.write_register(ALS_CONF, conf)
    }

    // One auto-range step per reading. Gain moves first; integration time
    // only once gain is at its limit. Saturates silently at either extreme.
    fn maybe_auto_range(&mut self, raw: u16) -> Result<(), Error<E>> {
        if !self.auto_range {
            return Ok(());
        }
        if raw > SATURATION_THRESHOLD {
            if let Some(gain) = self.gain.step_down() {
                self.gain = gain;
                return self.apply_config();
            }
            if let Some(it) = self.integration_time.step_down() {
                self.integration_time = it;
                return self.apply_config();
            }
        } else if raw < LOW_LIGHT_THRESHOLD {
            if let Some(gain) = self.gain.step_up() {
                self.gain = gain;
                return self.apply_config();
            }
            if let Some(it) = self.integration_time.step_up() {
                self.integration_time = it;
                return self.apply_config();
            }
        }
        Ok(())
    }

    // Read-modify-write of a single ALS_CONF bit. The two transactions are
    // not atomic; a concurrent writer in between is lost. A failed read
    // returns without issuing the write.
    fn update_config_bit(&mut self, mask: u16, set: bool) -> Result<(), Error<E>> {
        let mut conf = self.read_register(ALS_CONF)?;
        if set {
            conf |= mask;
        } else {
            conf &= !mask;
        }
        self.write_register(ALS_CONF, conf)
    }

    fn record<T>(&mut self, result: Result<T, Error<E>>) -> Result<T, Error<E>> {
        self.last_status = match &result {
            Ok(_) => Status::Ok,
            Err(Error::I2c(_)) => Status::BusError,
            Err(Error::NotInitialized) => Status::NotInitialized,
            Err(Error::InvalidParameter) => Status::InvalidParameter,
        };
        result
    }

    // Helper methods for register access. All register values travel low
    // byte first.
    fn read_register(&mut self, reg: u8) -> Result<u16, Error<E>> {
        let mut buffer = [0u8; 2];
        self.i2c
            .write_read(self.address, &[reg], &mut buffer)
            .map_err(Error::I2c)?;
        Ok(u16::from_le_bytes(buffer))
    }

    fn write_register(&mut self, reg: u8, value: u16) -> Result<(), Error<E>> {
        let [low, high] = value.to_le_bytes();
        self.i2c
            .write(self.address, &[reg, low, high])
            .map_err(Error::I2c)
    }
}
