//! Basic ambient light reading example
//!
//! This example demonstrates how to:
//! - Initialize the VEML7700 sensor
//! - Configure gain and integration time
//! - Read raw counts and calculate lux

use embedded_hal::delay::DelayNs;
use veml7700::{Gain, IntegrationTime, Veml7700};

// This example uses linux-embedded-hal for demonstration
// Replace with your platform's I2C implementation
use linux_embedded_hal::{Delay, I2cdev};

fn main() {
    // Initialize I2C interface
    let i2c = I2cdev::new("/dev/i2c-1").expect("failed to open I2C bus");
    let mut delay = Delay;

    // Create sensor instance
    let mut sensor = Veml7700::new(i2c);

    println!("Initializing VEML7700 sensor...");
    sensor.init().expect("sensor initialization failed");

    // Configure sensor settings
    sensor.set_gain(Gain::Gain1_4).unwrap();
    sensor.set_integration_time(IntegrationTime::Ms200).unwrap();

    println!("Sensor configured:");
    println!("- Gain: {:?}", sensor.gain());
    println!("- Integration time: {:?}", sensor.integration_time());
    println!("- Resolution: {:.4} lux/count", sensor.resolution());
    println!("\nStarting measurements. Press Ctrl+C to exit\n");

    loop {
        // Wait for a fresh sample
        delay.delay_ms(u32::from(sensor.integration_time().millis()) + 50);

        let raw = sensor.read_als_raw().unwrap();
        let white = sensor.read_white_raw().unwrap();
        let lux = sensor.read_lux().unwrap();

        println!("ALS: {raw:5}  White: {white:5}  Lux: {lux:8.2}");
    }
}
