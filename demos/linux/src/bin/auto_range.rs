//! Automatic ranging example
//!
//! This example demonstrates how to:
//! - Enable the built-in auto-range policy
//! - Watch gain and integration time adapt to the light level
//!
//! Cover the sensor or shine a light at it to see the settings step.

use embedded_hal::delay::DelayNs;
use veml7700::Veml7700;

// This example uses linux-embedded-hal for demonstration
use linux_embedded_hal::{Delay, I2cdev};

fn main() {
    // Initialize I2C interface
    let i2c = I2cdev::new("/dev/i2c-1").expect("failed to open I2C bus");
    let mut delay = Delay;

    // Create sensor instance
    let mut sensor = Veml7700::new(i2c);

    println!("Initializing VEML7700 sensor...");
    sensor.init().expect("sensor initialization failed");

    // Each out-of-band reading steps gain or integration time by one
    // setting for the following reading.
    sensor.enable_auto_range(true);

    println!("Auto-ranging enabled. Press Ctrl+C to exit\n");

    let mut last_gain = sensor.gain();
    let mut last_it = sensor.integration_time();

    loop {
        delay.delay_ms(u32::from(sensor.integration_time().millis()) + 50);

        let lux = sensor.read_lux().unwrap();

        if sensor.gain() != last_gain || sensor.integration_time() != last_it {
            println!(
                "Range adjusted: gain {:?} -> {:?}, integration time {:?} -> {:?}",
                last_gain,
                sensor.gain(),
                last_it,
                sensor.integration_time()
            );
            last_gain = sensor.gain();
            last_it = sensor.integration_time();
        }

        println!(
            "Lux: {lux:8.2}  (gain {:?}, {} ms)",
            sensor.gain(),
            sensor.integration_time().millis()
        );
    }
}
