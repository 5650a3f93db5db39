//! Interrupt threshold example
//!
//! This example demonstrates how to:
//! - Configure low and high interrupt thresholds
//! - Enable interrupt generation
//! - Poll the interrupt status register for threshold crossings

use embedded_hal::delay::DelayNs;
use veml7700::Veml7700;

// This example uses linux-embedded-hal for demonstration
use linux_embedded_hal::{Delay, I2cdev};

// ALS_INT flag bits
const INT_TH_HIGH: u16 = 1 << 14;
const INT_TH_LOW: u16 = 1 << 15;

fn main() {
    // Initialize I2C interface
    let i2c = I2cdev::new("/dev/i2c-1").expect("failed to open I2C bus");
    let mut delay = Delay;

    // Create sensor instance
    let mut sensor = Veml7700::new(i2c);

    println!("Initializing VEML7700 sensor...");
    sensor.init().expect("sensor initialization failed");

    // Trigger when the raw count leaves the 100..=50000 band
    sensor.set_low_threshold(100).unwrap();
    sensor.set_high_threshold(50000).unwrap();
    sensor.set_interrupt_enable(true).unwrap();

    println!("Interrupt thresholds configured:");
    println!("- Low threshold: 100 counts");
    println!("- High threshold: 50000 counts");
    println!("\nMonitoring for threshold crossings. Press Ctrl+C to exit\n");

    loop {
        delay.delay_ms(500);

        let raw = sensor.read_als_raw().unwrap();

        // Reading the status register clears the flags
        let status = sensor.read_interrupt_status().unwrap();

        if status & INT_TH_HIGH != 0 {
            println!("High threshold crossed (ALS: {raw})");
        }
        if status & INT_TH_LOW != 0 {
            println!("Low threshold crossed (ALS: {raw})");
        }
    }
}
