//! Driver Demo
//!
//! Replays the same key sequences through every driver and prints what
//! each display shows.
//!
//! Run with: cargo run --example driver_demo

use keypad_calculator::driver::{
    run_behavior_suite, AccumulatorDriver, CalculatorDriver, KeypadDriver,
};

const SEQUENCES: &[&str] = &["2+3*4=", "5*-2=*3=", "1/3=", "7+=", "5/0=", ".1+.2="];

fn show<D: CalculatorDriver>(name: &str, driver: &mut D) {
    println!("{name}:");
    for keys in SEQUENCES {
        driver.clear();
        driver.press_keys(keys);
        println!(
            "  {keys:<10} -> {:<16} {}",
            driver.formula_line(),
            driver.display()
        );
    }
    run_behavior_suite(driver);
    println!("  behaviour checks passed");
    println!();
}

fn main() {
    show("accumulator", &mut AccumulatorDriver::new());
    show("keypad", &mut KeypadDriver::new());

    #[cfg(feature = "tui")]
    show("terminal", &mut keypad_calculator::driver::TuiDriver::new());
}
