//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `notenmanager_core` linkage without a UI host.
//! - Print deterministic sample conversions for quick sanity checks.

use notenmanager_core::{convert, numeric_to_letter, GradingScale};

fn main() {
    println!("notenmanager_core version={}", notenmanager_core::core_version());

    let swiss = GradingScale::swiss();
    for (label, target) in [
        ("german", GradingScale::german()),
        ("percentage", GradingScale::percentage()),
        ("us_letter", GradingScale::us_letter()),
    ] {
        match convert(5.5, &swiss, &target) {
            Ok(value) => println!("swiss 5.5 -> {label} {value}"),
            Err(err) => eprintln!("swiss 5.5 -> {label} failed: {err}"),
        }
    }
    println!("us_letter 3.0 -> {}", numeric_to_letter(3.0));
}
