//! Build script for vantage-telemetry.
//!
//! Sets VANTAGE_RUSTC_VERSION to the version of the toolchain that built the
//! crate, so the fact provider can report it as the runtime version.

use std::process::Command;

fn main() {
    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());

    let version = Command::new(&rustc)
        .arg("--version")
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout).ok()
            } else {
                None
            }
        })
        // "rustc 1.76.0 (07dca489a 2024-02-04)" -> "1.76.0"
        .and_then(|text| text.split_whitespace().nth(1).map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=VANTAGE_RUSTC_VERSION={}", version);
    println!("cargo:rerun-if-env-changed=RUSTC");
}
