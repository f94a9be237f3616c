// Build script for vantagectl - embeds version at compile time

fn main() {
    // Get version from environment (set by release CI) or Cargo.toml
    let version =
        std::env::var("VANTAGE_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

    // Embed as environment variable for runtime access
    println!("cargo:rustc-env=VANTAGE_VERSION={}", version);

    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-env-changed=VANTAGE_VERSION");
}
