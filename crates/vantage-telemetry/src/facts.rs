//! Raw host and runtime fact sources.
//!
//! Every fact is exposed as an explicit `Result` so callers can see the
//! degrade-to-default paths instead of catching broad errors. The production
//! source reads cheap system facts on demand; caching of the two slow facts
//! (hostname, Linux release text) belongs to [`crate::platform`].

use sysinfo::System;
use thiserror::Error;

use crate::distro;

/// A single host/runtime datum could not be resolved.
#[derive(Debug, Error)]
pub enum FactError {
    #[error("{0} is unavailable")]
    Unavailable(&'static str),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of the raw host and runtime facts the resolver needs.
///
/// Implementations must be cheap for everything except [`hostname`] and
/// [`release_text`], which the platform layer computes at most once.
///
/// [`hostname`]: FactSource::hostname
/// [`release_text`]: FactSource::release_text
pub trait FactSource: Send + Sync {
    /// Kernel family / product name, e.g. `"Linux"` or `"Windows"`.
    fn os_name(&self) -> Result<String, FactError>;

    /// Dotted OS version string.
    fn os_version(&self) -> Result<String, FactError>;

    /// Processor architecture, e.g. `"x86_64"`.
    fn arch(&self) -> Result<String, FactError>;

    /// Name of the OS user running the process.
    fn username(&self) -> Result<String, FactError>;

    /// Display locale of the process, e.g. `"en-US"`.
    fn locale(&self) -> Result<String, FactError>;

    /// Runtime name, e.g. `"Rust"`.
    fn runtime_name(&self) -> Result<String, FactError>;

    /// Runtime version, e.g. `"1.76.0"`.
    fn runtime_version(&self) -> Result<String, FactError>;

    /// Local host name. May take seconds on some platforms.
    fn hostname(&self) -> Result<String, FactError>;

    /// Concatenated contents of the OS release files. Only meaningful on
    /// Linux; may spawn a subprocess.
    fn release_text(&self) -> Result<String, FactError>;
}

/// Production fact source backed by sysinfo, std env, and build metadata.
#[derive(Debug, Default)]
pub struct SystemFactSource;

impl FactSource for SystemFactSource {
    fn os_name(&self) -> Result<String, FactError> {
        if cfg!(target_os = "linux") {
            // Kernel family, matching the name the full-name branch tests
            // against; the distribution is reported via the release files.
            return Ok("Linux".to_string());
        }
        System::name().ok_or(FactError::Unavailable("os name"))
    }

    fn os_version(&self) -> Result<String, FactError> {
        System::os_version()
            .or_else(System::kernel_version)
            .ok_or(FactError::Unavailable("os version"))
    }

    fn arch(&self) -> Result<String, FactError> {
        Ok(std::env::consts::ARCH.to_string())
    }

    fn username(&self) -> Result<String, FactError> {
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .map_err(|_| FactError::Unavailable("username"))
    }

    fn locale(&self) -> Result<String, FactError> {
        sys_locale::get_locale().ok_or(FactError::Unavailable("locale"))
    }

    fn runtime_name(&self) -> Result<String, FactError> {
        Ok("Rust".to_string())
    }

    fn runtime_version(&self) -> Result<String, FactError> {
        // Captured by build.rs from the toolchain that built this crate.
        Ok(env!("VANTAGE_RUSTC_VERSION").to_string())
    }

    fn hostname(&self) -> Result<String, FactError> {
        System::host_name().ok_or(FactError::Unavailable("hostname"))
    }

    fn release_text(&self) -> Result<String, FactError> {
        distro::read_release_text()
    }
}
