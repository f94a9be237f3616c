//! Well-known property keys and the tag-key registry.

/// Anonymized user id.
pub const PROP_USER_ID: &str = "Context.Default.UserId";

/// Host application major version.
pub const PROP_HOST_MAJOR_VERSION: &str = "Context.Default.Host.MajorVersion";

/// Host application minor version.
pub const PROP_HOST_MINOR_VERSION: &str = "Context.Default.Host.MinorVersion";

/// Host application build identifier.
pub const PROP_HOST_BUILD_NUMBER: &str = "Context.Default.Host.BuildNumber";

/// Full host application name.
pub const PROP_HOST_EXE_NAME: &str = "Context.Default.Host.ExeName";

/// This component's own version.
pub const PROP_COMPONENT_VERSION: &str = "Context.Default.Component.Version";

/// Uppercased processor architecture.
pub const PROP_PROCESSOR_ARCHITECTURE: &str = "Context.Default.ProcessorArchitecture";

/// Display locale of the process.
pub const PROP_LOCALE_NAME: &str = "Context.Default.LocaleName";

/// OS version before the first dot.
pub const PROP_OS_MAJOR_VERSION: &str = "Context.Default.OS.MajorVersion";

/// OS version after the first dot (empty when the version has no dot).
pub const PROP_OS_MINOR_VERSION: &str = "Context.Default.OS.MinorVersion";

/// OS name as reported by the platform.
pub const PROP_OS_NAME: &str = "Context.Default.OS.Name";

/// First whitespace-delimited token of the OS name.
pub const PROP_OS_SHORT_NAME: &str = "Context.Default.OS.ShortName";

/// `<name> (<version-or-distribution>)`.
pub const PROP_OS_FULL_NAME: &str = "Context.Default.OS.FullName";

/// Runtime name (the toolchain family).
pub const PROP_RUNTIME_NAME: &str = "Context.Default.Runtime.Name";

/// Runtime version.
pub const PROP_RUNTIME_VERSION: &str = "Context.Default.Runtime.Version";

/// Every property key a completed initialization must have written.
pub const REQUIRED_PROPERTY_KEYS: &[&str] = &[
    PROP_USER_ID,
    PROP_HOST_MAJOR_VERSION,
    PROP_HOST_MINOR_VERSION,
    PROP_HOST_BUILD_NUMBER,
    PROP_HOST_EXE_NAME,
    PROP_COMPONENT_VERSION,
    PROP_PROCESSOR_ARCHITECTURE,
    PROP_LOCALE_NAME,
    PROP_OS_MAJOR_VERSION,
    PROP_OS_MINOR_VERSION,
    PROP_OS_NAME,
    PROP_OS_SHORT_NAME,
    PROP_OS_FULL_NAME,
    PROP_RUNTIME_NAME,
    PROP_RUNTIME_VERSION,
];

/// Tag keys supplied by the telemetry backend.
///
/// Injected into the resolver so embedders pointing at a different backend
/// can rename the well-known tags without touching the resolution logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagKeys {
    pub application_id: String,
    pub device_os: String,
    pub device_os_version: String,
}

impl Default for TagKeys {
    fn default() -> Self {
        Self {
            application_id: "ai.application.id".to_string(),
            device_os: "ai.device.os".to_string(),
            device_os_version: "ai.device.osVersion".to_string(),
        }
    }
}
