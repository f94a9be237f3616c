//! Injected host-application and component-version collaborators.
//!
//! The embedding application and the plugin registry are outside this crate;
//! both are modeled as traits so the resolver stays testable with trivial
//! fakes.

use std::collections::HashMap;

use crate::facts::FactError;

/// Registry id under which this component's version is looked up.
pub const COMPONENT_ID: &str = "io.vantage.telemetry";

/// Version reported when the registry has no usable entry.
pub const DEFAULT_COMPONENT_VERSION: &str = "0";

/// Version and naming facts of the embedding application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostAppDescriptor {
    pub full_name: String,
    pub major_version: String,
    pub minor_version: String,
    pub build: String,
}

/// The embedding application's metadata, unavailable until its startup
/// completes.
pub trait HostApplication: Send + Sync {
    fn descriptor(&self) -> Result<HostAppDescriptor, FactError>;
}

/// Component-version registry of the plugin host.
pub trait PluginVersionProvider: Send + Sync {
    fn version(&self, component_id: &str) -> Option<String>;
}

/// Resolve this component's version, degrading to
/// [`DEFAULT_COMPONENT_VERSION`] when the registry entry is missing or empty.
pub fn resolve_component_version(provider: &dyn PluginVersionProvider) -> String {
    match provider.version(COMPONENT_ID) {
        Some(version) if !version.is_empty() => version,
        _ => DEFAULT_COMPONENT_VERSION.to_string(),
    }
}

/// Fixed descriptor, for embedders whose metadata is known up front.
#[derive(Debug, Clone)]
pub struct StaticHostApplication {
    descriptor: HostAppDescriptor,
}

impl StaticHostApplication {
    pub fn new(descriptor: HostAppDescriptor) -> Self {
        Self { descriptor }
    }
}

impl HostApplication for StaticHostApplication {
    fn descriptor(&self) -> Result<HostAppDescriptor, FactError> {
        Ok(self.descriptor.clone())
    }
}

/// In-memory component-version table.
#[derive(Debug, Clone, Default)]
pub struct StaticPluginVersions {
    versions: HashMap<String, String>,
}

impl StaticPluginVersions {
    pub fn with_version(mut self, component_id: &str, version: &str) -> Self {
        self.versions
            .insert(component_id.to_string(), version.to_string());
        self
    }
}

impl PluginVersionProvider for StaticPluginVersions {
    fn version(&self, component_id: &str) -> Option<String> {
        self.versions.get(component_id).cloned()
    }
}
