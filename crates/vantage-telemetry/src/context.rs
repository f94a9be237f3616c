//! Telemetry context model.
//!
//! The context is owned by the telemetry client and mutated in place by the
//! resolver. After a completed initialization every required property key
//! (see [`crate::keys`]) is present; a degraded lookup leaves an empty
//! string, never an absent entry.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Structured metadata attached to every emitted diagnostic event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetryContext {
    /// Opaque key routing events to the collection endpoint.
    pub instrumentation_key: String,

    /// Free-form context properties, keyed by the constants in [`crate::keys`].
    pub properties: HashMap<String, String>,

    /// Well-known tags, keyed by the injected tag-key registry.
    pub tags: HashMap<String, String>,

    pub user: UserContext,
    pub device: DeviceContext,
    pub component: ComponentContext,
    pub session: SessionContext,
}

/// Pseudonymous user identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    /// One-way digest of `<username>@<hostname>`; never reversible.
    pub id: String,

    /// Agent tag identifying the emitting bundle.
    pub user_agent: String,
}

/// Host device facts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceContext {
    pub operating_system: String,
    pub operating_system_version: String,
}

/// The emitting component itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentContext {
    pub version: String,
}

/// Per-process telemetry session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub id: String,
}
