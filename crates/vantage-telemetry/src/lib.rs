//! Vantage Telemetry - anonymized telemetry context core
//!
//! Builds the host-identifying context attached to every outgoing diagnostic
//! event, and derives the user-agent string describing the client, its host
//! platform, and its runtime.
//!
//! Identifying values (username, hostname) never leave the process in clear
//! text; they are folded into a one-way SHA-1 digest. The two slow host
//! lookups (hostname resolution, Linux release files) are computed at most
//! once per resolver lifetime.

pub mod config;
pub mod context;
pub mod distro;
pub mod facts;
pub mod host;
pub mod keys;
pub mod platform;
pub mod resolver;
pub mod user_agent;

pub use context::TelemetryContext;
pub use platform::PlatformFacts;
pub use resolver::ContextResolver;
pub use user_agent::UserAgentBuilder;

/// Placeholder reported for any fact that could not be resolved.
pub const UNKNOWN: &str = "Unknown";

/// Bundle name written to the user context and the application-id tag.
pub const BUNDLE_NAME: &str = "vantage-telemetry";

/// Product token leading the user-agent string.
pub const USER_AGENT_PRODUCT: &str = "Vantage";
