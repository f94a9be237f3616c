//! Context resolver.
//!
//! Resolves every contextual fact once and writes it into the caller's
//! context. Initialization is idempotent and cannot fail: each sub-step
//! degrades to a documented default instead of surfacing an error, because
//! telemetry must never block or crash the host application.

use std::collections::HashMap;
use std::sync::Once;

use sha1::{Digest, Sha1};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::TelemetryConfig;
use crate::context::{
    ComponentContext, DeviceContext, SessionContext, TelemetryContext, UserContext,
};
use crate::host::{self, HostAppDescriptor, HostApplication, PluginVersionProvider};
use crate::keys::{self, TagKeys};
use crate::platform::PlatformFacts;
use crate::user_agent::UserAgentBuilder;
use crate::BUNDLE_NAME;

/// Populates a [`TelemetryContext`] from the platform fact provider and the
/// injected host-application collaborators.
///
/// The first `initialize` call does all the work; every later call is a
/// no-op. Concurrent first calls block until the winner completes.
pub struct ContextResolver {
    facts: PlatformFacts,
    host_app: Box<dyn HostApplication>,
    plugins: Box<dyn PluginVersionProvider>,
    tag_keys: TagKeys,
    init: Once,
}

impl ContextResolver {
    pub fn new(
        facts: PlatformFacts,
        host_app: Box<dyn HostApplication>,
        plugins: Box<dyn PluginVersionProvider>,
        tag_keys: TagKeys,
    ) -> Self {
        Self {
            facts,
            host_app,
            plugins,
            tag_keys,
            init: Once::new(),
        }
    }

    /// Resolver backed by the live host, with the default tag keys.
    pub fn system(
        host_app: Box<dyn HostApplication>,
        plugins: Box<dyn PluginVersionProvider>,
    ) -> Self {
        Self::new(PlatformFacts::system(), host_app, plugins, TagKeys::default())
    }

    /// Populate `context` with every contextual fact. Runs at most once per
    /// resolver lifetime; subsequent calls recompute nothing.
    pub fn initialize(&self, context: &mut TelemetryContext) {
        self.init.call_once(|| {
            info!("starting telemetry context initialization");
            self.apply_instrumentation_key(context);
            self.apply_properties(&mut context.properties);
            self.apply_user(&mut context.user);
            self.apply_component(&mut context.component);
            self.apply_device(&mut context.device);
            self.apply_tags(&mut context.tags);
            self.apply_session(&mut context.session);
            info!("telemetry context initialized");
        });
    }

    /// Derive the user-agent string for outbound requests.
    pub fn user_agent(&self, fallback: &str) -> String {
        UserAgentBuilder::new(&self.facts, self.host_app.as_ref(), self.plugins.as_ref())
            .build(fallback)
    }

    /// Anonymized user id: hex-encoded SHA-1 of `<username>@<hostname>`.
    ///
    /// Deterministic for a given machine and user, and never decoded back.
    /// A failed hostname lookup hashes against the `"Unknown"` placeholder.
    pub fn user_id(&self) -> String {
        let username = self.facts.username();
        let hostname = self.facts.hostname();
        let identity = format!("{}@{}", username, hostname);

        let mut hasher = Sha1::new();
        hasher.update(identity.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn host_descriptor(&self) -> HostAppDescriptor {
        match self.host_app.descriptor() {
            Ok(descriptor) => descriptor,
            Err(err) => {
                warn!("host application descriptor unavailable: {err}");
                HostAppDescriptor::default()
            }
        }
    }

    fn apply_instrumentation_key(&self, context: &mut TelemetryContext) {
        context.instrumentation_key = TelemetryConfig::global().instrumentation_key.clone();
    }

    fn apply_properties(&self, properties: &mut HashMap<String, String>) {
        let mut put = |key: &str, value: String| {
            properties.insert(key.to_string(), value);
        };

        put(keys::PROP_USER_ID, self.user_id());

        let app = self.host_descriptor();
        put(keys::PROP_HOST_MAJOR_VERSION, app.major_version);
        put(keys::PROP_HOST_MINOR_VERSION, app.minor_version);
        put(keys::PROP_HOST_BUILD_NUMBER, app.build);
        put(keys::PROP_HOST_EXE_NAME, app.full_name);

        put(
            keys::PROP_COMPONENT_VERSION,
            host::resolve_component_version(self.plugins.as_ref()),
        );

        put(
            keys::PROP_PROCESSOR_ARCHITECTURE,
            self.facts.processor_architecture(),
        );
        put(keys::PROP_LOCALE_NAME, self.facts.locale_name());

        put(keys::PROP_OS_MAJOR_VERSION, self.facts.platform_major_version());
        put(keys::PROP_OS_MINOR_VERSION, self.facts.platform_minor_version());
        put(keys::PROP_OS_NAME, self.facts.platform_name());
        put(keys::PROP_OS_SHORT_NAME, self.facts.platform_short_name());
        put(keys::PROP_OS_FULL_NAME, self.facts.platform_full_name());

        put(keys::PROP_RUNTIME_NAME, self.facts.runtime_name());
        put(keys::PROP_RUNTIME_VERSION, self.facts.runtime_version());
    }

    fn apply_user(&self, user: &mut UserContext) {
        user.id = self.user_id();
        user.user_agent = BUNDLE_NAME.to_string();
    }

    fn apply_component(&self, component: &mut ComponentContext) {
        component.version = host::resolve_component_version(self.plugins.as_ref());
    }

    fn apply_device(&self, device: &mut DeviceContext) {
        device.operating_system = self.facts.platform_name();
        device.operating_system_version = self.facts.platform_version();
    }

    fn apply_tags(&self, tags: &mut HashMap<String, String>) {
        tags.insert(self.tag_keys.application_id.clone(), BUNDLE_NAME.to_string());
        tags.insert(self.tag_keys.device_os.clone(), self.facts.platform_name());
        tags.insert(
            self.tag_keys.device_os_version.clone(),
            self.facts.platform_version(),
        );
    }

    fn apply_session(&self, session: &mut SessionContext) {
        session.id = Uuid::new_v4().to_string();
    }
}
