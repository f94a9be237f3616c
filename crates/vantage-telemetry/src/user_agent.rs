//! User-agent derivation.
//!
//! Fixed template:
//! `<product>/<component-version> (<app-identifier>; <platform-full-name>; <runtime-name>/<runtime-version>) <fallback>`
//! where the app identifier is `<app-full-name>/<major>.<minor>.<build>`.
//! The caller always receives a usable string: any failure while assembling
//! degrades to the fallback unchanged.

use tracing::warn;

use crate::facts::FactError;
use crate::host::{self, HostApplication, PluginVersionProvider};
use crate::platform::PlatformFacts;
use crate::USER_AGENT_PRODUCT;

pub struct UserAgentBuilder<'a> {
    facts: &'a PlatformFacts,
    host_app: &'a dyn HostApplication,
    plugins: &'a dyn PluginVersionProvider,
}

impl<'a> UserAgentBuilder<'a> {
    pub fn new(
        facts: &'a PlatformFacts,
        host_app: &'a dyn HostApplication,
        plugins: &'a dyn PluginVersionProvider,
    ) -> Self {
        Self {
            facts,
            host_app,
            plugins,
        }
    }

    /// Build the user-agent string, or return `fallback` unmodified when the
    /// host application metadata is unavailable.
    pub fn build(&self, fallback: &str) -> String {
        match self.try_build(fallback) {
            Ok(user_agent) => user_agent,
            Err(err) => {
                warn!("could not derive user agent: {err}");
                fallback.to_string()
            }
        }
    }

    fn try_build(&self, fallback: &str) -> Result<String, FactError> {
        Ok(format!(
            "{}/{} ({}; {}; {}/{}) {}",
            USER_AGENT_PRODUCT,
            host::resolve_component_version(self.plugins),
            self.application_identifier()?,
            self.facts.platform_full_name(),
            self.facts.runtime_name(),
            self.facts.runtime_version(),
            fallback
        ))
    }

    /// `<app-full-name>/<major>.<minor>.<build>`
    fn application_identifier(&self) -> Result<String, FactError> {
        let app = self.host_app.descriptor()?;
        Ok(format!(
            "{}/{}.{}.{}",
            app.full_name, app.major_version, app.minor_version, app.build
        ))
    }
}
