//! Platform fact provider.
//!
//! Pure string derivations over a [`FactSource`], plus the two facts that are
//! expensive to compute: hostname resolution and the Linux distribution
//! lookup. Both are computed at most once per provider lifetime; a failed
//! attempt is cached as its default so the cost is never paid twice.

use std::sync::OnceLock;

use tracing::warn;

use crate::distro;
use crate::facts::{FactError, FactSource, SystemFactSource};
use crate::UNKNOWN;

const LINUX_OS_NAME: &str = "Linux";

/// Supplies the normalized host/platform/runtime facts the resolver needs.
pub struct PlatformFacts {
    source: Box<dyn FactSource>,
    hostname: OnceLock<String>,
    distribution: OnceLock<String>,
}

impl PlatformFacts {
    pub fn new(source: Box<dyn FactSource>) -> Self {
        Self {
            source,
            hostname: OnceLock::new(),
            distribution: OnceLock::new(),
        }
    }

    /// Provider backed by the live host.
    pub fn system() -> Self {
        Self::new(Box::new(SystemFactSource))
    }

    /// OS name as reported by the platform, or `""`.
    pub fn platform_name(&self) -> String {
        self.fact(self.source.os_name(), "os name")
    }

    /// OS version string, or `""`.
    pub fn platform_version(&self) -> String {
        self.fact(self.source.os_version(), "os version")
    }

    /// First whitespace-delimited token of the OS name.
    pub fn platform_short_name(&self) -> String {
        self.platform_name()
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string()
    }

    /// OS version before the first `.`; the whole string when it has no `.`.
    pub fn platform_major_version(&self) -> String {
        let version = self.platform_version();
        match version.split_once('.') {
            Some((major, _)) => major.to_string(),
            None => version,
        }
    }

    /// OS version after the first `.`; `""` when it has no `.`.
    pub fn platform_minor_version(&self) -> String {
        let version = self.platform_version();
        match version.split_once('.') {
            Some((_, minor)) => minor.to_string(),
            None => String::new(),
        }
    }

    /// `<name> (<version>)`, with the distribution substituted for the
    /// version on Linux.
    pub fn platform_full_name(&self) -> String {
        let name = self.platform_name();
        let detail = if name.eq_ignore_ascii_case(LINUX_OS_NAME) {
            self.linux_distribution()
        } else {
            self.platform_version()
        };
        format!("{} ({})", name, detail)
    }

    /// Uppercased processor architecture, or `""`.
    pub fn processor_architecture(&self) -> String {
        self.fact(self.source.arch(), "processor architecture")
            .to_uppercase()
    }

    /// Display locale, or `""`.
    pub fn locale_name(&self) -> String {
        self.fact(self.source.locale(), "locale")
    }

    /// OS user running the process, or `""`.
    pub fn username(&self) -> String {
        self.fact(self.source.username(), "username")
    }

    /// Runtime name, or `""`.
    pub fn runtime_name(&self) -> String {
        self.fact(self.source.runtime_name(), "runtime name")
    }

    /// Runtime version, or `""`.
    pub fn runtime_version(&self) -> String {
        self.fact(self.source.runtime_version(), "runtime version")
    }

    /// Local host name, `"Unknown"` when resolution fails.
    ///
    /// Resolution can take several seconds on some hosts, so the first
    /// outcome (success or failure) is kept for the provider lifetime.
    pub fn hostname(&self) -> String {
        self.hostname
            .get_or_init(|| match self.source.hostname() {
                Ok(hostname) => hostname,
                Err(err) => {
                    warn!("could not resolve hostname: {err}");
                    UNKNOWN.to_string()
                }
            })
            .clone()
    }

    /// `"<name> - <version>"` of the Linux distribution, each half
    /// `"Unknown"` when not found. Computed at most once.
    pub fn linux_distribution(&self) -> String {
        self.distribution
            .get_or_init(|| match self.source.release_text() {
                Ok(text) => distro::parse_distribution(&text),
                Err(err) => {
                    warn!("could not read release files: {err}");
                    format!("{} - {}", UNKNOWN, UNKNOWN)
                }
            })
            .clone()
    }

    fn fact(&self, fact: Result<String, FactError>, what: &str) -> String {
        match fact {
            Ok(value) => value,
            Err(err) => {
                warn!("{what} lookup degraded: {err}");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Fact source with fixed values and per-slow-fact call counters.
    struct FakeFacts {
        os_name: Result<&'static str, ()>,
        os_version: Result<&'static str, ()>,
        hostname: Result<&'static str, ()>,
        release_text: Result<&'static str, ()>,
        hostname_calls: Arc<AtomicUsize>,
        release_calls: Arc<AtomicUsize>,
    }

    impl FakeFacts {
        fn new() -> Self {
            Self {
                os_name: Ok("Linux"),
                os_version: Ok("6.5.0"),
                hostname: Ok("build-host"),
                release_text: Ok("NAME=\"Ubuntu\"\nVERSION=\"20.04\"\n"),
                hostname_calls: Arc::new(AtomicUsize::new(0)),
                release_calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn fixed(value: Result<&'static str, ()>, what: &'static str) -> Result<String, FactError> {
            value
                .map(str::to_string)
                .map_err(|_| FactError::Unavailable(what))
        }
    }

    impl FactSource for FakeFacts {
        fn os_name(&self) -> Result<String, FactError> {
            Self::fixed(self.os_name, "os name")
        }
        fn os_version(&self) -> Result<String, FactError> {
            Self::fixed(self.os_version, "os version")
        }
        fn arch(&self) -> Result<String, FactError> {
            Ok("x86_64".to_string())
        }
        fn username(&self) -> Result<String, FactError> {
            Ok("tester".to_string())
        }
        fn locale(&self) -> Result<String, FactError> {
            Ok("en-US".to_string())
        }
        fn runtime_name(&self) -> Result<String, FactError> {
            Ok("Rust".to_string())
        }
        fn runtime_version(&self) -> Result<String, FactError> {
            Ok("1.76.0".to_string())
        }
        fn hostname(&self) -> Result<String, FactError> {
            self.hostname_calls.fetch_add(1, Ordering::SeqCst);
            Self::fixed(self.hostname, "hostname")
        }
        fn release_text(&self) -> Result<String, FactError> {
            self.release_calls.fetch_add(1, Ordering::SeqCst);
            Self::fixed(self.release_text, "release text")
        }
    }

    fn provider(facts: FakeFacts) -> PlatformFacts {
        PlatformFacts::new(Box::new(facts))
    }

    #[test]
    fn test_major_minor_split() {
        let mut facts = FakeFacts::new();
        facts.os_version = Ok("10.15.7");
        let platform = provider(facts);
        assert_eq!(platform.platform_major_version(), "10");
        assert_eq!(platform.platform_minor_version(), "15.7");
    }

    #[test]
    fn test_major_minor_without_dot() {
        let mut facts = FakeFacts::new();
        facts.os_version = Ok("10");
        let platform = provider(facts);
        assert_eq!(platform.platform_major_version(), "10");
        assert_eq!(platform.platform_minor_version(), "");
    }

    #[test]
    fn test_short_name() {
        let mut facts = FakeFacts::new();
        facts.os_name = Ok("Windows 10");
        let platform = provider(facts);
        assert_eq!(platform.platform_short_name(), "Windows");
    }

    #[test]
    fn test_short_name_of_empty_name() {
        let mut facts = FakeFacts::new();
        facts.os_name = Ok("");
        let platform = provider(facts);
        assert_eq!(platform.platform_short_name(), "");
    }

    #[test]
    fn test_full_name_substitutes_distribution_on_linux() {
        let platform = provider(FakeFacts::new());
        assert_eq!(platform.platform_full_name(), "Linux (Ubuntu - 20.04)");
    }

    #[test]
    fn test_full_name_unknown_distribution() {
        let mut facts = FakeFacts::new();
        facts.release_text = Ok("ID=ubuntu\n");
        let platform = provider(facts);
        assert_eq!(platform.platform_full_name(), "Linux (Unknown - Unknown)");
    }

    #[test]
    fn test_full_name_uses_version_elsewhere() {
        let mut facts = FakeFacts::new();
        facts.os_name = Ok("Windows 10");
        facts.os_version = Ok("10.0");
        let platform = provider(facts);
        assert_eq!(platform.platform_full_name(), "Windows 10 (10.0)");
    }

    #[test]
    fn test_processor_architecture_uppercased() {
        let platform = provider(FakeFacts::new());
        assert_eq!(platform.processor_architecture(), "X86_64");
    }

    #[test]
    fn test_degraded_fact_is_empty_string() {
        let mut facts = FakeFacts::new();
        facts.os_name = Err(());
        facts.os_version = Err(());
        let platform = provider(facts);
        assert_eq!(platform.platform_name(), "");
        assert_eq!(platform.platform_version(), "");
        assert_eq!(platform.platform_major_version(), "");
        assert_eq!(platform.platform_minor_version(), "");
    }

    #[test]
    fn test_hostname_cached_after_first_success() {
        let facts = FakeFacts::new();
        let calls = facts.hostname_calls.clone();
        let platform = provider(facts);
        assert_eq!(platform.hostname(), "build-host");
        assert_eq!(platform.hostname(), "build-host");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_hostname_failure_cached_as_unknown() {
        let mut facts = FakeFacts::new();
        facts.hostname = Err(());
        let calls = facts.hostname_calls.clone();
        let platform = provider(facts);
        assert_eq!(platform.hostname(), "Unknown");
        assert_eq!(platform.hostname(), "Unknown");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_distribution_computed_once() {
        let facts = FakeFacts::new();
        let calls = facts.release_calls.clone();
        let platform = provider(facts);
        assert_eq!(platform.linux_distribution(), "Ubuntu - 20.04");
        assert_eq!(platform.linux_distribution(), "Ubuntu - 20.04");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
