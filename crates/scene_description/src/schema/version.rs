//! Target engine version resolution

use super::builtin::BUILTIN_ENGINE_VERSION;

/// Environment variable naming the installed engine version
pub const ENGINE_VERSION_ENV: &str = "MITSUBA_VERSION";

/// Source of the installed engine version
pub trait VersionProbe {
    /// Version of the installed engine, if one can be detected
    fn installed_version(&self) -> Option<String>;
}

/// Reads the installed version from [`ENGINE_VERSION_ENV`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvVersionProbe;

impl VersionProbe for EnvVersionProbe {
    fn installed_version(&self) -> Option<String> {
        std::env::var(ENGINE_VERSION_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Where a resolved version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    /// Explicit caller override
    Override,
    /// Detected installed engine
    Detected,
    /// Built-in fallback
    Fallback,
}

/// Engine version chosen for schema selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    /// Version string, e.g. `"3.6.4"`
    pub version: String,
    /// How it was chosen
    pub source: VersionSource,
}

/// Resolve the target engine version
///
/// Order: explicit override, then the probe, then [`BUILTIN_ENGINE_VERSION`].
pub fn resolve_engine_version(explicit: Option<&str>, probe: &dyn VersionProbe) -> ResolvedVersion {
    let resolved = if let Some(version) = explicit.map(str::trim).filter(|v| !v.is_empty()) {
        ResolvedVersion {
            version: version.to_string(),
            source: VersionSource::Override,
        }
    } else if let Some(version) = probe.installed_version() {
        ResolvedVersion {
            version,
            source: VersionSource::Detected,
        }
    } else {
        ResolvedVersion {
            version: BUILTIN_ENGINE_VERSION.to_string(),
            source: VersionSource::Fallback,
        }
    };
    log::debug!("Target engine version {} ({:?})", resolved.version, resolved.source);
    resolved
}
