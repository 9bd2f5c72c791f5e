// src/core/environment.rs
//
// Collaborators the gate reads at startup. The host plugin wires real
// implementations; tests substitute mocks.

#[cfg_attr(test, mockall::automock)]
pub trait VersionSource {
    /// Raw version string of the running server platform,
    /// e.g. "1.21.4-release-abc".
    fn platform_version(&self) -> String;

    /// Raw version string of the host language runtime, e.g. "21.0.2".
    fn runtime_version(&self) -> String;
}

#[cfg_attr(test, mockall::automock)]
pub trait ReleaseInfo {
    /// Whether this build is the restricted community edition, which is held
    /// to the latest known-good platform version.
    fn is_community_edition(&self) -> bool;

    /// The release branch this build was cut from, or None when the branch
    /// metadata is unset.
    fn branch(&self) -> Option<String>;

    /// The plugin's own version, e.g. "2.1.0".
    fn plugin_version(&self) -> String;
}

/// An unset branch never matches a name; only a set, equal branch does.
pub fn is_branch(release: &dyn ReleaseInfo, name: &str) -> bool {
    release.branch().as_deref() == Some(name)
}

/// Version source backed by environment variables, used by the preflight
/// binary. Hosts embedding the gate implement VersionSource against their
/// platform API instead.
#[derive(Debug, Default)]
pub struct EnvVersionSource;

impl EnvVersionSource {
    const PLATFORM_VAR: &'static str = "LAUNCHGATE_PLATFORM_VERSION";
    const RUNTIME_VAR: &'static str = "LAUNCHGATE_RUNTIME_VERSION";
}

impl VersionSource for EnvVersionSource {
    fn platform_version(&self) -> String {
        std::env::var(Self::PLATFORM_VAR).unwrap_or_default()
    }

    fn runtime_version(&self) -> String {
        std::env::var(Self::RUNTIME_VAR).unwrap_or_default()
    }
}

/// Release facts for this build of the crate itself.
#[derive(Debug, Clone)]
pub struct BuildReleaseInfo {
    pub community_edition: bool,
    pub branch: Option<String>,
}

impl ReleaseInfo for BuildReleaseInfo {
    fn is_community_edition(&self) -> bool {
        self.community_edition
    }

    fn branch(&self) -> Option<String> {
        self.branch.clone()
    }

    fn plugin_version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_owned()
    }
}
