// src/core/gate.rs
use tracing::{debug, error, info};

use crate::core::environment::{is_branch, ReleaseInfo, VersionSource};
use crate::core::messages::{ConsoleSink, Message};
use crate::core::version::{is_newer, Version};
use crate::utils::config::GateConfig;
use crate::utils::error::Result;

/// Point release that works but is known to misbehave; flagged on the
/// console without blocking startup.
const FLAGGED_PLATFORM_RELEASE: &str = "1.21.11";

/// Branch exempt from the minimum-patch check.
const DEV_BRANCH: &str = "dev";

#[derive(Debug)]
enum CheckResult {
    Pass,
    Fail(Message),
    Warn(Message),
}

/// Result of one gate run: the go/no-go decision plus every message the
/// checks emitted, in emission order.
#[derive(Debug)]
pub struct GateOutcome {
    pub passed: bool,
    pub messages: Vec<Message>,
}

/// Startup compatibility gate. Runs once, synchronously, before the plugin
/// activates; a false outcome means the host must abort activation.
pub struct CompatGate<'a, S, R> {
    config: &'a GateConfig,
    source: &'a S,
    release: &'a R,
}

impl<'a, S, R> CompatGate<'a, S, R>
where
    S: VersionSource,
    R: ReleaseInfo,
{
    pub fn new(config: &'a GateConfig, source: &'a S, release: &'a R) -> Self {
        Self {
            config,
            source,
            release,
        }
    }

    /// Execute the check sequence. Any unexpected fault inside a check is
    /// caught here, logged at error level, and turned into a failed outcome;
    /// nothing above the gate ever sees a raised error.
    pub fn run(&self, sink: &mut dyn ConsoleSink) -> GateOutcome {
        let mut outcome = GateOutcome {
            passed: false,
            messages: Vec::new(),
        };

        match self.run_checks(sink, &mut outcome) {
            Ok(passed) => outcome.passed = passed,
            Err(e) => {
                error!(error = %e, "unexpected fault during version checks");
            }
        }

        outcome
    }

    fn run_checks(
        &self,
        sink: &mut dyn ConsoleSink,
        outcome: &mut GateOutcome,
    ) -> Result<bool> {
        let platform = Version::parse(&self.source.platform_version())?;

        // Checks run in this exact order; the first Fail ends the sequence
        // before any later check executes.
        if !Self::apply(self.check_minimum_platform(&platform)?, sink, outcome) {
            return Ok(false);
        }
        if !Self::apply(self.check_latest_platform(&platform)?, sink, outcome) {
            return Ok(false);
        }
        Self::apply(self.check_flagged_release(&platform), sink, outcome);
        if !Self::apply(self.check_minimum_runtime()?, sink, outcome) {
            return Ok(false);
        }
        if !Self::apply(self.check_minimum_patch()?, sink, outcome) {
            return Ok(false);
        }
        Self::apply(self.check_branch(), sink, outcome);

        // All fail-capable checks passed; record the detected server minor
        // version for the rest of the host application.
        let minor = platform.minor()?;
        self.config.store_server_minor(minor);
        info!(server_minor = minor, "version checks passed");

        Ok(true)
    }

    /// Emit the message carried by a Warn or Fail; returns false when the
    /// sequence must stop.
    fn apply(check: CheckResult, sink: &mut dyn ConsoleSink, outcome: &mut GateOutcome) -> bool {
        match check {
            CheckResult::Pass => true,
            CheckResult::Warn(message) => {
                outcome.messages.push(message.clone());
                sink.emit(message);
                true
            }
            CheckResult::Fail(message) => {
                outcome.messages.push(message.clone());
                sink.emit(message);
                false
            }
        }
    }

    /// Step 1: the platform must be at least the configured minimum.
    fn check_minimum_platform(&self, platform: &Version) -> Result<CheckResult> {
        let running = platform.major_minor()?;
        let minimum = Version::parse(&self.config.bounds.min_platform_version)?;

        if is_newer(&minimum, &running) {
            return Ok(CheckResult::Fail(Message::VersionRequired {
                subject: self.config.plugin.platform_name.clone(),
                required: self.config.bounds.min_platform_version.clone(),
            }));
        }
        Ok(CheckResult::Pass)
    }

    /// Step 2: running ahead of the latest known-good platform version is an
    /// error on the community edition only.
    fn check_latest_platform(&self, platform: &Version) -> Result<CheckResult> {
        let running = platform.truncated(3);
        let latest = Version::parse(&self.config.bounds.latest_platform_version)?;

        if is_newer(&running, &latest) && self.release.is_community_edition() {
            return Ok(CheckResult::Fail(Message::VersionIncompatible {
                subject: self.config.plugin.platform_name.clone(),
                version: platform.display_triplet(),
            }));
        }
        Ok(CheckResult::Pass)
    }

    /// Step 3: advisory for one specific flagged point release. Never fails.
    fn check_flagged_release(&self, platform: &Version) -> CheckResult {
        if platform.display_triplet() == FLAGGED_PLATFORM_RELEASE {
            return CheckResult::Warn(Message::Plain(format!(
                "[{}] Version {} is unsupported; there is no guarantee it will run without issues.",
                self.config.plugin.name, FLAGGED_PLATFORM_RELEASE
            )));
        }
        CheckResult::Pass
    }

    /// Step 4: the host runtime must be at least the configured minimum.
    /// Runtime version strings come in many shapes, so everything that is not
    /// a digit or a dot is stripped and a trailing ".0" guarantees a minor
    /// component ("21" becomes "21.0").
    fn check_minimum_runtime(&self) -> Result<CheckResult> {
        let raw = self.source.runtime_version();
        let digits: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        let running = Version::parse(&format!("{}.0", digits))?.major_minor()?;
        let minimum = Version::parse(&self.config.bounds.min_runtime_version)?;

        if is_newer(&minimum, &running) {
            return Ok(CheckResult::Fail(Message::VersionRequired {
                subject: self.config.plugin.runtime_name.clone(),
                required: self.config.bounds.min_runtime_version.clone(),
            }));
        }
        Ok(CheckResult::Pass)
    }

    /// Step 5: the plugin's own release must be at least the configured
    /// minimum patch, unless it was cut from the dev branch.
    fn check_minimum_patch(&self) -> Result<CheckResult> {
        let plugin_version = self.release.plugin_version();
        let running = Version::parse(&plugin_version)?;
        let minimum = Version::parse(&self.config.bounds.min_patch_version)?;

        if is_newer(&minimum, &running) && !is_branch(self.release, DEV_BRANCH) {
            return Ok(CheckResult::Fail(Message::VersionIncompatible {
                subject: self.config.plugin.name.clone(),
                version: format!("v{}", plugin_version),
            }));
        }
        Ok(CheckResult::Pass)
    }

    /// Step 6: an unset branch is tolerated without a message. A build with
    /// no branch metadata is common in local development; only a set branch
    /// participates in the dev exemption above.
    fn check_branch(&self) -> CheckResult {
        if self.release.branch().is_none() {
            debug!("release branch unset, continuing");
        }
        CheckResult::Pass
    }
}
