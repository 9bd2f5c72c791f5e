// src/core/version.rs
use crate::utils::error::{GateError, Result};

/// A loosely-formatted version string broken into its numeric components.
///
/// The raw string is split on `.` and `-`; the leading run of numeric tokens
/// forms the comparable value, while every token (including a trailing build
/// tag like `release`) is kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    components: Vec<u64>,
    tokens: Vec<String>,
}

impl Version {
    pub fn parse(raw: &str) -> Result<Self> {
        let tokens: Vec<String> = raw
            .split(['.', '-'])
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .collect();

        let components: Vec<u64> = tokens
            .iter()
            .map_while(|t| t.parse::<u64>().ok())
            .collect();

        if components.is_empty() {
            return Err(GateError::VersionParse(raw.to_owned()));
        }

        Ok(Self { components, tokens })
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// The major.minor pair, required by the platform and runtime checks.
    pub fn major_minor(&self) -> Result<Version> {
        if self.components.len() < 2 {
            return Err(GateError::Version(format!(
                "expected major.minor, got {}",
                self
            )));
        }
        Ok(self.truncated(2))
    }

    /// First `n` numeric components (fewer if the version is shorter).
    pub fn truncated(&self, n: usize) -> Version {
        let keep = n.min(self.components.len());
        Version {
            components: self.components[..keep].to_vec(),
            tokens: self.tokens[..keep].to_vec(),
        }
    }

    /// The minor component, stored into configuration on gate success.
    pub fn minor(&self) -> Result<u64> {
        self.components.get(1).copied().ok_or_else(|| {
            GateError::Version(format!("no minor component in {}", self))
        })
    }

    /// Raw-token rendering of major.minor plus the third token when present,
    /// numeric or not. This is the form shown in messages and matched by the
    /// point-release advisory.
    pub fn display_triplet(&self) -> String {
        self.tokens[..self.tokens.len().min(3)].join(".")
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.components.iter().map(u64::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Returns true iff `candidate` is strictly greater than `bound`, comparing
/// component-wise up to the length of the shorter operand. Missing trailing
/// components are absent, not zero: "1.21.5" against "1.21" compares as equal
/// and is therefore not newer.
pub fn is_newer(candidate: &Version, bound: &Version) -> bool {
    let shared = candidate.components.len().min(bound.components.len());
    candidate.components[..shared] > bound.components[..shared]
}
