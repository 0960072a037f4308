//! Host version model
//!
//! Host versions are `(major, minor, patch)` tuples. Partial tuples such as
//! `(2, 93)` are normalised by treating missing trailing components as 0, so
//! `(2, 93) == (2, 93, 0)` and comparisons are plain lexicographic ordering.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while parsing a version string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Empty version string")]
    Empty,

    #[error("Version has too many components: {0}")]
    TooManyComponents(String),

    #[error("Invalid version component '{component}' in '{input}'")]
    InvalidComponent { input: String, component: String },

    #[error("Unknown version cycle: {0}")]
    UnknownCycle(String),
}

/// A host version as an ordered 3-tuple
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl HostVersion {
    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Version from a tuple that omits the patch component
    pub const fn partial(major: u16, minor: u16) -> Self {
        Self::new(major, minor, 0)
    }

    pub fn as_tuple(&self) -> (u16, u16, u16) {
        (self.major, self.minor, self.patch)
    }
}

impl From<(u16, u16, u16)> for HostVersion {
    fn from((major, minor, patch): (u16, u16, u16)) -> Self {
        Self::new(major, minor, patch)
    }
}

impl From<(u16, u16)> for HostVersion {
    fn from((major, minor): (u16, u16)) -> Self {
        Self::partial(major, minor)
    }
}

impl From<u16> for HostVersion {
    fn from(major: u16) -> Self {
        Self::new(major, 0, 0)
    }
}

impl fmt::Display for HostVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for HostVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(VersionError::Empty);
        }

        let mut parts = [0u16; 3];
        let components: Vec<&str> = input.split('.').collect();
        if components.len() > parts.len() {
            return Err(VersionError::TooManyComponents(input.to_string()));
        }

        for (slot, component) in parts.iter_mut().zip(&components) {
            *slot = component
                .parse()
                .map_err(|_| VersionError::InvalidComponent {
                    input: input.to_string(),
                    component: component.to_string(),
                })?;
        }

        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

impl Serialize for HostVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HostVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Release cycle of a host build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionCycle {
    Alpha,
    Beta,
    Rc,
    #[default]
    Release,
}

impl VersionCycle {
    pub fn is_release(&self) -> bool {
        matches!(self, Self::Release)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Rc => "rc",
            Self::Release => "release",
        }
    }
}

impl FromStr for VersionCycle {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alpha" => Ok(Self::Alpha),
            "beta" => Ok(Self::Beta),
            "rc" => Ok(Self::Rc),
            "release" => Ok(Self::Release),
            other => Err(VersionError::UnknownCycle(other.to_string())),
        }
    }
}

impl fmt::Display for VersionCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accessor for the running host's version
///
/// Consumed once, when the layout registry is initialised.
pub trait HostInfo {
    fn version(&self) -> HostVersion;

    fn version_cycle(&self) -> VersionCycle {
        VersionCycle::Release
    }
}

/// A host description with a fixed version, for tools and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticHost {
    pub version: HostVersion,
    pub cycle: VersionCycle,
}

impl StaticHost {
    pub fn new(version: impl Into<HostVersion>) -> Self {
        Self {
            version: version.into(),
            cycle: VersionCycle::Release,
        }
    }

    pub fn with_cycle(mut self, cycle: VersionCycle) -> Self {
        self.cycle = cycle;
        self
    }
}

impl HostInfo for StaticHost {
    fn version(&self) -> HostVersion {
        self.version
    }

    fn version_cycle(&self) -> VersionCycle {
        self.cycle
    }
}
