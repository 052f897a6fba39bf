//! Version ranges for the SemVer descriptor kind.
//!
//! The type system treats semantic versions as opaque scalar values; the
//! `semver` crate supplies parsing and ordering. A [`VersionRange`] is an
//! inclusive interval of versions, the payload of the SemVer descriptor.
//! The engine only ever uses the two operations below: membership
//! ([`VersionRange::is_included`]) and intersection
//! ([`VersionRange::intersect`]); everything else about version algebra
//! stays outside the core.

use semver::Version;
use std::fmt;

/// An inclusive range of semantic versions.
///
/// `upper == None` means the range is open-ended upward.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VersionRange {
    lower: Version,
    upper: Option<Version>,
}

impl VersionRange {
    /// Range covering exactly one version.
    pub fn exact(version: Version) -> Self {
        Self {
            lower: version.clone(),
            upper: Some(version),
        }
    }

    /// Inclusive range `lower..=upper`. Bounds are swapped if given in the
    /// wrong order.
    pub fn new(lower: Version, upper: Version) -> Self {
        if upper < lower {
            Self {
                lower: upper,
                upper: Some(lower),
            }
        } else {
            Self {
                lower,
                upper: Some(upper),
            }
        }
    }

    /// Range covering `lower` and every later version.
    pub fn at_least(lower: Version) -> Self {
        Self { lower, upper: None }
    }

    pub fn lower(&self) -> &Version {
        &self.lower
    }

    pub fn upper(&self) -> Option<&Version> {
        self.upper.as_ref()
    }

    /// Is `version` inside this range?
    pub fn is_included(&self, version: &Version) -> bool {
        if *version < self.lower {
            return false;
        }
        match &self.upper {
            Some(upper) => version <= upper,
            None => true,
        }
    }

    /// Does this range cover all of `other`?
    pub fn includes_range(&self, other: &Self) -> bool {
        if other.lower < self.lower {
            return false;
        }
        match (&self.upper, &other.upper) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(mine), Some(theirs)) => theirs <= mine,
        }
    }

    /// Intersection of two ranges, or `None` when they are disjoint.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let lower = if self.lower >= other.lower {
            self.lower.clone()
        } else {
            other.lower.clone()
        };
        let upper = match (&self.upper, &other.upper) {
            (None, None) => None,
            (Some(u), None) | (None, Some(u)) => Some(u.clone()),
            (Some(a), Some(b)) => Some(if a <= b { a.clone() } else { b.clone() }),
        };
        if let Some(upper) = &upper
            && *upper < lower
        {
            return None;
        }
        Some(Self { lower, upper })
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.upper {
            Some(upper) if *upper == self.lower => write!(f, "{}", self.lower),
            Some(upper) => write!(f, "{} - {}", self.lower, upper),
            None => write!(f, ">={}", self.lower),
        }
    }
}

#[cfg(test)]
#[path = "../tests/version_tests.rs"]
mod version_tests;
