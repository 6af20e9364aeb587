use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize, Serializer};

pub use self::{
    aggregate::{compare, max_position, max_version, min_position, min_version},
    error::{Error, Validation},
    input::{Components, Input},
};

pub mod aggregate;
mod error;
mod input;

pub type VersionSegment = u64;

#[derive(
    Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Deserialize,
)]
#[serde(try_from = "Input")]
#[must_use]
pub struct Version {
    major: VersionSegment,
    minor: VersionSegment,
    patch: VersionSegment,
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!(
            "{}.{}.{}",
            self.major, self.minor, self.patch
        ))
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl Version {
    /// Version assumed when none is given, `0.1.0`.
    pub const DEFAULT: Self = Self::new(0, 1, 0);

    pub const fn new(
        major: VersionSegment,
        minor: VersionSegment,
        patch: VersionSegment,
    ) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Normalizes any accepted input shape into a version.
    pub fn from_input<T>(input: T) -> Result<Self, Error>
    where
        T: Into<Input>,
    {
        Self::try_from(input.into())
    }

    #[must_use]
    pub const fn major(&self) -> VersionSegment {
        self.major
    }

    #[must_use]
    pub const fn minor(&self) -> VersionSegment {
        self.minor
    }

    #[must_use]
    pub const fn patch(&self) -> VersionSegment {
        self.patch
    }

    /// Compares against either a version or raw input, normalizing the
    /// latter first. Normalization failures are returned instead of being
    /// treated as an ordering.
    pub fn compare_to<T>(&self, other: T) -> Result<Ordering, Error>
    where
        T: IntoVersion,
    {
        other.into_version().map(|other| self.cmp(&other))
    }

    pub const fn bump_major(self) -> Self {
        Self::new(self.major + 1, 0, 0)
    }

    pub const fn bump_minor(self) -> Self {
        Self::new(self.major, self.minor + 1, 0)
    }

    pub const fn bump_patch(self) -> Self {
        Self::new(self.major, self.minor, self.patch + 1)
    }
}

impl Default for Version {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(Input::from(s))
    }
}

/// Explicit conversion step taken by every comparison against raw input.
pub trait IntoVersion {
    fn into_version(self) -> Result<Version, Error>;
}

impl IntoVersion for Version {
    #[inline]
    fn into_version(self) -> Result<Version, Error> {
        Ok(self)
    }
}

impl IntoVersion for &Version {
    #[inline]
    fn into_version(self) -> Result<Version, Error> {
        Ok(*self)
    }
}

impl<const N: usize> IntoVersion for [i128; N] {
    #[inline]
    fn into_version(self) -> Result<Version, Error> {
        Version::from_input(self)
    }
}

impl<const N: usize> IntoVersion for &[i128; N] {
    #[inline]
    fn into_version(self) -> Result<Version, Error> {
        Version::from_input(self)
    }
}

macro_rules! impl_into_version_through_input {
    ($($type:ty),+ $(,)?) => {
        $(
            impl IntoVersion for $type {
                #[inline]
                fn into_version(self) -> Result<Version, Error> {
                    Version::from_input(self)
                }
            }
        )+
    };
}

impl_into_version_through_input![
    (),
    Input,
    &Input,
    &str,
    String,
    &String,
    i128,
    &i128,
    Vec<i128>,
    &Vec<i128>,
    &[i128],
    (i128,),
    (i128, i128),
    (i128, i128, i128),
    Components,
    &Components,
];

/// Comparisons against raw input normalize it through [`IntoVersion`]. Input
/// that fails to normalize is incomparable: every relation is `false` and
/// `!=` is `true`. Use [`Version::compare_to`] when the input is untrusted,
/// since it returns the normalization error instead.
macro_rules! impl_raw_comparisons {
    ($($type:ty),+ $(,)?) => {
        $(
            impl PartialEq<$type> for Version {
                #[inline]
                fn eq(&self, other: &$type) -> bool {
                    self.compare_to(other).is_ok_and(Ordering::is_eq)
                }
            }

            impl PartialOrd<$type> for Version {
                #[inline]
                fn partial_cmp(&self, other: &$type) -> Option<Ordering> {
                    self.compare_to(other).ok()
                }
            }

            impl PartialEq<Version> for $type {
                #[inline]
                fn eq(&self, other: &Version) -> bool {
                    other.eq(self)
                }
            }

            impl PartialOrd<Version> for $type {
                #[inline]
                fn partial_cmp(&self, other: &Version) -> Option<Ordering> {
                    other.partial_cmp(self).map(Ordering::reverse)
                }
            }
        )+
    };
}

impl_raw_comparisons![str, String, i128, Input, Components, Vec<i128>, [i128]];

// Text that fails to normalize is incomparable here as well; untrusted text
// goes through `Version::compare_to`.
impl PartialEq<&str> for Version {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.compare_to(*other).is_ok_and(Ordering::is_eq)
    }
}

impl PartialOrd<&str> for Version {
    #[inline]
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        self.compare_to(*other).ok()
    }
}

impl PartialEq<Version> for &str {
    #[inline]
    fn eq(&self, other: &Version) -> bool {
        other.eq(self)
    }
}

impl PartialOrd<Version> for &str {
    #[inline]
    fn partial_cmp(&self, other: &Version) -> Option<Ordering> {
        other.partial_cmp(self).map(Ordering::reverse)
    }
}
