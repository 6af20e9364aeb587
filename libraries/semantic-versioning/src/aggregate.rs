use std::cmp::Ordering;

use crate::{Error, IntoVersion, Version};

/// Signed comparison of two inputs: `-1`, `0` or `1`.
pub fn compare<A, B>(version_a: A, version_b: B) -> Result<i8, Error>
where
    A: IntoVersion,
    B: IntoVersion,
{
    version_a
        .into_version()
        .and_then(|version_a| version_a.compare_to(version_b))
        .map(|ordering| match ordering {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        })
}

/// Greatest of the given versions. Among equal versions the last one is
/// selected.
pub fn max_version<I>(versions: I) -> Result<Version, Error>
where
    I: IntoIterator,
    I::Item: IntoVersion,
{
    max_position(versions).map(|(_, version)| version)
}

/// Least of the given versions. Among equal versions the first one is
/// selected.
pub fn min_version<I>(versions: I) -> Result<Version, Error>
where
    I: IntoIterator,
    I::Item: IntoVersion,
{
    min_position(versions).map(|(_, version)| version)
}

/// Same as [`max_version`], additionally returning the index of the selected
/// element.
pub fn max_position<I>(versions: I) -> Result<(usize, Version), Error>
where
    I: IntoIterator,
    I::Item: IntoVersion,
{
    select(versions, Ordering::is_ge)
}

/// Same as [`min_version`], additionally returning the index of the selected
/// element.
pub fn min_position<I>(versions: I) -> Result<(usize, Version), Error>
where
    I: IntoIterator,
    I::Item: IntoVersion,
{
    select(versions, Ordering::is_lt)
}

/// Left fold in which the next element replaces the accumulator whenever
/// `replaces` accepts the ordering of the next element relative to it.
fn select<I>(
    versions: I,
    replaces: fn(Ordering) -> bool,
) -> Result<(usize, Version), Error>
where
    I: IntoIterator,
    I::Item: IntoVersion,
{
    let mut versions = versions.into_iter().enumerate();

    let first = versions
        .next()
        .ok_or(Error::EmptyInput)
        .and_then(|(position, version)| {
            version.into_version().map(|version| (position, version))
        })?;

    versions.try_fold(first, |selected, (position, version)| {
        version.into_version().map(|version| {
            if replaces(version.cmp(&selected.1)) {
                (position, version)
            } else {
                selected
            }
        })
    })
}
