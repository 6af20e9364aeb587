use std::num::{IntErrorKind, ParseIntError};

use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{Error, Validation},
    Version, VersionSegment,
};

/// Every shape a version can be constructed from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum Input {
    Absent,
    Text(String),
    Sequence(Vec<i128>),
    Integer(i128),
    Mapping(Components),
}

/// Keyed components of a version. Missing keys are filled in during
/// normalization, with `minor` falling back to `1` when `major` ends up as
/// zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Components {
    pub major: Option<i128>,
    pub minor: Option<i128>,
    pub patch: Option<i128>,
}

impl Components {
    pub const fn new() -> Self {
        Self {
            major: None,
            minor: None,
            patch: None,
        }
    }

    pub const fn with_major(self, major: i128) -> Self {
        Self {
            major: Some(major),
            ..self
        }
    }

    pub const fn with_minor(self, minor: i128) -> Self {
        Self {
            minor: Some(minor),
            ..self
        }
    }

    pub const fn with_patch(self, patch: i128) -> Self {
        Self {
            patch: Some(patch),
            ..self
        }
    }
}

impl TryFrom<Input> for Version {
    type Error = Error;

    fn try_from(input: Input) -> Result<Self, Self::Error> {
        match input {
            Input::Absent => Ok(Self::DEFAULT),
            Input::Text(text) => from_text(&text),
            Input::Sequence(components) => from_sequence(&components),
            Input::Integer(major) => from_integer(major),
            Input::Mapping(components) => from_components(components),
        }
    }
}

fn from_text(text: &str) -> Result<Version, Error> {
    text.split('.')
        .map(parse_atom)
        .collect::<Result<Vec<i128>, _>>()
        .and_then(|atoms| from_sequence(&atoms))
}

/// Integers too wide even for `i128` are still integers, so they are
/// reported as out of range rather than unparsable.
fn parse_atom(atom: &str) -> Result<i128, Error> {
    atom.parse().map_err(|source: ParseIntError| match source.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            Validation::OutOfRange.into()
        },
        _ => Error::Parse {
            atom: atom.into(),
            source,
        },
    })
}

fn from_sequence(components: &[i128]) -> Result<Version, Error> {
    match *components {
        [] | [0] => Ok(Version::DEFAULT),
        [major] => segments(major, 0, 0),
        [major, minor] => segments(major, minor, 0),
        [major, minor, patch] => segments(major, minor, patch),
        _ => Err(Validation::TooManyComponents {
            count: components.len(),
        }
        .into()),
    }
}

fn from_integer(major: i128) -> Result<Version, Error> {
    segment(major).map(|major| {
        if major == 0 {
            Version::DEFAULT
        } else {
            Version::new(major, 0, 0)
        }
    })
}

fn from_components(
    Components {
        major,
        minor,
        patch,
    }: Components,
) -> Result<Version, Error> {
    let major = major.map_or(Ok(0), segment)?;

    let minor = minor.map_or(Ok(VersionSegment::from(major == 0)), segment)?;

    let patch = patch.map_or(Ok(0), segment)?;

    Ok(Version::new(major, minor, patch))
}

fn segments(major: i128, minor: i128, patch: i128) -> Result<Version, Error> {
    Ok(Version::new(segment(major)?, segment(minor)?, segment(patch)?))
}

fn segment(value: i128) -> Result<VersionSegment, Error> {
    VersionSegment::try_from(value).map_err(|_| {
        if value.is_negative() {
            Validation::Negative { value }
        } else {
            Validation::OutOfRange
        }
        .into()
    })
}

impl TryFrom<Value> for Input {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Self::Absent),
            Value::String(text) => Ok(Self::Text(text)),
            Value::Array(elements) => elements
                .iter()
                .map(integer)
                .collect::<Result<_, _>>()
                .map(Self::Sequence),
            Value::Object(entries) => {
                let component =
                    |key: &str| entries.get(key).map(integer).transpose();

                Ok(Self::Mapping(Components {
                    major: component("major")?,
                    minor: component("minor")?,
                    patch: component("patch")?,
                }))
            },
            value @ (Value::Bool(_) | Value::Number(_)) => {
                integer(&value).map(Self::Integer)
            },
        }
    }
}

fn integer(value: &Value) -> Result<i128, Error> {
    if let Value::Number(number) = value {
        number
            .as_u64()
            .map(i128::from)
            .or_else(|| number.as_i64().map(i128::from))
            .ok_or(Error::UnsupportedType {
                kind: "floating-point number",
            })
    } else {
        Err(Error::UnsupportedType {
            kind: match value {
                Value::Null => "null",
                Value::Bool(_) => "boolean",
                Value::Number(_) => "number",
                Value::String(_) => "string",
                Value::Array(_) => "sequence",
                Value::Object(_) => "mapping",
            },
        })
    }
}

impl From<()> for Input {
    #[inline]
    fn from((): ()) -> Self {
        Self::Absent
    }
}

impl<T> From<Option<T>> for Input
where
    T: Into<Input>,
{
    #[inline]
    fn from(input: Option<T>) -> Self {
        input.map_or(Self::Absent, Into::into)
    }
}

impl From<&Input> for Input {
    #[inline]
    fn from(input: &Input) -> Self {
        input.clone()
    }
}

impl From<&str> for Input {
    #[inline]
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for Input {
    #[inline]
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for Input {
    #[inline]
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl From<i128> for Input {
    #[inline]
    fn from(major: i128) -> Self {
        Self::Integer(major)
    }
}

impl From<&i128> for Input {
    #[inline]
    fn from(&major: &i128) -> Self {
        Self::Integer(major)
    }
}

impl From<Vec<i128>> for Input {
    #[inline]
    fn from(components: Vec<i128>) -> Self {
        Self::Sequence(components)
    }
}

impl From<&Vec<i128>> for Input {
    #[inline]
    fn from(components: &Vec<i128>) -> Self {
        Self::Sequence(components.clone())
    }
}

impl From<&[i128]> for Input {
    #[inline]
    fn from(components: &[i128]) -> Self {
        Self::Sequence(components.to_vec())
    }
}

impl<const N: usize> From<[i128; N]> for Input {
    #[inline]
    fn from(components: [i128; N]) -> Self {
        Self::Sequence(components.to_vec())
    }
}

impl<const N: usize> From<&[i128; N]> for Input {
    #[inline]
    fn from(components: &[i128; N]) -> Self {
        Self::Sequence(components.to_vec())
    }
}

impl From<(i128,)> for Input {
    #[inline]
    fn from((major,): (i128,)) -> Self {
        Self::Sequence(vec![major])
    }
}

impl From<(i128, i128)> for Input {
    #[inline]
    fn from((major, minor): (i128, i128)) -> Self {
        Self::Sequence(vec![major, minor])
    }
}

impl From<(i128, i128, i128)> for Input {
    #[inline]
    fn from((major, minor, patch): (i128, i128, i128)) -> Self {
        Self::Sequence(vec![major, minor, patch])
    }
}

impl From<Components> for Input {
    #[inline]
    fn from(components: Components) -> Self {
        Self::Mapping(components)
    }
}

impl From<&Components> for Input {
    #[inline]
    fn from(&components: &Components) -> Self {
        Self::Mapping(components)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        error::{Error, Validation},
        Version,
    };

    use super::{Components, Input};

    #[track_caller]
    fn assert_normalized<T>(input: T, (major, minor, patch): (u64, u64, u64))
    where
        T: Into<Input>,
    {
        let version = Version::try_from(input.into()).unwrap();

        assert_eq!(version.major(), major, "{version}");
        assert_eq!(version.minor(), minor, "{version}");
        assert_eq!(version.patch(), patch, "{version}");
    }

    #[test]
    fn from_text() {
        assert_normalized("1.2.3", (1, 2, 3));
        assert_normalized("1.2", (1, 2, 0));
        assert_normalized("1", (1, 0, 0));
        assert_normalized("0", (0, 1, 0));
        assert_normalized("0.0", (0, 0, 0));
        assert_normalized("10.02.030", (10, 2, 30));
    }

    #[test]
    fn from_invalid_text() {
        for text in [
            "", ".", "1.", ".1", "1..2", "a.b", "1.2.x", " 1.2", "1.2 ", "1_0",
        ] {
            assert!(
                matches!(
                    Version::try_from(Input::from(text)),
                    Err(Error::Parse { .. })
                ),
                "{text:?}"
            );
        }

        assert_eq!(
            Version::try_from(Input::from("1.2.3.4")),
            Err(Validation::TooManyComponents { count: 4 }.into())
        );

        assert_eq!(
            Version::try_from(Input::from("1.-2")),
            Err(Validation::Negative { value: -2 }.into())
        );
    }

    #[test]
    fn from_text_spanning_segment_range() {
        assert_normalized(
            "9223372036854775808.0.0",
            (9_223_372_036_854_775_808, 0, 0),
        );

        assert_normalized("18446744073709551615.1", (u64::MAX, 1, 0));

        assert_normalized("-0.5", (0, 5, 0));

        for text in [
            "18446744073709551616",
            "1.2.18446744073709551616",
            "1.999999999999999999999999999999999999999999",
            "1.-999999999999999999999999999999999999999999",
        ] {
            assert_eq!(
                Version::try_from(Input::from(text)),
                Err(Validation::OutOfRange.into()),
                "{text:?}"
            );
        }

        assert_eq!(
            Version::try_from(Input::from([1, i128::from(u64::MAX) + 1])),
            Err(Validation::OutOfRange.into())
        );
    }

    #[test]
    fn parse_error_names_atom() {
        let Err(Error::Parse { atom, .. }) =
            Version::try_from(Input::from("1.beta.3"))
        else {
            unreachable!()
        };

        assert_eq!(atom, "beta");
    }

    #[test]
    fn from_sequence() {
        assert_normalized([1, 2, 3], (1, 2, 3));
        assert_normalized((1, 2), (1, 2, 0));
        assert_normalized(vec![1], (1, 0, 0));
        assert_normalized(Vec::<i128>::new(), (0, 1, 0));
        assert_normalized([0], (0, 1, 0));
        assert_normalized((0, 0), (0, 0, 0));
    }

    #[test]
    fn empty_and_single_zero_sequences_match() {
        assert_eq!(
            Version::try_from(Input::Sequence(vec![])).unwrap(),
            Version::try_from(Input::Sequence(vec![0])).unwrap(),
        );
    }

    #[test]
    fn from_invalid_sequence() {
        assert_eq!(
            Version::try_from(Input::from([1, 2, 3, 4])),
            Err(Validation::TooManyComponents { count: 4 }.into())
        );

        assert_eq!(
            Version::try_from(Input::from((1, -2, 3))),
            Err(Validation::Negative { value: -2 }.into())
        );
    }

    #[test]
    fn from_integer() {
        assert_normalized(1, (1, 0, 0));
        assert_normalized(7, (7, 0, 0));
        assert_normalized(0, (0, 1, 0));

        assert_eq!(
            Version::try_from(Input::from(-1)),
            Err(Validation::Negative { value: -1 }.into())
        );
    }

    #[test]
    fn from_mapping() {
        assert_normalized(
            Components::new().with_major(1).with_minor(2).with_patch(3),
            (1, 2, 3),
        );

        assert_normalized(
            Components::new().with_major(1).with_patch(3),
            (1, 0, 3),
        );

        assert_normalized(Components::new().with_minor(2), (0, 2, 0));

        assert_normalized(Components::new().with_major(0), (0, 1, 0));

        assert_normalized(Components::new(), (0, 1, 0));

        assert_eq!(
            Version::try_from(Input::from(
                Components::new().with_major(2).with_patch(-9)
            )),
            Err(Validation::Negative { value: -9 }.into())
        );
    }

    #[test]
    fn from_absent() {
        assert_normalized((), (0, 1, 0));
        assert_normalized(None::<i128>, (0, 1, 0));
        assert_normalized(Some("3.1"), (3, 1, 0));
    }

    #[test]
    fn from_json() {
        assert_eq!(Input::try_from(json!(null)), Ok(Input::Absent));
        assert_eq!(Input::try_from(json!("1.2")), Ok(Input::from("1.2")));
        assert_eq!(Input::try_from(json!(7)), Ok(Input::Integer(7)));
        assert_eq!(
            Input::try_from(json!([5, 4, 11])),
            Ok(Input::from([5, 4, 11]))
        );

        assert_eq!(
            Input::try_from(json!({
                "major": 1,
                "patch": 3,
                "foo": 8,
                "bar": null,
            })),
            Ok(Input::Mapping(Components::new().with_major(1).with_patch(3))),
        );
    }

    #[test]
    fn from_unsupported_json() {
        assert_eq!(
            Input::try_from(json!(1.5)),
            Err(Error::UnsupportedType {
                kind: "floating-point number"
            })
        );

        assert_eq!(
            Input::try_from(json!(true)),
            Err(Error::UnsupportedType { kind: "boolean" })
        );

        assert_eq!(
            Input::try_from(json!([1, "2"])),
            Err(Error::UnsupportedType { kind: "string" })
        );

        assert_eq!(
            Input::try_from(json!({ "minor": [1] })),
            Err(Error::UnsupportedType { kind: "sequence" })
        );

        assert_eq!(
            Input::try_from(json!(u64::MAX)),
            Ok(Input::Integer(u64::MAX.into()))
        );

        assert_eq!(
            Version::try_from(Input::try_from(json!([u64::MAX, 0, 7])).unwrap()),
            Ok(Version::new(u64::MAX, 0, 7))
        );
    }

    #[test]
    fn deserialize() {
        assert_eq!(
            serde_json::from_str::<Input>(r#"{"major": 3, "patch": 10}"#)
                .unwrap(),
            Input::Mapping(Components::new().with_major(3).with_patch(10)),
        );

        assert!(serde_json::from_str::<Input>("2.5").is_err());
    }
}
