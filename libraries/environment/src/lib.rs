use std::{borrow::Borrow, env};

use anyhow::{Context as _, Result};

pub trait ReadFromVar: Sized {
    fn read_from_var<S>(variable: S) -> Result<Self>
    where
        S: Borrow<str> + Into<String>;

    /// Returns `None` when the variable is not set at all.
    fn read_from_optional_var<S>(variable: S) -> Result<Option<Self>>
    where
        S: Borrow<str> + Into<String>,
    {
        if env::var_os(variable.borrow()).is_some() {
            Self::read_from_var(variable).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl ReadFromVar for String {
    fn read_from_var<S>(variable: S) -> Result<Self>
    where
        S: Borrow<str> + Into<String>,
    {
        let variable = variable.borrow();

        env::var(variable).with_context(|| {
            format!("Failed to read environment variable {variable:?}!")
        })
    }
}

/// Boolean switch, enabled by `1`, `y`, `Y`, `yes` or `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Flag(bool);

impl Flag {
    const ENABLED: [&'static str; 5] = ["1", "y", "Y", "yes", "true"];

    pub fn parse(value: &str) -> Self {
        Self(Self::ENABLED.contains(&value))
    }

    #[must_use]
    pub const fn get(self) -> bool {
        self.0
    }
}

impl ReadFromVar for Flag {
    fn read_from_var<S>(variable: S) -> Result<Self>
    where
        S: Borrow<str> + Into<String>,
    {
        String::read_from_var(variable).map(|value| Self::parse(&value))
    }
}

#[test]
fn flag_values() {
    for value in Flag::ENABLED {
        assert!(Flag::parse(value).get(), "{value:?}");
    }

    for value in ["", "0", "n", "no", "false", "TRUE", " 1"] {
        assert!(!Flag::parse(value).get(), "{value:?}");
    }
}

#[test]
fn missing_optional_variable() {
    assert_eq!(
        String::read_from_optional_var(
            "ENVIRONMENT_TEST_VARIABLE_THAT_IS_NEVER_SET"
        )
        .unwrap(),
        None
    );

    String::read_from_var("ENVIRONMENT_TEST_VARIABLE_THAT_IS_NEVER_SET")
        .unwrap_err();
}
