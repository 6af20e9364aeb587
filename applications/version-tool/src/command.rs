use std::str::FromStr;

use anyhow::{anyhow, bail, Context as _, Error, Result};
use serde_json::Value;
use tracing::debug;

use environment::ReadFromVar as _;
use semantic_versioning::{compare, max_version, min_version, Input, Version};

pub(crate) const USAGE: &str = "\
Usage:
    version-tool normalize [<input>]
    version-tool compare <input> <input>
    version-tool max <input>...
    version-tool min <input>...
    version-tool bump <major|minor|patch> <input>

Inputs starting with `[` or `{`, as well as `null`, are read as JSON. Any \
other input is read as dot-separated text.";

const DEFAULT_INPUT_VAR: &str = "VERSION_TOOL_DEFAULT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Normalize(Option<Input>),
    Compare(Input, Input),
    Max(Vec<Input>),
    Min(Vec<Input>),
    Bump(Component, Input),
}

impl Command {
    pub fn parse<I>(arguments: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut arguments = arguments.into_iter();

        let command = arguments.next().context("No command given!")?;

        match command.as_str() {
            "normalize" => inputs(arguments).and_then(|mut inputs| {
                if inputs.len() > 1 {
                    bail!(
                        "Expected at most one version input, but {} were \
                        given!",
                        inputs.len()
                    );
                }

                Ok(Self::Normalize(inputs.pop()))
            }),
            "compare" => exactly::<_, 2>(arguments)
                .map(|[a, b]| Self::Compare(a, b)),
            "max" => inputs(arguments).map(Self::Max),
            "min" => inputs(arguments).map(Self::Min),
            "bump" => arguments
                .next()
                .context("No component to bump given!")
                .and_then(|component| component.parse())
                .and_then(|component| {
                    exactly::<_, 1>(arguments)
                        .map(|[input]| Self::Bump(component, input))
                }),
            command => Err(anyhow!("Unknown command {command:?}!")),
        }
    }

    pub fn run(self) -> Result<String> {
        match self {
            Self::Normalize(input) => input
                .map_or_else(default_input, Ok)
                .and_then(|input| Version::try_from(input).map_err(Error::from))
                .map(|version| version.to_string()),
            Self::Compare(a, b) => compare(a, b)
                .map(|ordering| ordering.to_string())
                .map_err(Error::from),
            Self::Max(inputs) => max_version(inputs)
                .map(|version| version.to_string())
                .map_err(Error::from),
            Self::Min(inputs) => min_version(inputs)
                .map(|version| version.to_string())
                .map_err(Error::from),
            Self::Bump(component, input) => Version::try_from(input)
                .map(|version| {
                    debug!(%version, ?component, "Bumping version.");

                    match component {
                        Component::Major => version.bump_major(),
                        Component::Minor => version.bump_minor(),
                        Component::Patch => version.bump_patch(),
                    }
                    .to_string()
                })
                .map_err(Error::from),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Component {
    Major,
    Minor,
    Patch,
}

impl FromStr for Component {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            _ => Err(anyhow!(
                "Unknown version component {s:?}! Expected \"major\", \
                \"minor\" or \"patch\"."
            )),
        }
    }
}

fn default_input() -> Result<Input> {
    String::read_from_optional_var(DEFAULT_INPUT_VAR)
        .map(|text| {
            debug!(?text, "No input given, falling back to environment.");

            Input::from(text)
        })
        .context("Failed to read default version input!")
}

fn inputs<I>(arguments: I) -> Result<Vec<Input>>
where
    I: Iterator<Item = String>,
{
    arguments.map(|argument| parse_input(&argument)).collect()
}

fn exactly<I, const N: usize>(arguments: I) -> Result<[Input; N]>
where
    I: Iterator<Item = String>,
{
    inputs(arguments).and_then(|inputs| {
        <[Input; N]>::try_from(inputs).map_err(|inputs| {
            anyhow!(
                "Expected {N} version input(s), but {} were given!",
                inputs.len()
            )
        })
    })
}

pub(crate) fn parse_input(argument: &str) -> Result<Input> {
    if argument.starts_with(['[', '{']) || argument == "null" {
        serde_json::from_str::<Value>(argument)
            .with_context(|| {
                format!("Failed to parse JSON version input {argument:?}!")
            })
            .and_then(|value| Input::try_from(value).map_err(Error::from))
    } else {
        Ok(Input::from(argument))
    }
}
