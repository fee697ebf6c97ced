use std::collections::HashMap;
use std::str::FromStr;

pub mod admin;
pub mod catalog;
pub mod consult;
pub mod estimate;
pub mod system;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandEntry;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(catalog::definitions());
    commands.extend(estimate::definitions());
    commands.extend(consult::definitions());
    commands.extend(admin::definitions());
    commands
}

/// Positional arguments plus `--flag value` pairs.
#[derive(Debug, Default)]
pub(crate) struct ParsedArgs<'a> {
    positional: Vec<&'a str>,
    flags: HashMap<&'static str, &'a str>,
}

impl<'a> ParsedArgs<'a> {
    /// Splits `args`, rejecting flags outside `known` and flags with no value.
    pub(crate) fn parse(args: &[&'a str], known: &[&'static str]) -> Result<Self, CommandError> {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.iter().copied();
        while let Some(arg) = iter.next() {
            let Some(flag) = arg.strip_prefix("--") else {
                parsed.positional.push(arg);
                continue;
            };
            let name = known.iter().copied().find(|known| *known == flag).ok_or_else(|| {
                CommandError::InvalidArguments(format!("unknown option `--{}`", flag))
            })?;
            let value = iter.next().ok_or_else(|| {
                CommandError::InvalidArguments(format!("option `--{}` needs a value", name))
            })?;
            parsed.flags.insert(name, value);
        }
        Ok(parsed)
    }

    pub(crate) fn positional(&self, index: usize) -> Option<&'a str> {
        self.positional.get(index).copied()
    }

    pub(crate) fn require(&self, index: usize, usage: &str) -> Result<&'a str, CommandError> {
        self.positional(index)
            .ok_or_else(|| CommandError::InvalidArguments(format!("usage: {}", usage)))
    }

    /// Remaining positional arguments from `index`, joined by spaces.
    pub(crate) fn rest(&self, index: usize) -> Option<String> {
        let rest = self.positional.get(index..)?;
        (!rest.is_empty()).then(|| rest.join(" "))
    }

    pub(crate) fn flag(&self, name: &str) -> Option<&'a str> {
        self.flags.get(name).copied()
    }

    pub(crate) fn parsed_flag<T: FromStr>(&self, name: &str) -> Result<Option<T>, CommandError> {
        self.flag(name)
            .map(|raw| {
                raw.parse::<T>().map_err(|_| {
                    CommandError::InvalidArguments(format!("invalid value `{}` for --{}", raw, name))
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_and_positionals_split() {
        let args = ["osaka", "--months", "6", "大阪"];
        let parsed = ParsedArgs::parse(&args, &["months", "housing"]).unwrap();
        assert_eq!(parsed.positional(0), Some("osaka"));
        assert_eq!(parsed.positional(1), Some("大阪"));
        assert_eq!(parsed.parsed_flag::<i32>("months").unwrap(), Some(6));
        assert_eq!(parsed.flag("housing"), None);
    }

    #[test]
    fn unknown_or_dangling_flags_fail() {
        assert!(ParsedArgs::parse(&["--colour", "x"], &["months"]).is_err());
        assert!(ParsedArgs::parse(&["--months"], &["months"]).is_err());
        let parsed = ParsedArgs::parse(&["--months", "six"], &["months"]).unwrap();
        assert!(parsed.parsed_flag::<i32>("months").is_err());
    }
}
