use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::core::{CliMode, LoopControl, ShellContext};
use crate::cli::io as cli_io;
use crate::errors::CliError;

/// Setting this variable switches the shell to line-per-command script mode.
pub const SCRIPT_ENV: &str = "RYUGAKU_CLI_SCRIPT";

/// Commands whose first argument is a school slug.
const SLUG_COMMANDS: &[&str] = &[
    "show",
    "fees",
    "estimate",
    "calc",
    "publish",
    "unpublish",
    "feature",
    "fees-import",
];
const CITY_COMMANDS: &[&str] = &["living", "living-set", "living-remove"];
const COMPARE_ACTIONS: &[&str] = &["add", "clear", "remove", "show"];

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    tracing::debug!(?mode, directory = %context.directory_name, "shell started");

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<ShellHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(ShellHelper::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
    cli_io::print_info(format!(
        "{} schools loaded. Type `help` for commands.",
        context.directory.published_schools().count()
    ));

    while context.running {
        if let Some(helper) = editor.helper_mut() {
            helper.refresh(context);
        }
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line).ok();
                if run_line(context, line)? == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                cli_io::print_hint("Type `exit` or press Ctrl-D to leave.");
            }
            Err(ReadlineError::Eof) => {
                cli_io::print_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if run_line(context, line)? == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

/// Command errors are reported and the loop goes on.
fn run_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CliError> {
    match context.process_line(line) {
        Ok(control) => Ok(control),
        Err(err) => {
            context.report_error(err)?;
            Ok(LoopControl::Continue)
        }
    }
}

/// Tab completion for command words, school slugs, city names, and
/// `compare` actions, depending on the word position.
struct ShellHelper {
    commands: Vec<String>,
    slugs: Vec<String>,
    cities: Vec<String>,
}

impl ShellHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_ascii_lowercase).collect();
        commands.sort();
        commands.dedup();
        Self {
            commands,
            slugs: Vec::new(),
            cities: Vec::new(),
        }
    }

    fn refresh(&mut self, context: &ShellContext) {
        self.slugs = context
            .directory
            .schools
            .iter()
            .map(|school| school.slug.clone())
            .collect();
        self.slugs.sort();
        self.cities = context.directory.cities();
    }

    fn candidates(&self, words: &[&str]) -> Vec<&str> {
        match words {
            [] => owned(&self.commands),
            [command] if SLUG_COMMANDS.contains(command) => owned(&self.slugs),
            [command] if CITY_COMMANDS.contains(command) => owned(&self.cities),
            ["compare"] => COMPARE_ACTIONS.to_vec(),
            ["estimate" | "calc", _] => owned(&self.cities),
            ["compare", "add" | "remove" | "rm"] => owned(&self.slugs),
            _ => Vec::new(),
        }
    }
}

fn owned(list: &[String]) -> Vec<&str> {
    list.iter().map(String::as_str).collect()
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let words: Vec<String> = prefix[..start]
            .split_whitespace()
            .map(str::to_ascii_lowercase)
            .collect();
        let words: Vec<&str> = words.iter().map(String::as_str).collect();
        let needle = prefix[start..].to_ascii_lowercase();

        let pairs = self
            .candidates(&words)
            .into_iter()
            .filter(|candidate| candidate.to_ascii_lowercase().starts_with(&needle))
            .map(|candidate| Pair {
                display: candidate.to_string(),
                replacement: candidate.to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> ShellHelper {
        let mut helper = ShellHelper::new(vec!["schools", "show", "search", "compare", "estimate"]);
        helper.slugs = vec!["osaka-ymca".into(), "tokyo-central".into()];
        helper.cities = vec!["东京".into(), "大阪".into()];
        helper
    }

    fn complete(helper: &ShellHelper, line: &str) -> Vec<String> {
        let history = DefaultHistory::new();
        let ctx = ReadlineContext::new(&history);
        let (_, pairs) = helper.complete(line, line.len(), &ctx).unwrap();
        pairs.into_iter().map(|pair| pair.replacement).collect()
    }

    #[test]
    fn first_word_completes_commands() {
        let helper = helper();
        assert_eq!(complete(&helper, "s"), ["schools", "search", "show"]);
        assert_eq!(complete(&helper, "SH"), ["show"]);
    }

    #[test]
    fn arguments_complete_slugs_and_cities() {
        let helper = helper();
        assert_eq!(complete(&helper, "show os"), ["osaka-ymca"]);
        assert_eq!(complete(&helper, "estimate osaka-ymca 大"), ["大阪"]);
        assert_eq!(complete(&helper, "compare a"), ["add"]);
        assert_eq!(complete(&helper, "compare add t"), ["tokyo-central"]);
        assert!(complete(&helper, "schools --sort ").is_empty());
    }
}
