//! Plain-text command scripts that drive a pencil over a paper.
//!
//! One command per line:
//!
//! ```text
//! # comments and blank lines are skipped
//! write Sally sells sea shells
//! sharpen
//! erase shells
//! edit 6 abc
//! ```
//!
//! The text argument is everything after the single space that follows the
//! command word, so leading spaces survive. `\n`, `\t` and `\\` are decoded.

use thiserror::Error;

use crate::error::Error as PaperError;
use crate::paper::Paper;
use crate::pencil::Pencil;

/// A single pencil operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Write(String),
    Sharpen,
    Erase(String),
    Edit { offset: usize, text: String },
}

/// A command together with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub line: usize,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptErrorKind {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("`{0}` needs a text argument")]
    MissingArgument(&'static str),
    #[error("invalid edit offset `{0}`")]
    InvalidOffset(String),
    #[error("`sharpen` takes no arguments")]
    UnexpectedArgument,
    #[error(transparent)]
    Paper(#[from] PaperError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ScriptError {
    pub line: usize,
    #[source]
    pub kind: ScriptErrorKind,
}

impl Step {
    fn fault(&self, err: PaperError) -> ScriptError {
        ScriptError {
            line: self.line,
            kind: err.into(),
        }
    }
}

/// Parse a whole script.
///
/// # Errors
/// Returns the first malformed line.
pub fn parse(source: &str) -> Result<Vec<Step>, ScriptError> {
    source
        .lines()
        .enumerate()
        .filter(|(_, raw)| {
            let trimmed = raw.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(idx, raw)| {
            let line = idx + 1;
            parse_line(raw.trim_end_matches('\r'))
                .map(|command| Step { line, command })
                .map_err(|kind| ScriptError { line, kind })
        })
        .collect()
}

fn parse_line(raw: &str) -> Result<Command, ScriptErrorKind> {
    let raw = raw.trim_start();
    let (word, rest) = match raw.split_once(' ') {
        Some((word, rest)) => (word, Some(rest)),
        None => (raw.trim_end(), None),
    };

    match word {
        "write" => Ok(Command::Write(text_argument("write", rest)?)),
        "erase" => Ok(Command::Erase(text_argument("erase", rest)?)),
        "sharpen" => {
            if rest.is_some_and(|r| !r.trim().is_empty()) {
                return Err(ScriptErrorKind::UnexpectedArgument);
            }
            Ok(Command::Sharpen)
        }
        "edit" => {
            let rest = rest.ok_or(ScriptErrorKind::MissingArgument("edit"))?;
            let (offset, text) = rest
                .split_once(' ')
                .ok_or(ScriptErrorKind::MissingArgument("edit"))?;
            let offset = offset
                .parse::<usize>()
                .map_err(|_| ScriptErrorKind::InvalidOffset(offset.to_string()))?;
            Ok(Command::Edit {
                offset,
                text: unescape(text),
            })
        }
        other => Err(ScriptErrorKind::UnknownCommand(other.to_string())),
    }
}

fn text_argument(command: &'static str, rest: Option<&str>) -> Result<String, ScriptErrorKind> {
    match rest {
        Some(text) if !text.is_empty() => Ok(unescape(text)),
        _ => Err(ScriptErrorKind::MissingArgument(command)),
    }
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Apply `steps` in order.
///
/// # Errors
/// Stops at the first step that faults and reports its line. Steps before it
/// have already been applied.
pub fn run(steps: &[Step], pencil: &mut Pencil, paper: &mut Paper) -> Result<(), ScriptError> {
    for step in steps {
        match &step.command {
            Command::Write(text) => pencil.write(text, paper),
            Command::Sharpen => pencil.sharpen(),
            Command::Erase(text) => {
                pencil.erase(text, paper).map_err(|err| step.fault(err))?;
            }
            Command::Edit { offset, text } => {
                pencil
                    .edit(text, *offset, paper)
                    .map_err(|err| step.fault(err))?;
            }
        }
    }
    Ok(())
}
