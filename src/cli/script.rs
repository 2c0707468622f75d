//! Action scripts: one row action per line.
//!
//! ```text
//! # comment
//! add
//! select 0
//! add
//! expand 0
//! list
//! remove
//! unselect
//! show
//! ```

use std::fmt;
use std::str::FromStr;

use crate::cli::error::CliError;

/// A single user action, the terminal counterpart of a popover menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Remove,
    Unselect,
    /// Pick the row at a visible position
    Select(usize),
    Expand(usize),
    Collapse(usize),
    /// Render the whole tree
    Show,
    /// Print the visible rows with their positions
    List,
    Help,
}

impl Action {
    /// Parses one script line; blank lines and `#` comments yield `None`.
    pub fn parse_line(line: &str) -> Result<Option<Action>, CliError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }
}

fn position_arg(verb: &str, arg: Option<&str>) -> Result<usize, CliError> {
    let raw = arg.ok_or_else(|| CliError::InvalidArgs(format!("'{}' needs a row position", verb)))?;
    raw.parse()
        .map_err(|_| CliError::InvalidArgs(format!("'{}' expects a row position, got '{}'", verb, raw)))
}

impl FromStr for Action {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().unwrap_or_default().to_ascii_lowercase();
        let arg = words.next();
        if let Some(extra) = words.next() {
            return Err(CliError::InvalidArgs(format!("unexpected argument '{}'", extra)));
        }

        let action = match verb.as_str() {
            "add" => Action::Add,
            "remove" | "rm" => Action::Remove,
            "unselect" => Action::Unselect,
            "select" => Action::Select(position_arg(&verb, arg)?),
            "expand" => Action::Expand(position_arg(&verb, arg)?),
            "collapse" => Action::Collapse(position_arg(&verb, arg)?),
            "show" => Action::Show,
            "list" | "ls" => Action::List,
            "help" | "?" => Action::Help,
            other => return Err(CliError::Usage(format!("unknown action '{}', try 'help'", other))),
        };

        let takes_arg = matches!(action, Action::Select(_) | Action::Expand(_) | Action::Collapse(_));
        if !takes_arg {
            if let Some(extra) = arg {
                return Err(CliError::InvalidArgs(format!("'{}' takes no argument, got '{}'", verb, extra)));
            }
        }
        Ok(action)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Add => write!(f, "add"),
            Action::Remove => write!(f, "remove"),
            Action::Unselect => write!(f, "unselect"),
            Action::Select(p) => write!(f, "select {}", p),
            Action::Expand(p) => write!(f, "expand {}", p),
            Action::Collapse(p) => write!(f, "collapse {}", p),
            Action::Show => write!(f, "show"),
            Action::List => write!(f, "list"),
            Action::Help => write!(f, "help"),
        }
    }
}

pub const HELP: &str = "\
add           add a row under the selected row (or at the top level)
remove        remove the selected row and everything below it
unselect      clear the selection
select <row>  select the row at a visible position
expand <row>  show the children of a row
collapse <row> hide the children of a row
list          print visible rows with positions
show          print the whole tree";
