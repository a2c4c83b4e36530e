//! Interactive prompt command parsing
//!
//! The stand-in for the query form: one line of input becomes either a
//! form submission, a marker activation, or a loop control command.

use crate::controller::QueryForm;

pub const USAGE: &str = "Commands:
  query <start-date> <end-date> [min-size=N] [max-size=N] [min-distance=N] [max-distance=N]
         dates are YYYY-MM-DD; sizes in km, distances in km
  markers          list the markers of the current query
  open <neo-id>    show a marker popup and fetch extended detail
  help             show this help
  quit             exit";

/// One parsed line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Submit the query form
    Query(QueryForm),
    /// Activate the marker for a NEO id
    Open(String),
    /// List current markers
    Markers,
    Help,
    Quit,
    /// Blank line, nothing to do
    Empty,
    /// Anything else; carries the message to show
    Unknown(String),
}

/// Parse a prompt line into a [`Command`].
///
/// Date and bound values are NOT validated here — the form controller owns
/// validation, so a `query` with missing dates still parses and is rejected
/// with an inline message instead of a usage error.
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }

    let mut parts = trimmed.split_whitespace();
    let word = parts.next().unwrap_or_default();
    match word.to_lowercase().as_str() {
        "query" | "q" => parse_query(parts.collect()),
        "open" | "o" => match parts.next() {
            Some(neo_id) => Command::Open(neo_id.to_string()),
            None => Command::Unknown("open needs a NEO id (see 'markers')".to_string()),
        },
        "markers" | "m" => Command::Markers,
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(format!("Unknown command: {word}")),
    }
}

fn parse_query(args: Vec<&str>) -> Command {
    let mut form = QueryForm::default();
    let mut dates: Vec<&str> = Vec::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once('=') {
            match key {
                "min-size" => form.min_size = value.to_string(),
                "max-size" => form.max_size = value.to_string(),
                "min-distance" => form.min_distance = value.to_string(),
                "max-distance" => form.max_distance = value.to_string(),
                _ => return Command::Unknown(format!("Unknown filter: {key}")),
            }
        } else {
            dates.push(arg);
        }
    }

    if dates.len() > 2 {
        return Command::Unknown("query takes at most two dates".to_string());
    }
    form.start_date = dates.first().copied().unwrap_or_default().to_string();
    form.end_date = dates.get(1).copied().unwrap_or_default().to_string();

    Command::Query(form)
}
