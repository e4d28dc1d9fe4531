//! Shell Commands
//!
//! One line of input becomes one [`Command`]; parsing never touches a
//! session. [`apply`] is the only place edits reach the [`Session`].

use std::str::FromStr;

use thiserror::Error;
use ticket_core::session::coerce_number;
use ticket_core::{Category, PriceCategory, PriceField, Session, TicketError};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Attendees(u32),
    Residents(f64),
    Municipal(f64),
    Dist(Category, f64),
    Auto(bool),
    /// Price text is kept raw; the session coerces it
    Price(PriceCategory, PriceField, String),
    Show,
    Chart,
    Json,
    Reset,
    Help,
    Quit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("COMMAND/empty input")]
    Empty,

    #[error("COMMAND/unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("COMMAND/'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("COMMAND/'{value}' is not a valid {argument}")]
    InvalidNumber { argument: &'static str, value: String },

    #[error("COMMAND/expected KEY=VALUE, got '{0}'")]
    InvalidAssignment(String),

    #[error(transparent)]
    Ticket(#[from] TicketError),
}

pub const HELP: &str = "\
Comandi:
  attendees N               numero totale acquisti
  residents P               percentuale residenti
  municipal P               quota comune (%)
  dist KEY VALUE            percentuale di una categoria
  auto on|off               bilanciamento automatico
  price KEY base|fee VALUE  prezzo o commissione
  show | chart | json       report, grafici, vista JSON
  reset                     valori predefiniti
  help | quit";

/// Parse one line of shell input
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(CommandError::Empty);
    };
    let head = head.to_ascii_lowercase();
    let mut arg = |command: &'static str, argument: &'static str| {
        words
            .next()
            .ok_or(CommandError::MissingArgument { command, argument })
    };

    let command = match head.as_str() {
        "attendees" => Command::Attendees(parse_attendees(arg("attendees", "a count")?)?),
        "residents" => Command::Residents(parse_number("percentage", arg("residents", "a percentage")?)?),
        "municipal" => Command::Municipal(coerce_number(arg("municipal", "a percentage")?)),
        "dist" => {
            let category = Category::from_str(arg("dist", "a category")?)?;
            let value = parse_number("percentage", arg("dist", "a percentage")?)?;
            Command::Dist(category, value)
        }
        "auto" => Command::Auto(parse_switch(arg("auto", "on or off")?)?),
        "price" => {
            let category = PriceCategory::from_str(arg("price", "a price category")?)?;
            let field = PriceField::from_str(arg("price", "base or fee")?)?;
            let text = arg("price", "a value")?.to_string();
            Command::Price(category, field, text)
        }
        "show" => Command::Show,
        "chart" => Command::Chart,
        "json" => Command::Json,
        "reset" => Command::Reset,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(head)),
    };
    Ok(command)
}

/// Parse a `--set KEY=VALUE` edit. Keys are `attendees`, `residents`,
/// `municipal`, `auto`, a category key, or `<priceCategory>.base|fee`.
pub fn parse_assignment(text: &str) -> Result<Command, CommandError> {
    let Some((key, value)) = text.split_once('=') else {
        return Err(CommandError::InvalidAssignment(text.to_string()));
    };
    let (key, value) = (key.trim(), value.trim());

    match key {
        "attendees" => Ok(Command::Attendees(parse_attendees(value)?)),
        "residents" => Ok(Command::Residents(parse_number("percentage", value)?)),
        "municipal" => Ok(Command::Municipal(coerce_number(value))),
        "auto" => Ok(Command::Auto(parse_switch(value)?)),
        _ => match key.split_once('.') {
            Some((category, field)) => Ok(Command::Price(
                PriceCategory::from_str(category)?,
                PriceField::from_str(field)?,
                value.to_string(),
            )),
            None => Ok(Command::Dist(
                Category::from_str(key)?,
                parse_number("percentage", value)?,
            )),
        },
    }
}

/// Apply an edit to the session. Returns false for commands that only read.
pub fn apply(session: &mut Session, command: Command) -> bool {
    debug!(session = session.id(), ?command, "applying command");
    match command {
        Command::Attendees(n) => session.set_attendees(n),
        Command::Residents(p) => session.set_resident_pct(p),
        Command::Municipal(p) => session.set_municipal_pct(p),
        Command::Dist(category, value) => session.set_category(category, value),
        Command::Auto(enabled) => session.set_auto_balance(enabled),
        Command::Price(category, field, text) => {
            session.update_price(category, field, &text);
        }
        Command::Reset => session.reset(),
        Command::Show | Command::Chart | Command::Json | Command::Help | Command::Quit => {
            return false
        }
    }
    true
}

fn parse_attendees(text: &str) -> Result<u32, CommandError> {
    text.parse::<u32>().map_err(|_| CommandError::InvalidNumber {
        argument: "attendee count",
        value: text.to_string(),
    })
}

fn parse_number(argument: &'static str, text: &str) -> Result<f64, CommandError> {
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CommandError::InvalidNumber {
            argument,
            value: text.to_string(),
        }),
    }
}

fn parse_switch(text: &str) -> Result<bool, CommandError> {
    match text.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        _ => Err(CommandError::InvalidNumber {
            argument: "switch (on/off)",
            value: text.to_string(),
        }),
    }
}
