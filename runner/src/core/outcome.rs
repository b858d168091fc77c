//! Classification of the check program's exit status.
//!
//! The check program reports its result through its exit code. The runner
//! never acts on this classification; it only shows up in diagnostics.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Tickets are still sold out; nothing to report.
    SoldOut,
    /// Tickets appear to be on sale; the check program sent a notification.
    Available,
    /// The check program is missing `TICKET_URL` or `TARGET_CLASS`.
    ConfigError,
    /// The check program hit an unexpected error.
    UnexpectedError,
    /// Any status outside the check program's contract (signals, spawn failures).
    Other(i32),
}

pub fn classify_outcome(status: i32) -> CheckOutcome {
    match status {
        0 => CheckOutcome::SoldOut,
        1 => CheckOutcome::Available,
        2 => CheckOutcome::ConfigError,
        3 => CheckOutcome::UnexpectedError,
        other => CheckOutcome::Other(other),
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckOutcome::SoldOut => f.write_str("sold_out"),
            CheckOutcome::Available => f.write_str("available"),
            CheckOutcome::ConfigError => f.write_str("config_error"),
            CheckOutcome::UnexpectedError => f.write_str("unexpected_error"),
            CheckOutcome::Other(code) => write!(f, "other({code})"),
        }
    }
}
