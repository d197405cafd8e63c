pub mod admin;
pub mod lecturer;
pub mod login;
pub mod student;

use crate::error::Result;
use std::io::{self, Write};

/// Prints a prompt and reads one trimmed line from stdin.
pub(crate) fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Numeric prompt; unparseable input prints a notice and yields `None` so
/// the calling screen can loop back to its menu.
pub(crate) fn prompt_i64(label: &str) -> Result<Option<i64>> {
    let raw = prompt(label)?;
    match raw.parse() {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            println!("Please enter a number.");
            Ok(None)
        }
    }
}

pub(crate) fn prompt_u32(label: &str) -> Result<Option<u32>> {
    let raw = prompt(label)?;
    match raw.parse() {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            println!("Please enter a number.");
            Ok(None)
        }
    }
}
