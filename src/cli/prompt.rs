//! Line-oriented prompting
//!
//! Prompts are written to any `Write` and answers read from any `BufRead`,
//! so the interactive flows run the same against a terminal or a test buffer.

use std::io::{BufRead, Write};

use crate::error::{ExpenseError, ExpenseResult};

/// Print `prompt` and read one trimmed line
///
/// Returns `None` at end of input. A line that is not valid UTF-8 is
/// consumed and reported as a validation error.
pub fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> ExpenseResult<Option<String>> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut bytes = Vec::new();
    if input.read_until(b'\n', &mut bytes)? == 0 {
        return Ok(None);
    }

    let line = String::from_utf8(bytes)
        .map_err(|_| ExpenseError::Validation("Input is not valid UTF-8".into()))?;
    Ok(Some(line.trim().to_string()))
}

/// Print `prompt` and read one trimmed line, treating end of input as an error
pub fn prompt_string<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> ExpenseResult<String> {
    read_line(input, output, prompt)?
        .ok_or_else(|| ExpenseError::Io("Unexpected end of input".into()))
}
