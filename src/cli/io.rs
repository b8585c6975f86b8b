//! JSON output for the CLI
//!
//! - Output: single JSON object on stdout, one line
//! - Logs never go to stdout

use std::io::{self, Write};

use serde::Serialize;

use super::errors::CliResult;

/// Write a success response to a writer
pub fn write_response_to<W: Write, T: Serialize>(writer: &mut W, data: &T) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *writer, &response)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

/// Write a success response to stdout
pub fn write_response<T: Serialize>(data: &T) -> CliResult<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_response_to(&mut lock, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_envelope() {
        let mut buffer = Vec::new();
        write_response_to(&mut buffer, &serde_json::json!({"safe_zone": true})).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.ends_with('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["data"]["safe_zone"], true);
    }
}
