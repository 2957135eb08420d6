// Duokey Replay Scripts
// Parses recorded key edges like "press 0 11" into KeyEvents

use std::io::BufRead;
use std::str::FromStr;

use crate::{Edge, KeyEvent, TriggerId};

/// Errors raised while reading a replay script
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}

/// Parse one script line.
///
/// Returns `Ok(None)` for blank lines and `#` comments.
///
/// ```
/// use duokey_core::script::parse_line;
/// use duokey_core::{KeyEvent, TriggerId};
/// assert_eq!(
///     parse_line("press 0 11").unwrap(),
///     Some(KeyEvent::press(TriggerId::new(0, 11)))
/// );
/// ```
pub fn parse_line(line: &str) -> Result<Option<KeyEvent>, String> {
    let content = match line.split_once('#') {
        Some((before, _)) => before,
        None => line,
    };
    let parts: Vec<&str> = content.split_whitespace().collect();
    let [edge, row, col] = match parts.as_slice() {
        [] => return Ok(None),
        [edge, row, col] => [*edge, *row, *col],
        _ => return Err(format!("expected '<press|release> <row> <col>', got '{}'", line.trim())),
    };

    let edge = Edge::from_str(&edge.to_ascii_lowercase())
        .map_err(|_| format!("unknown edge '{}'", edge))?;
    let row = parse_coordinate(row, "row")?;
    let col = parse_coordinate(col, "col")?;

    Ok(Some(KeyEvent {
        trigger: TriggerId::new(row, col),
        edge,
    }))
}

fn parse_coordinate(value: &str, what: &str) -> Result<u8, String> {
    value
        .parse::<u8>()
        .map_err(|_| format!("invalid {} '{}'", what, value))
}

/// Parse a whole script held in memory
pub fn parse_script(content: &str) -> Result<Vec<KeyEvent>, ScriptError> {
    let mut events = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let parsed = parse_line(line).map_err(|message| ScriptError::Syntax {
            line: index + 1,
            message,
        })?;
        events.extend(parsed);
    }
    Ok(events)
}

/// Read and parse a script from any buffered reader (a file or stdin)
pub fn read_script<R: BufRead>(reader: R) -> Result<Vec<KeyEvent>, ScriptError> {
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let parsed = parse_line(&line).map_err(|message| ScriptError::Syntax {
            line: index + 1,
            message,
        })?;
        events.extend(parsed);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line("release 3 1").unwrap(),
            Some(KeyEvent::release(TriggerId::new(3, 1)))
        );
        assert_eq!(
            parse_line("  PRESS 0 11  # bsdl").unwrap(),
            Some(KeyEvent::press(TriggerId::new(0, 11)))
        );
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("# just a comment").unwrap(), None);
    }

    #[test]
    fn test_parse_line_errors() {
        assert!(parse_line("tap 0 11").unwrap_err().contains("unknown edge"));
        assert!(parse_line("press 0").is_err());
        assert!(parse_line("press 0 256").unwrap_err().contains("invalid col"));
        assert!(parse_line("press x 1").unwrap_err().contains("invalid row"));
    }

    #[test]
    fn test_parse_script_reports_line() {
        let script = "press 0 11\n\n# comment\nhold 0 11\n";
        match parse_script(script) {
            Err(ScriptError::Syntax { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_script() {
        let script = "press 3 1\npress 0 11\nrelease 3 1\nrelease 0 11\n";
        let events = read_script(script.as_bytes()).unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(events, parse_script(script).unwrap());
    }
}
