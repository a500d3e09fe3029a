//! Recovers a JSON array of candidate objects from free-form model output.
//!
//! Stages run in order and each only runs if the previous one did not yield a parse:
//!
//! 1. trim whitespace and strip a leading ```` ```json ```` / ```` ``` ```` fence and a trailing ```` ``` ````
//! 2. strict parse as a JSON array
//! 3. cut from the first `[` to the end of text, or to the last `]` when prose trails the array
//! 4. close an unterminated string and append the missing `}` / `]` closers
//! 5. strict parse again
//!
//! Repair only ever appends. The model is asked for a flat array of flat objects,
//! so length-limited generation loses trailing punctuation, not interior text.

use serde_json::Value;

use crate::error::PipelineError;

/// Which stage produced the parsed array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryPath {
    Strict,
    Repaired,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recovered {
    pub items: Vec<Value>,
    pub path: RecoveryPath,
}

/// Turns raw model text into a sequence of loosely-structured items.
///
/// Never panics; every failure is returned as [`PipelineError::UnrecoverableResponse`].
pub fn recover_candidates(raw: &str) -> Result<Recovered, PipelineError> {
    let text = strip_code_fence(raw);

    if let Ok(items) = serde_json::from_str::<Vec<Value>>(text) {
        return Ok(Recovered {
            items,
            path: RecoveryPath::Strict,
        });
    }

    let start = text.find('[').ok_or_else(|| {
        PipelineError::UnrecoverableResponse("no JSON array in model output".to_string())
    })?;

    // The open-ended tail goes first: it only parses when nothing but closers is
    // missing, and the last `]` may sit inside a string that was cut off.
    let mut spans = vec![&text[start..]];
    if let Some(end) = text.rfind(']').filter(|&end| end > start) {
        if end + 1 < text.len() {
            spans.push(&text[start..=end]);
        }
    }

    let mut last_error = String::new();
    for span in spans {
        let repaired = close_truncated(span);
        match serde_json::from_str::<Vec<Value>>(&repaired) {
            Ok(items) => {
                return Ok(Recovered {
                    items,
                    path: RecoveryPath::Repaired,
                })
            }
            Err(e) => last_error = e.to_string(),
        }
    }

    Err(PipelineError::UnrecoverableResponse(last_error))
}

/// Trims and removes markdown code fences; either fence may appear alone
fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```json") {
        text = rest.trim_start();
    }
    if let Some(rest) = text.strip_prefix("```") {
        text = rest.trim_start();
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }

    text
}

/// Appends whatever is needed to close strings, objects and arrays left open at the end
fn close_truncated(span: &str) -> String {
    let mut open: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for ch in span.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => open.push('}'),
            '[' => open.push(']'),
            '}' | ']' => {
                if open.last() == Some(&ch) {
                    open.pop();
                }
            }
            _ => {}
        }
    }

    let mut repaired = String::with_capacity(span.len() + open.len() + 2);
    repaired.push_str(span);

    if in_string {
        if escaped {
            repaired.push('\\');
        }
        repaired.push('"');
    }

    repaired.extend(open.iter().rev());
    repaired
}
