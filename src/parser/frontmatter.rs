use std::collections::BTreeMap;

use crate::error::FrontmatterError;

/// Field map of a frontmatter block. Ordered so [`write`] is deterministic.
pub type Fields = BTreeMap<String, String>;

const DELIMITER: &str = "---";

/// Parse a `key: value` frontmatter block from markdown content
///
/// ```text
/// ---
/// id: S-01
/// status: pending
/// ---
/// # Body
/// ```
///
/// The first non-blank line must be exactly `---`. Each field line is split on
/// its first colon and both sides are trimmed; blank lines are skipped. The body
/// is every line after the closing delimiter, rejoined with `\n`.
///
/// # Errors
///
/// Returns an error if the opening or closing delimiter is missing, or a
/// non-blank line inside the block has no colon.
pub fn parse(content: &str) -> Result<(Fields, String), FrontmatterError> {
    let lines: Vec<&str> = content.split('\n').collect();

    let start = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .ok_or(FrontmatterError::MissingOpening)?;

    if lines[start].trim_end_matches('\r') != DELIMITER {
        return Err(FrontmatterError::MissingOpening);
    }

    let mut fields = Fields::new();
    let mut end = None;

    for (offset, raw) in lines[start + 1..].iter().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line == DELIMITER {
            end = Some(start + 1 + offset);
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            return Err(FrontmatterError::InvalidLine {
                line: start + offset + 2,
                content: line.to_string(),
            });
        };
        fields.insert(key.trim().to_string(), value.trim().to_string());
    }

    let end = end.ok_or(FrontmatterError::MissingClosing)?;
    let body = lines[end + 1..].join("\n");

    Ok((fields, body))
}

/// Render fields and body back into a frontmatter document.
///
/// Keys are emitted in sorted order.
pub fn write(fields: &Fields, body: &str) -> String {
    let mut out = String::from("---\n");
    for (key, value) in fields {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
    out.push_str("---\n");
    out.push_str(body);
    out
}
