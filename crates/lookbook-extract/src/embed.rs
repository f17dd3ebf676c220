/// Probe a saved page source for an embedded data object.
///
/// Pages sometimes ship their records in a global assignment like
/// `window.__INITIAL_STATE__ = {...};`. Candidates are probed in a fixed
/// order; the first assignment whose right-hand side parses as a JSON
/// object or array wins and is returned untouched. Absence is normal, not
/// an error.
use regex::Regex;
use serde_json::Value;

const CANDIDATE_GLOBALS: [&str; 5] = [
    "__AIRTABLE_BASE__",
    "__INITIAL_STATE__",
    "__AIRTABLE_EMBED__",
    "airtable",
    "Airtable",
];

pub fn probe_embedded_data(source: &str) -> Option<(&'static str, Value)> {
    for name in CANDIDATE_GLOBALS {
        let pattern = format!(
            r"(?:window\.|var\s+|let\s+|const\s+){}\s*=\s*",
            regex::escape(name)
        );
        let re = Regex::new(&pattern).expect("escaped pattern is valid");
        for m in re.find_iter(source) {
            let rest = &source[m.end()..];
            if let Some(literal) = balanced_json_literal(rest) {
                if let Ok(value) = serde_json::from_str::<Value>(literal) {
                    return Some((name, value));
                }
            }
        }
    }
    None
}

/// Extract a balanced `{...}` or `[...]` literal from the start of `text`,
/// skipping delimiters inside double-quoted strings.
fn balanced_json_literal(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let open = *bytes.first()?;
    let close = match open {
        b'{' => b'}',
        b'[' => b']',
        _ => return None,
    };

    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            _ if b == open => depth += 1,
            _ if b == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}
