// Path builder: fills `{name}` tokens of an endpoint template.
//
// Values are inserted as-is. Callers supply ready-made path segments
// (addresses, numeric ids); nothing is percent-encoded here.

use std::collections::HashMap;

use crate::error::PathError;

/// Names of the `{...}` tokens in `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                names.push(&after[..close]);
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    names
}

/// Substitute every token of `template` with its value from `params`.
pub fn build_path(template: &str, params: &HashMap<String, String>) -> Result<String, PathError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        let name = &after[..close];
        let value = params
            .get(name)
            .ok_or_else(|| PathError::MissingParameter(name.to_string()))?;
        out.push_str(&rest[..open]);
        out.push_str(value);
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
