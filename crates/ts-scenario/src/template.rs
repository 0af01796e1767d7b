//! `{name}` placeholder substitution.

use crate::{ScenarioError, ScenarioResult};

/// Replace every `{name}` in `template` with `lookup(name)`.
///
/// An unknown name or an unclosed `{` is an error.
pub fn render<'a, F>(template: &str, lookup: F) -> ScenarioResult<String>
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after
            .find('}')
            .ok_or_else(|| ScenarioError::UnclosedPlaceholder(template.to_owned()))?;
        let name = after[..close].trim();
        let value = lookup(name).ok_or_else(|| ScenarioError::UnknownPlaceholder {
            template: template.to_owned(),
            name:     name.to_owned(),
        })?;
        out.push_str(value);
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
