//! Natural ("human") ordering of names with embedded numbers.

use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Chunk {
    /// Lower-cased text run.
    Text(String),
    /// Digit run without leading zeros; longer means larger.
    Num { len: usize, digits: String },
}

/// Sort key: alternating text and number runs, text compared
/// case-insensitively and numbers by value.
fn natural_key(s: &str) -> Vec<Chunk> {
    let mut out = Vec::new();
    let mut rest = s;
    while !rest.is_empty() {
        let digit = rest.starts_with(|c: char| c.is_ascii_digit());
        let end = rest
            .find(|c: char| c.is_ascii_digit() != digit)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);
        out.push(if digit {
            let digits = run.trim_start_matches('0').to_owned();
            Chunk::Num { len: digits.len(), digits }
        } else {
            Chunk::Text(run.to_lowercase())
        });
        rest = tail;
    }
    out
}

/// Compare two names naturally: `run_2` < `run_10`, `B` == `b` for ordering.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a).cmp(&natural_key(b))
}

/// Sort `names` in natural order (stable).
pub fn natural_sort<S: AsRef<str>>(names: &mut [S]) {
    names.sort_by_cached_key(|s| natural_key(s.as_ref()));
}
