//! Trailing answer-key tables
//!
//! Sequence and matching questions do not carry their solution next to the question. The
//! solution lives in a two-column table at the end of the document:
//!
//! ```text
//! | #  | Answer            |
//! | #1 | 1=3, 2=1, 3=2     |   sequence: position=answer index
//! | #2 | 1=b, 2=a, 3=b|c   |   matching: left label=right label(s)
//! ```

use crate::quiz::document::Table;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static KEY_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#\s*(\d+)\.?$").expect("valid regex"));
static ITEM_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;]").expect("valid regex"));

/// Answer-key values keyed by question number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerKey {
    entries: BTreeMap<usize, String>,
}

impl AnswerKey {
    /// Interpret a table as an answer key.
    ///
    /// Returns `None` when the table does not have the key shape: every row (a leading header
    /// row aside) must start with a `#N` cell followed by a value cell.
    pub fn from_table(table: &Table) -> Option<Self> {
        let mut entries = BTreeMap::new();
        for (i, row) in table.rows.iter().enumerate() {
            let number = row
                .first()
                .and_then(|cell| KEY_NUMBER.captures(cell))
                .and_then(|caps| caps[1].parse::<usize>().ok());
            match (number, row.get(1)) {
                (Some(number), Some(value)) => {
                    entries.insert(number, value.clone());
                }
                (None, _) if i == 0 => continue,
                _ => return None,
            }
        }
        if entries.is_empty() {
            None
        } else {
            Some(Self { entries })
        }
    }

    pub fn get(&self, question: usize) -> Option<&str> {
        self.entries.get(&question).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a sequence key `pos=ans, pos=ans, ...` into `(position, answer index)` pairs.
pub fn parse_order(value: &str) -> Result<Vec<(usize, usize)>, String> {
    split_items(value)
        .map(|item| -> Result<(usize, usize), String> {
            let (position, answer) = split_pair(item)?;
            let parse = |s: &str| {
                s.parse::<usize>()
                    .map_err(|_| format!("'{s}' in '{item}' is not a number"))
            };
            Ok((parse(position)?, parse(answer)?))
        })
        .collect()
}

/// Parse a matching key `left=right, ...` into `(left label, right label)` pairs.
///
/// A right side of `a|b` (or `a/b`) accepts either label and yields one pair per label; a
/// left label may also simply repeat.
pub fn parse_pairs(value: &str) -> Result<Vec<(String, String)>, String> {
    let mut pairs = Vec::new();
    for item in split_items(value) {
        let (left, right) = split_pair(item)?;
        for alternative in right.split(['|', '/']) {
            let alternative = alternative.trim();
            if alternative.is_empty() {
                return Err(format!("empty match in '{item}'"));
            }
            pairs.push((left.to_string(), alternative.to_string()));
        }
    }
    Ok(pairs)
}

fn split_items(value: &str) -> impl Iterator<Item = &str> {
    ITEM_SEPARATOR
        .split(value)
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

fn split_pair(item: &str) -> Result<(&str, &str), String> {
    let (left, right) = item
        .split_once('=')
        .ok_or_else(|| format!("'{item}' is not of the form a=b"))?;
    let (left, right) = (left.trim(), right.trim());
    if left.is_empty() || right.is_empty() {
        return Err(format!("'{item}' has an empty side"));
    }
    Ok((left, right))
}
