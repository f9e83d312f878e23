//! Normalization of raw shell input before an algorithm runs.

use crate::error::InputError;

/// Input cap used by the shells for both text and number lists.
pub const MAX_INPUT_LEN: usize = 15;

/// Trim surrounding whitespace and keep at most `max_len` characters.
pub fn normalize_text(raw: &str, max_len: usize) -> String {
    raw.trim().chars().take(max_len).collect()
}

/// Parse a comma-separated integer list. Empty tokens are skipped, so
/// `"1,,2, "` is `[1, 2]`.
pub fn parse_numbers(raw: &str, max_items: usize) -> Result<Vec<i64>, InputError> {
    let mut items = Vec::new();
    for (position, token) in raw.split(',').enumerate() {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let n = token.parse::<i64>().map_err(|_| InputError::NotANumber {
            token: token.to_string(),
            position,
        })?;
        items.push(n);
    }
    if items.len() > max_items {
        return Err(InputError::TooLong {
            count: items.len(),
            limit: max_items,
        });
    }
    Ok(items)
}

/// Binary search precondition. Equal neighbours are allowed.
pub fn ensure_ascending(items: &[i64]) -> Result<(), InputError> {
    match items.windows(2).position(|w| w[0] > w[1]) {
        Some(i) => Err(InputError::Unsorted { index: i + 1 }),
        None => Ok(()),
    }
}
