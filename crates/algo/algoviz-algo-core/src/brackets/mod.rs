//! Balanced-bracket checking, in explicit-stack and recursive-descent form.

mod recursive;
mod stack;

pub use recursive::{balanced_recursive, BalancedRecursive};
pub use stack::{balanced_stack, BalancedStack};

/// Closer expected for an opening bracket.
#[inline]
pub(crate) fn closer_for(c: char) -> Option<char> {
    match c {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        _ => None,
    }
}

#[inline]
pub(crate) fn is_closer(c: char) -> bool {
    matches!(c, ')' | ']' | '}')
}
