//! Small parsers shared by the params strings and move grammars.

use gridlace_core::MoveError;

/// Splits a leading decimal number off `s`.
pub(crate) fn split_number(s: &str) -> Option<(usize, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let number = s[..end].parse().ok()?;
    Some((number, &s[end..]))
}

/// Parses a `<x>,<y>,<c>` move body into a position and a single character.
pub(crate) fn cell_move_args(token: &str, body: &str) -> Result<(usize, usize, char), MoveError> {
    let malformed = || MoveError::Malformed {
        token: token.to_owned(),
    };
    let mut parts = body.splitn(3, ',');
    let x = parts.next().and_then(|p| p.parse().ok()).ok_or_else(malformed)?;
    let y = parts.next().and_then(|p| p.parse().ok()).ok_or_else(malformed)?;
    let mut value = parts.next().ok_or_else(malformed)?.chars();
    match (value.next(), value.next()) {
        (Some(c), None) => Ok((x, y, c)),
        _ => Err(malformed()),
    }
}
