/// Wrap a signed index into `[0, len)`.
///
/// Equivalent to `((v mod len) + len) mod len`, so negative inputs land on the tail of the row.
/// `len` must be non-zero.
pub fn wrap_index(v: i64, len: usize) -> usize {
    debug_assert!(len > 0, "wrap_index requires a non-empty range");
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    v.rem_euclid(len) as usize
}

/// Signed width helper for index arithmetic on row lengths.
pub(crate) fn signed_len(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
