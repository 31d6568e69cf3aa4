//! Parser guards bounding the repair search.

/// Default ceiling on diagnostics accumulated by one statement.
///
/// Once a branch holds this many diagnostics it makes no further repair of
/// any kind and the rest of the statement is abandoned, so one statement
/// never reports more. This also cuts the Insert-only cycle between the
/// argument name and the argument separator.
pub const MAX_ERRORS_PER_STATEMENT: usize = 30;

/// Default maximum parenthesis nesting before the statement is abandoned.
pub const MAX_PAREN_DEPTH: usize = 64;

/// Highest nesting limit a configuration may set.
///
/// Each level costs several recursive frames; this bound keeps the deepest
/// accepted input within a default 2 MiB thread stack.
pub const MAX_CONFIGURABLE_DEPTH: usize = 256;

/// Returns true when a branch with `cost` diagnostics may not branch again.
#[inline]
pub fn ceiling_reached(cost: usize, max_errors: usize) -> bool {
    cost >= max_errors
}

/// Returns true when opening one more parenthesis would exceed `max_depth`.
#[inline]
pub fn nesting_too_deep(depth: usize, max_depth: usize) -> bool {
    depth >= max_depth
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling() {
        assert!(!ceiling_reached(29, MAX_ERRORS_PER_STATEMENT));
        assert!(ceiling_reached(30, MAX_ERRORS_PER_STATEMENT));
    }

    #[test]
    fn test_nesting() {
        assert!(!nesting_too_deep(0, 1));
        assert!(nesting_too_deep(1, 1));
        assert!(!nesting_too_deep(MAX_PAREN_DEPTH - 1, MAX_PAREN_DEPTH));
    }
}
