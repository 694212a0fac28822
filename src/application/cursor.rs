/// Moves a list cursor by `delta`, clamped to a list of `len` rows.
pub(crate) fn step(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    cursor.saturating_add_signed(delta).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_on_empty_list() {
        assert_eq!(step(3, 1, 0), 0);
    }

    #[test]
    fn test_step_clamps_both_ends() {
        assert_eq!(step(0, -1, 4), 0);
        assert_eq!(step(2, 5, 4), 3);
        assert_eq!(step(2, -1, 4), 1);
    }
}
