//! Small, allocation-free helpers shared across the crate.

/// True if `n` is a power of two (zero is not).
#[inline]
pub const fn is_power_of_two(n: usize) -> bool {
    n != 0 && (n & (n - 1)) == 0
}

/// Rounds `n` up to the next multiple of 8 using true ceiling division
/// (`((n + 7) / 8) * 8`, expressed as a mask since 8 is a power of two).
///
/// True ceiling is chosen over the classic overshooting `(n / 8 + 1) * 8`
/// rounding rule (which bumps an already-aligned `n` up by a full 8 bytes)
/// as the less surprising contract for callers.
#[inline]
pub const fn round_up_to_8(n: usize) -> usize {
    (n + 7) & !7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_of_two_checks() {
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(32));
        assert!(!is_power_of_two(0));
        assert!(!is_power_of_two(33));
    }

    #[test]
    fn round_up_is_true_ceiling() {
        assert_eq!(round_up_to_8(0), 0);
        assert_eq!(round_up_to_8(1), 8);
        assert_eq!(round_up_to_8(8), 8);
        assert_eq!(round_up_to_8(9), 16);
        assert_eq!(round_up_to_8(100), 104);
    }
}
