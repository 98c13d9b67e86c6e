/// Ajoute une erreur signée à un échantillon 8 bits, bornée à [0, 255].
///
/// Jamais de wraparound ni de panique, quel que soit `delta`.
///
/// # Example
/// ```
/// use ht_dither::saturate::saturating_add;
/// assert_eq!(saturating_add(250, 10), 255);
/// assert_eq!(saturating_add(5, -10), 0);
/// assert_eq!(saturating_add(100, -28), 72);
/// ```
#[must_use]
#[inline(always)]
pub fn saturating_add(base: u8, delta: i32) -> u8 {
    i32::from(base).saturating_add(delta).clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_over_full_domain() {
        for base in 0..=255u8 {
            for delta in -255..=255i32 {
                let expected = (i32::from(base) + delta).clamp(0, 255);
                assert_eq!(
                    i32::from(saturating_add(base, delta)),
                    expected,
                    "base={base} delta={delta}"
                );
            }
        }
    }

    #[test]
    fn extreme_deltas_do_not_wrap() {
        assert_eq!(saturating_add(0, i32::MIN), 0);
        assert_eq!(saturating_add(255, i32::MAX), 255);
        assert_eq!(saturating_add(0, i32::MAX), 255);
        assert_eq!(saturating_add(255, i32::MIN), 0);
    }
}
