//! Decimal digit helpers

/// Number of decimal digits in `n`; `0` has one digit.
pub fn num_digits(n: u64) -> u32 {
    n.checked_ilog10().map_or(1, |log| log + 1)
}

/// `10^exp`.
///
/// # Panics
///
/// Panics if `exp > 19`, the largest power of ten that fits a `u64`.
pub const fn pow10(exp: u8) -> u64 {
    10u64.pow(exp as u32)
}

/// Splits `n` into its high and low halves when it has an even digit count,
/// e.g. `1234 -> (12, 34)`.
pub fn split_even_digits(n: u64) -> Option<(u64, u64)> {
    let digits = num_digits(n);
    if digits % 2 != 0 {
        return None;
    }
    let half = pow10((digits / 2) as u8);
    Some((n / half, n % half))
}

/// The power of ten that shifts a number left past all of `n`'s digits,
/// `None` when `n` has 20 digits.
pub fn shift_past(n: u64) -> Option<u64> {
    10u64.checked_pow(num_digits(n))
}

/// Decimal concatenation `a || b`, `None` on overflow.
pub fn concat(a: u64, b: u64) -> Option<u64> {
    a.checked_mul(shift_past(b)?)?.checked_add(b)
}
