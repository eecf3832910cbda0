use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// The "L" function shared by Paillier and Okamoto–Uchiyama: `(u - 1) / d`.
///
/// Returns zero when `u` is zero, which only happens for malformed input.
pub fn l_function(u: &BigUint, d: &BigUint) -> BigUint {
    if u.is_zero() {
        return BigUint::zero();
    }

    (u - BigUint::one()) / d
}

/// Least common multiple of two unsigned integers.
pub fn lcm(a: &BigUint, b: &BigUint) -> BigUint {
    a.lcm(b)
}

/// Lower-case hexadecimal form of an unsigned integer.
pub fn to_hex(value: &BigUint) -> String {
    value.to_str_radix(16)
}

/// Lower-case hexadecimal form of a signed integer, with a leading `-` when negative.
pub fn signed_to_hex(value: &BigInt) -> String {
    value.to_str_radix(16)
}
