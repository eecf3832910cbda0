use crate::preset::FIXED_BASE_WINDOW_BITS;
use crate::ring::Ring;

use log::trace;
use num_bigint::BigUint;
use num_traits::One;

/// Precomputed table for repeated `base^exp mod m` with a fixed `base`.
///
/// The exponent is split into windows of [`FIXED_BASE_WINDOW_BITS`] bits and
/// window `i` stores `base^(d * 2^(w*i))` for every non-zero digit `d`, so an
/// exponentiation costs one multiplication per non-zero window instead of a
/// full square-and-multiply chain. Exponents wider than `max_exp_bits` fall
/// back to `modpow`.
#[derive(Debug, Clone)]
pub struct FixedBaseTable {
    ring: Ring,
    base: BigUint,
    max_exp_bits: usize,
    windows: Vec<Vec<BigUint>>,
}

impl FixedBaseTable {
    pub fn new(base: &BigUint, ring: &Ring, max_exp_bits: usize) -> Self {
        let digits = (1usize << FIXED_BASE_WINDOW_BITS) - 1;
        let window_count = max_exp_bits.div_ceil(FIXED_BASE_WINDOW_BITS);

        let base = ring.reduce(base);
        let mut windows = Vec::with_capacity(window_count);
        let mut step = base.clone();

        for _ in 0..window_count {
            let mut row = Vec::with_capacity(digits);
            let mut acc = step.clone();
            row.push(acc.clone());
            for _ in 1..digits {
                acc = ring.mul(&acc, &step);
                row.push(acc.clone());
            }
            // step^(2^w) = step^(2^w - 1) * step
            step = ring.mul(&acc, &step);
            windows.push(row);
        }

        trace!(
            "built fixed-base table: {} windows for {}-bit exponents",
            window_count, max_exp_bits
        );

        Self {
            ring: ring.clone(),
            base,
            max_exp_bits,
            windows,
        }
    }

    pub fn max_exp_bits(&self) -> usize {
        self.max_exp_bits
    }

    /// Computes `base^exp mod m`.
    pub fn pow(&self, exp: &BigUint) -> BigUint {
        if exp.bits() as usize > self.max_exp_bits {
            return self.base.modpow(exp, self.ring.modulus());
        }

        let mut result = BigUint::one();
        for (i, row) in self.windows.iter().enumerate() {
            let digit = window_digit(exp, i);
            if digit != 0 {
                result = self.ring.mul(&result, &row[digit - 1]);
            }
        }

        self.ring.reduce(&result)
    }
}

fn window_digit(exp: &BigUint, window: usize) -> usize {
    let start = (window * FIXED_BASE_WINDOW_BITS) as u64;

    (0..FIXED_BASE_WINDOW_BITS).fold(0usize, |digit, j| {
        if exp.bit(start + j as u64) {
            digit | (1 << j)
        } else {
            digit
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PheError;
    use crate::ring::random::{random_bits, random_below};

    #[test]
    fn test_matches_modpow() -> Result<(), PheError> {
        let modulus = random_bits(256) | BigUint::one();
        let ring = Ring::try_with(modulus.clone())?;
        let base = random_below(&modulus)?;
        let table = FixedBaseTable::new(&base, &ring, 130);

        for bits in [0usize, 1, 4, 5, 64, 128, 130] {
            let exp = random_bits(bits);
            assert_eq!(table.pow(&exp), base.modpow(&exp, &modulus));
        }
        Ok(())
    }

    #[test]
    fn test_wide_exponent_falls_back() -> Result<(), PheError> {
        let ring = Ring::try_with(BigUint::from(1_000_003u32))?;
        let base = BigUint::from(12345u32);
        let table = FixedBaseTable::new(&base, &ring, 8);

        let exp = BigUint::from(1u32) << 40u32;
        assert_eq!(table.pow(&exp), base.modpow(&exp, ring.modulus()));
        Ok(())
    }

    #[test]
    fn test_zero_exponent() -> Result<(), PheError> {
        let ring = Ring::try_with(BigUint::from(97u32))?;
        let table = FixedBaseTable::new(&BigUint::from(5u32), &ring, 16);
        assert_eq!(table.pow(&BigUint::from(0u32)), BigUint::one());
        Ok(())
    }
}
