use crate::errors::PheError;
use crate::preset::{MAX_EC_GIANT_STEPS, MAX_EC_MAX_PLAINTEXT, MAX_EC_TABLE_BITS};

use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::Identity;
use log::trace;

use std::collections::HashMap;
use std::fmt;

/// Checks the plaintext bound `B` shared by both EC keys.
pub(crate) fn check_max_plaintext(max_plaintext: u64) -> Result<(), PheError> {
    if max_plaintext == 0 || max_plaintext > MAX_EC_MAX_PLAINTEXT {
        return Err(PheError::InvalidParameters(format!(
            "EC plaintext bound must be in 1..={}, got {}",
            MAX_EC_MAX_PLAINTEXT, max_plaintext
        )));
    }

    Ok(())
}

/// Checks the plaintext bound `B` and table size `t` of an EC secret key.
pub(crate) fn check_params(max_plaintext: u64, table_bits: u32) -> Result<(), PheError> {
    check_max_plaintext(max_plaintext)?;
    if table_bits == 0 || table_bits > MAX_EC_TABLE_BITS {
        return Err(PheError::InvalidParameters(format!(
            "Baby-step table bits must be in 1..={}, got {}",
            MAX_EC_TABLE_BITS, table_bits
        )));
    }
    if max_plaintext >> table_bits > MAX_EC_GIANT_STEPS {
        return Err(PheError::InvalidParameters(format!(
            "Bound {} needs more than {} giant steps with a 2^{} table",
            max_plaintext, MAX_EC_GIANT_STEPS, table_bits
        )));
    }

    Ok(())
}

/// Baby-step/giant-step solver for `M = m·G` with `m` in `[−B, B]`.
///
/// Holds `j·G` for `j < 2^t` keyed by compressed encoding, so a lookup costs
/// at most `2B / 2^t + 1` point subtractions and compressions.
pub(crate) struct BabyStepTable {
    table_bits: u32,
    steps: HashMap<[u8; 32], u64>,
    giant: RistrettoPoint,
}

impl BabyStepTable {
    pub(crate) fn new(table_bits: u32) -> Self {
        let size = 1u64 << table_bits;
        let mut steps = HashMap::with_capacity(size as usize);
        let mut point = RistrettoPoint::identity();
        for j in 0..size {
            steps.insert(point.compress().to_bytes(), j);
            point += RISTRETTO_BASEPOINT_POINT;
        }
        trace!("built baby-step table with 2^{} entries", table_bits);

        Self {
            table_bits,
            steps,
            giant: point,
        }
    }

    pub(crate) fn table_bits(&self) -> u32 {
        self.table_bits
    }

    pub(crate) fn solve(&self, point: &RistrettoPoint, bound: u64) -> Option<i64> {
        let size = 1u64 << self.table_bits;
        let span = bound.checked_mul(2)?;

        // shift into [0, 2B] so every candidate is a non-negative multiple
        let mut current = point + RistrettoPoint::mul_base(&Scalar::from(bound));
        for i in 0..=(span / size) {
            if let Some(&j) = self.steps.get(current.compress().as_bytes()) {
                let shifted = i * size + j;
                if shifted > span {
                    return None;
                }
                return Some(shifted as i64 - bound as i64);
            }
            current -= self.giant;
        }

        None
    }
}

impl fmt::Debug for BabyStepTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BabyStepTable")
            .field("table_bits", &self.table_bits)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(m: i64) -> RistrettoPoint {
        let scalar = Scalar::from(m.unsigned_abs());
        let point = RistrettoPoint::mul_base(&scalar);
        if m < 0 { -point } else { point }
    }

    #[test]
    fn test_solves_whole_range() {
        let table = BabyStepTable::new(4);
        for m in -100..=100 {
            assert_eq!(table.solve(&encode(m), 100), Some(m));
        }
    }

    #[test]
    fn test_out_of_range_is_none() {
        let table = BabyStepTable::new(4);
        assert_eq!(table.solve(&encode(101), 100), None);
        assert_eq!(table.solve(&encode(-101), 100), None);
        assert_eq!(table.solve(&encode(5_000), 100), None);
    }

    #[test]
    fn test_param_checks() {
        assert!(check_params(1 << 24, 12).is_ok());
        assert!(check_params(0, 12).is_err());
        assert!(check_params(MAX_EC_MAX_PLAINTEXT + 1, 12).is_err());
        assert!(check_params(1 << 24, 0).is_err());
        assert!(check_params(1 << 24, MAX_EC_TABLE_BITS + 1).is_err());
    }

    #[test]
    fn test_giant_step_count_is_capped() {
        assert!(check_params(MAX_EC_MAX_PLAINTEXT, MAX_EC_TABLE_BITS).is_ok());
        assert!(check_params(MAX_EC_GIANT_STEPS << 12, 12).is_ok());
        assert!(matches!(
            check_params((MAX_EC_GIANT_STEPS + 1) << 12, 12),
            Err(PheError::InvalidParameters(_))
        ));
        assert!(check_params(MAX_EC_MAX_PLAINTEXT, 1).is_err());
    }
}
