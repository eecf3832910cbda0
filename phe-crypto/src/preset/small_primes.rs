use lazy_static::lazy_static;

/// Odd primes below this limit are used to sieve prime candidates.
pub const SIEVE_LIMIT: usize = 2_000;

lazy_static! {
    /// All odd primes below [`SIEVE_LIMIT`], ascending.
    pub static ref SMALL_PRIMES: Vec<u32> = {
        let mut composite = vec![false; SIEVE_LIMIT];
        let mut primes = Vec::new();

        for i in 2..SIEVE_LIMIT {
            if composite[i] {
                continue;
            }
            if i != 2 {
                primes.push(i as u32);
            }
            for multiple in (i * i..SIEVE_LIMIT).step_by(i) {
                composite[multiple] = true;
            }
        }

        primes
    };
}
