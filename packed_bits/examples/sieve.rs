//! Counts primes below a limit with a sieve of Eratosthenes.
//!
//! Run with `RUST_LOG=debug` to see which marking kernel was selected.
//!
//! ```text
//! cargo run --release --example sieve -- 10000000
//! ```

use std::time::Instant;

use packed_bits::{BitVecError, BitVector, simd};
use tracing::info;

/// Returns a vector where bit `n` is set iff `n` is not prime.
fn sieve(limit: usize) -> Result<BitVector, BitVecError> {
    let mut composite = BitVector::with_len(limit + 1, false)?;
    composite.set_progression(0, 1, 2.min(limit + 1))?;
    if limit >= 4 {
        composite.set_progression(4, 2, (limit - 4) / 2 + 1)?;
    }

    // Only odd multiples of odd primes are left to mark.
    let mut p = 3;
    while p * p <= limit {
        let first = p * p;
        let count = (limit - first) / (2 * p) + 1;
        // SAFETY: the last term is `first + (count - 1) * 2p <= limit`.
        unsafe { composite.set_progression_unchecked(first, 2 * p, count) };
        p = composite.skip_ones(p + 1)?;
    }
    Ok(composite)
}

fn main() -> Result<(), BitVecError> {
    tracing_subscriber::fmt::init();

    let limit = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(10_000_000usize);

    info!(limit, kernel = ?simd::kernel(), "sieving");
    let start = Instant::now();
    let composite = sieve(limit)?;
    let elapsed = start.elapsed();

    let primes = composite.len() - composite.count_ones();
    println!("{primes} primes up to {limit} ({elapsed:?})");

    // Walk the first few primes by skipping runs of composites.
    let mut first = Vec::new();
    let mut pos = 0;
    while first.len() < 10 && pos < composite.len() {
        pos = composite.skip_ones(pos)?;
        if pos < composite.len() {
            first.push(pos);
            pos += 1;
        }
    }
    println!("first primes: {first:?}");
    Ok(())
}
