//! Numeric helpers behind the fibonacci, prime, lcm and hcf operations

/// Longest Fibonacci prefix whose terms all fit in a `u64` (ends at F(93))
pub const MAX_FIBONACCI_TERMS: usize = 94;

/// Trial division up to the integer square root
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let mut i = 2;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

/// Euclid's algorithm
pub fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Least common multiple, `None` on overflow. `lcm(0, x)` is 0.
pub fn lcm(a: u64, b: u64) -> Option<u64> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

/// First `n` terms of 0, 1, 1, 2, 3, 5, ...
///
/// Returns `None` when a term would overflow `u64`.
pub fn fibonacci(n: usize) -> Option<Vec<u64>> {
    let mut seq: Vec<u64> = Vec::with_capacity(n.min(MAX_FIBONACCI_TERMS));
    while seq.len() < n {
        let next = match seq.len() {
            0 => 0,
            1 => 1,
            len => seq[len - 1].checked_add(seq[len - 2])?,
        };
        seq.push(next);
    }
    Some(seq)
}
