//! Deterministic tie-breaking.
//!
//! Candidates that tie on every matching rule are ordered by a pseudo-random
//! key derived from the querying user's name and the current calendar date.
//! The key is reproducible for the same `(seed, name)` in any process, and
//! the seed changes every day, so tied picks rotate daily on a static roster.

use chrono::NaiveDate;

/// 32-bit rolling string hash (`h = h * 31 + unit`) over UTF-16 code units
///
/// Arithmetic wraps like a two's-complement `i32`; the result is the unsigned
/// absolute value of the final hash.
pub fn hash_string(s: &str) -> u32 {
    let hash = s.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });
    hash.unsigned_abs()
}

/// Per-user, per-day seed: `hash_string("{name}|{YYYY-MM-DD}")`
pub fn stable_seed(name: &str, date: NaiveDate) -> u32 {
    hash_string(&format!("{}|{}", name, date.format("%Y-%m-%d")))
}

/// Pseudo-random value in `[0, 1)`: fractional part of `sin(x) * 10000`
#[inline]
pub fn seeded_random(x: f64) -> f64 {
    let v = x.sin() * 10000.0;
    v - v.floor()
}

/// Sort key used to break ties between candidates
#[inline]
pub fn tie_break_key(seed: u32, candidate_name: &str) -> f64 {
    seeded_random(f64::from(seed) + f64::from(hash_string(candidate_name)))
}
