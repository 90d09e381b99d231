//! Exact 64-bit number theory backing constant folding and root simplification.

use std::sync::LazyLock;

use num_rational::Ratio;
use num_traits::{CheckedAdd, CheckedMul, CheckedSub, Signed, ToPrimitive, Zero};
use tracing::debug;

use crate::error::{CasError, Result};

/// Primes below this bound are tried when stripping squared factors out of a radicand.
pub const PRIME_SIEVE_LIMIT: usize = 256;

static SMALL_PRIMES: LazyLock<Vec<u64>> = LazyLock::new(sieve_small_primes);

fn sieve_small_primes() -> Vec<u64> {
    let mut composite = vec![false; PRIME_SIEVE_LIMIT];
    let mut primes = Vec::new();
    for n in 2..PRIME_SIEVE_LIMIT {
        if composite[n] {
            continue;
        }
        primes.push(n as u64);
        let mut multiple = n * n;
        while multiple < PRIME_SIEVE_LIMIT {
            composite[multiple] = true;
            multiple += n;
        }
    }
    debug!(count = primes.len(), limit = PRIME_SIEVE_LIMIT, "built small prime table");
    primes
}

/// The primes below [`PRIME_SIEVE_LIMIT`], in increasing order.
pub fn small_primes() -> &'static [u64] {
    &SMALL_PRIMES
}

/// Binary (Stein) greatest common divisor. `gcd(0, n) == n`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    if a == 0 {
        return b;
    }
    if b == 0 {
        return a;
    }

    let mut shift = 0;
    while (a | b) & 1 == 0 {
        a >>= 1;
        b >>= 1;
        shift += 1;
    }

    while a != b {
        if a & 1 == 0 {
            a >>= 1;
        } else if b & 1 == 0 {
            b >>= 1;
        } else if a > b {
            a = (a - b) >> 1;
        } else {
            b = (b - a) >> 1;
        }
    }

    a << shift
}

/// Greatest common divisor of the magnitudes of two signed values.
///
/// Magnitudes are taken with [`i64::unsigned_abs`], so `i64::MIN` contributes `2^63`
/// and the result is always exact.
pub fn gcd_signed(a: i64, b: i64) -> u64 {
    gcd(a.unsigned_abs(), b.unsigned_abs())
}

/// Floor of the square root, reconstructed two bits of input at a time.
pub fn int_sqrt(x: u64) -> u64 {
    if x < 2 {
        return x;
    }

    let mut shift = 2u32;
    while shift < u64::BITS && (x >> shift) != 0 {
        shift += 2;
    }

    let mut result = 0u64;
    loop {
        result <<= 1;
        let candidate = result + 1;
        let head = x.checked_shr(shift).unwrap_or(0);
        if u128::from(candidate) * u128::from(candidate) <= u128::from(head) {
            result = candidate;
        }
        if shift == 0 {
            break;
        }
        shift -= 2;
    }

    result
}

/// Splits `x` into `(factor, remainder)` with `factor² × remainder == x`.
///
/// Squares of primes below [`PRIME_SIEVE_LIMIT`] are moved into `factor`. A squared prime
/// above the table bound stays in `remainder`, so the decomposition is valid but not always
/// maximal. Zero maps to `(0, 1)`.
pub fn simplify_sqrt(x: u64) -> (u64, u64) {
    if x == 0 {
        return (0, 1);
    }

    let mut factor = 1u64;
    let mut square = x;
    let mut unsquared = 1u64;

    while square & 3 == 0 {
        square >>= 2;
        factor <<= 1;
    }

    if square & 1 == 0 {
        unsquared <<= 1;
        square >>= 1;
    }

    // Everything up to 8 is already square free once powers of two are gone.
    if square > 8 {
        let root = int_sqrt(square);
        if root * root == square {
            factor *= root;
            square = 1;
        } else {
            for &p in small_primes().iter().skip(1) {
                let p_squared = p * p;
                if p_squared > square {
                    break;
                }

                while square % p_squared == 0 {
                    factor *= p;
                    square /= p_squared;
                }

                if square % p == 0 {
                    square /= p;
                    unsquared *= p;
                    if square == 1 {
                        break;
                    }
                }
            }
        }
    }

    (factor, square * unsquared)
}

/// Exponentiation by squaring with overflow checks. `0^0` is undefined.
pub fn checked_pow(base: i64, exponent: u64) -> Result<i64> {
    if base == 0 && exponent == 0 {
        return Err(CasError::undefined("0^0"));
    }
    if exponent == 0 {
        return Ok(1);
    }
    if base == 0 {
        return Ok(0);
    }

    let overflow = || {
        debug!(base, exponent, "power exceeds the 64-bit range");
        CasError::overflow(format!("{base}^{exponent}"))
    };

    let mut x = base;
    let mut n = exponent;
    let mut result = 1i64;
    while n > 1 {
        if n & 1 == 1 {
            result = result.checked_mul(x).ok_or_else(overflow)?;
        }
        x = x.checked_mul(x).ok_or_else(overflow)?;
        n >>= 1;
    }

    result.checked_mul(x).ok_or_else(overflow)
}

/// An exact rational over 64-bit integers, always reduced with a positive denominator.
pub type Fraction = Ratio<i64>;

fn fraction_overflow(what: String) -> CasError {
    debug!(%what, "fraction exceeds the 64-bit range");
    CasError::overflow(what)
}

/// Builds a reduced fraction; a zero denominator is undefined.
pub fn fraction(numer: i64, denom: i64) -> Result<Fraction> {
    if denom == 0 {
        return Err(CasError::undefined("division by zero"));
    }
    if denom > 0 {
        return Ok(Ratio::new(numer, denom));
    }
    match (numer.checked_neg(), denom.checked_neg()) {
        (Some(numer), Some(denom)) => Ok(Ratio::new(numer, denom)),
        // One side is i64::MIN: reduce first, the flipped sign may fit afterwards.
        _ => {
            let g = i128::from(gcd_signed(numer, denom));
            let numer = -(i128::from(numer) / g);
            let denom = -(i128::from(denom) / g);
            match (numer.to_i64(), denom.to_i64()) {
                (Some(numer), Some(denom)) => Ok(Ratio::new_raw(numer, denom)),
                _ => Err(fraction_overflow(format!("{numer}/{denom}"))),
            }
        }
    }
}

pub fn exact_add(x: Fraction, y: Fraction) -> Result<Fraction> {
    x.checked_add(&y)
        .ok_or_else(|| fraction_overflow(format!("{x} + {y}")))
}

pub fn exact_sub(x: Fraction, y: Fraction) -> Result<Fraction> {
    x.checked_sub(&y)
        .ok_or_else(|| fraction_overflow(format!("{x} - {y}")))
}

pub fn exact_mul(x: Fraction, y: Fraction) -> Result<Fraction> {
    x.checked_mul(&y)
        .ok_or_else(|| fraction_overflow(format!("{x} * {y}")))
}

/// Divides through the reciprocal, which keeps `i64::MIN` numerators out of the gcd.
pub fn exact_div(x: Fraction, y: Fraction) -> Result<Fraction> {
    exact_mul(x, exact_recip(y)?)
}

pub fn exact_neg(x: Fraction) -> Result<Fraction> {
    let numer = x
        .numer()
        .checked_neg()
        .ok_or_else(|| fraction_overflow(format!("-({x})")))?;
    Ok(Ratio::new_raw(numer, *x.denom()))
}

pub fn exact_abs(x: Fraction) -> Result<Fraction> {
    if x.is_negative() { exact_neg(x) } else { Ok(x) }
}

pub fn exact_recip(x: Fraction) -> Result<Fraction> {
    if x.is_zero() {
        return Err(CasError::undefined("division by zero"));
    }
    if *x.numer() == i64::MIN {
        return Err(fraction_overflow(format!("1/({x})")));
    }
    Ok(x.recip())
}

/// Raises to an integer power; a negative exponent takes the reciprocal first.
pub fn exact_pow(x: Fraction, exponent: i64) -> Result<Fraction> {
    let base = if exponent < 0 { exact_recip(x)? } else { x };
    let n = exponent.unsigned_abs();
    // Powers of coprime parts stay coprime, so the result is still reduced.
    Ok(Ratio::new_raw(
        checked_pow(*base.numer(), n)?,
        checked_pow(*base.denom(), n)?,
    ))
}
