use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EngineError;

/// Coefficient field of a ring. Elements are carried as `BigRational`;
/// for prime fields they are kept as integers in `[0, p)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Rationals,
    Prime(u64),
}

impl Field {
    /// Build `ZZ/p`, rejecting composite moduli.
    pub fn prime(p: u64) -> Result<Self, EngineError> {
        if p < 2 || (2u64..).take_while(|d| d * d <= p).any(|d| p % d == 0) {
            return Err(EngineError::InvalidCharacteristic(p));
        }
        Ok(Field::Prime(p))
    }

    pub fn characteristic(&self) -> u64 {
        match self {
            Field::Rationals => 0,
            Field::Prime(p) => *p,
        }
    }

    /// Map an arbitrary rational into this field. `None` when the
    /// denominator vanishes modulo the characteristic.
    pub fn element(&self, q: &BigRational) -> Option<BigRational> {
        match self {
            Field::Rationals => Some(q.clone()),
            Field::Prime(p) => {
                let p = BigInt::from(*p);
                let den = q.denom().mod_floor(&p);
                if den.is_zero() {
                    return None;
                }
                let num = q.numer().mod_floor(&p);
                let inv = mod_inverse(&den, &p);
                Some(BigRational::from_integer((num * inv).mod_floor(&p)))
            }
        }
    }

    pub fn from_int(&self, n: i64) -> BigRational {
        self.reduce(BigRational::from_integer(BigInt::from(n)))
    }

    fn reduce(&self, q: BigRational) -> BigRational {
        match self {
            Field::Rationals => q,
            Field::Prime(p) => {
                // Inputs here are always integral.
                let p = BigInt::from(*p);
                BigRational::from_integer(q.to_integer().mod_floor(&p))
            }
        }
    }

    pub fn add(&self, a: &BigRational, b: &BigRational) -> BigRational {
        self.reduce(a + b)
    }

    pub fn sub(&self, a: &BigRational, b: &BigRational) -> BigRational {
        self.reduce(a - b)
    }

    pub fn mul(&self, a: &BigRational, b: &BigRational) -> BigRational {
        self.reduce(a * b)
    }

    pub fn neg(&self, a: &BigRational) -> BigRational {
        self.reduce(-a.clone())
    }

    /// Multiplicative inverse. Callers never pass zero.
    pub fn inv(&self, a: &BigRational) -> BigRational {
        match self {
            Field::Rationals => a.recip(),
            Field::Prime(p) => {
                let p = BigInt::from(*p);
                BigRational::from_integer(mod_inverse(&a.to_integer(), &p))
            }
        }
    }

    pub fn div(&self, a: &BigRational, b: &BigRational) -> BigRational {
        self.mul(a, &self.inv(b))
    }

    /// Render a coefficient: prime field elements are shown in the
    /// symmetric range so that `p - 1` prints as `-1`.
    pub fn display(&self, c: &BigRational) -> BigRational {
        match self {
            Field::Rationals => c.clone(),
            Field::Prime(p) => {
                let p = BigInt::from(*p);
                let n = c.to_integer();
                if (&n * BigInt::from(2)) > p {
                    BigRational::from_integer(n - p)
                } else {
                    c.clone()
                }
            }
        }
    }
}

fn mod_inverse(a: &BigInt, p: &BigInt) -> BigInt {
    let ext = a.mod_floor(p).extended_gcd(p);
    let x = ext.x.mod_floor(p);
    if ext.gcd.abs().is_one() {
        x
    } else {
        BigInt::zero()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Rationals => write!(f, "QQ"),
            Field::Prime(p) => write!(f, "ZZ/{}", p),
        }
    }
}

impl std::str::FromStr for Field {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t == "QQ" || t == "Q" {
            return Ok(Field::Rationals);
        }
        match t.strip_prefix("ZZ/").and_then(|p| p.trim().parse::<u64>().ok()) {
            Some(p) => Field::prime(p),
            None => Err(EngineError::UnknownField(t.to_string())),
        }
    }
}
