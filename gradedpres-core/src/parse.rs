//! Ring descriptions and polynomial strings.
//!
//! A ring description is a small JSON document:
//!
//! ```json
//! { "field": "QQ", "variables": ["x", "y"], "degrees": [1, 1],
//!   "relations": ["x^2 - y^2"] }
//! ```
//!
//! `degrees` defaults to all ones; an entry may also be a vector for a
//! multigraded ring.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::EngineError;
use crate::field::Field;
use crate::groebner::EngineConfig;
use crate::polynomial::Polynomial;
use crate::ring::GradedRing;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed ring description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected {found:?} at position {pos}")]
    Unexpected { pos: usize, found: char },

    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unknown variable {0:?}")]
    UnknownVariable(String),

    #[error("exponent {0:?} is not a small non-negative integer")]
    BadExponent(String),

    #[error("division by a non-constant or zero")]
    BadDivision,

    #[error("constant {0} is not defined over the coefficient field")]
    NotInField(BigRational),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DegreeSpec {
    Scalar(i64),
    Vector(Vec<i64>),
}

impl DegreeSpec {
    fn to_vec(&self) -> Vec<i64> {
        match self {
            DegreeSpec::Scalar(d) => vec![*d],
            DegreeSpec::Vector(v) => v.clone(),
        }
    }
}

fn default_field() -> String {
    "QQ".to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingDescription {
    #[serde(default = "default_field")]
    pub field: String,
    pub variables: Vec<String>,
    #[serde(default)]
    pub degrees: Vec<DegreeSpec>,
    #[serde(default)]
    pub relations: Vec<String>,
}

impl RingDescription {
    pub fn from_json(text: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn build(&self, config: &EngineConfig) -> Result<GradedRing, ParseError> {
        let field: Field = self.field.parse()?;
        let degrees = if self.degrees.is_empty() {
            vec![vec![1]; self.variables.len()]
        } else {
            self.degrees.iter().map(DegreeSpec::to_vec).collect()
        };
        let ring = GradedRing::polynomial(field.clone(), self.variables.clone(), degrees)?;
        if self.relations.is_empty() {
            return Ok(ring);
        }
        let relations = self
            .relations
            .iter()
            .map(|r| parse_polynomial(r, &self.variables, &field))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ring.quotient(&relations, config)?)
    }
}

/// Parse `text` as a polynomial in `names` over `field`.
pub fn parse_polynomial(text: &str, names: &[String], field: &Field) -> Result<Polynomial, ParseError> {
    let mut p = Parser {
        chars: text.chars().collect(),
        pos: 0,
        names,
        field,
    };
    let poly = p.expr()?;
    p.skip_ws();
    match p.peek() {
        None => Ok(poly),
        Some(c) => Err(ParseError::Unexpected { pos: p.pos, found: c }),
    }
}

struct Parser<'a> {
    chars: Vec<char>,
    pos: usize,
    names: &'a [String],
    field: &'a Field,
}

impl Parser<'_> {
    fn n_vars(&self) -> usize {
        self.names.len()
    }

    fn skip_ws(&mut self) {
        while self.chars.get(self.pos).is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expr(&mut self) -> Result<Polynomial, ParseError> {
        let negate = if self.eat('-') {
            true
        } else {
            self.eat('+');
            false
        };
        let mut acc = self.term()?;
        if negate {
            acc = acc.neg(self.field);
        }
        loop {
            if self.eat('+') {
                let t = self.term()?;
                acc = acc.add(&t, self.field);
            } else if self.eat('-') {
                let t = self.term()?;
                acc = acc.sub(&t, self.field);
            } else {
                return Ok(acc);
            }
        }
    }

    fn term(&mut self) -> Result<Polynomial, ParseError> {
        let mut acc = self.factor()?;
        loop {
            if self.eat('*') {
                let f = self.factor()?;
                acc = acc.mul(&f, self.field);
            } else if self.eat('/') {
                let f = self.factor()?;
                let c = constant_value(&f).ok_or(ParseError::BadDivision)?;
                acc = acc.scale(&self.field.inv(&c), self.field);
            } else {
                return Ok(acc);
            }
        }
    }

    fn factor(&mut self) -> Result<Polynomial, ParseError> {
        let base = self.atom()?;
        if self.eat('^') {
            self.skip_ws();
            let digits = self.take_while(|c| c.is_ascii_digit());
            let e: u32 = digits.parse().map_err(|_| ParseError::BadExponent(digits.clone()))?;
            return Ok(base.pow(e, self.field));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Polynomial, ParseError> {
        self.skip_ws();
        let c = self.peek().ok_or(ParseError::UnexpectedEnd)?;
        if c == '(' {
            self.pos += 1;
            let inner = self.expr()?;
            if !self.eat(')') {
                return match self.peek() {
                    Some(found) => Err(ParseError::Unexpected { pos: self.pos, found }),
                    None => Err(ParseError::UnexpectedEnd),
                };
            }
            return Ok(inner);
        }
        if c.is_ascii_digit() {
            let digits = self.take_while(|c| c.is_ascii_digit());
            let n: BigInt = digits.parse().map_err(|_| ParseError::Unexpected { pos: self.pos, found: c })?;
            let q = BigRational::from_integer(n);
            let value = self.field.element(&q).ok_or(ParseError::NotInField(q))?;
            return Ok(Polynomial::constant(value, self.n_vars()));
        }
        if c.is_alphabetic() || c == '_' {
            let name = self.take_while(|c| c.is_alphanumeric() || c == '_' || c == '\'');
            let index = self
                .names
                .iter()
                .position(|n| *n == name)
                .ok_or(ParseError::UnknownVariable(name))?;
            return Ok(Polynomial::var(index, self.n_vars()));
        }
        Err(ParseError::Unexpected { pos: self.pos, found: c })
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }
}

/// Value of a constant, non-zero polynomial.
fn constant_value(p: &Polynomial) -> Option<BigRational> {
    if p.len() != 1 {
        return None;
    }
    let (m, c) = p.terms.iter().next()?;
    (m.iter().all(|e| *e == 0) && !c.is_zero()).then(|| c.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monomial::MonomialOrder;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    fn show(text: &str) -> String {
        let n = names(&["x", "y"]);
        let f = Field::Rationals;
        let order = MonomialOrder::WeightedGrevlex(vec![1, 1]);
        parse_polynomial(text, &n, &f).unwrap().display(&n, &order, &f).to_string()
    }

    #[test]
    fn parses_sums_products_powers() {
        assert_eq!(show("x^2 - y^2"), "x^2 - y^2");
        assert_eq!(show("(x + y)^2"), "x^2 + 2*x*y + y^2");
        assert_eq!(show("-x*y + 3"), "-x*y + 3");
        assert_eq!(show("x/2"), "1/2*x");
    }

    #[test]
    fn reports_unknown_variables_and_trailing_input() {
        let n = names(&["x"]);
        let f = Field::Rationals;
        assert!(matches!(parse_polynomial("z", &n, &f), Err(ParseError::UnknownVariable(v)) if v == "z"));
        assert!(matches!(parse_polynomial("x )", &n, &f), Err(ParseError::Unexpected { found: ')', .. })));
        assert!(matches!(parse_polynomial("x^", &n, &f), Err(ParseError::BadExponent(_))));
        assert!(matches!(parse_polynomial("x / x", &n, &f), Err(ParseError::BadDivision)));
        assert!(matches!(parse_polynomial("(x", &n, &f), Err(ParseError::UnexpectedEnd)));
    }

    #[test]
    fn prime_field_constants_reduce() {
        let n = names(&["x"]);
        let f = Field::Prime(3);
        let p = parse_polynomial("3*x + 4", &n, &f).unwrap();
        assert_eq!(p, Polynomial::constant(f.from_int(1), 1));
    }

    #[test]
    fn builds_rings_from_json() {
        let text = r#"{ "variables": ["x", "y"], "degrees": [1, 2], "relations": ["x^2 - y"] }"#;
        let desc = RingDescription::from_json(text).unwrap();
        let ring = desc.build(&EngineConfig::default()).unwrap();
        assert_eq!(ring.field(), &Field::Rationals);
        assert_eq!(ring.degrees(), &[vec![1], vec![2]][..]);
        assert!(ring.is_quotient());
    }

    #[test]
    fn multigraded_degrees_deserialize() {
        let text = r#"{ "field": "ZZ/7", "variables": ["a", "b"], "degrees": [[1, 0], [0, 1]] }"#;
        let ring = RingDescription::from_json(text).unwrap().build(&EngineConfig::default()).unwrap();
        assert_eq!(ring.field(), &Field::Prime(7));
        assert_eq!(ring.degrees(), &[vec![1, 0], vec![0, 1]][..]);
    }

    #[test]
    fn bad_field_is_an_error() {
        let text = r#"{ "field": "ZZ/8", "variables": ["x"] }"#;
        let err = RingDescription::from_json(text).unwrap().build(&EngineConfig::default()).unwrap_err();
        assert!(matches!(err, ParseError::Engine(EngineError::InvalidCharacteristic(8))));
    }
}
