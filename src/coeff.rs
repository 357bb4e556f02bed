use crate::error::{Error, Result};
use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, HashMap};
use std::ops::{Add, Mul};

/// Placeholder values fed in at evaluation time.
pub type FeedDict = HashMap<String, f64>;

/// Product of placeholders raised to positive integer powers. The empty
/// product is the scalar unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoeffProd {
	powers: BTreeMap<String, u32>,
}

impl CoeffProd {
	pub fn unit() -> Self {
		Self::default()
	}

	pub fn placeholder(label: impl Into<String>) -> Self {
		let mut powers = BTreeMap::new();
		powers.insert(label.into(), 1);
		Self { powers }
	}

	pub fn is_unit(&self) -> bool {
		self.powers.is_empty()
	}

	pub fn mul(&self, other: &Self) -> Self {
		let mut powers = self.powers.clone();
		for (label, exponent) in other.powers.iter() {
			*powers.entry(label.clone()).or_insert(0) += exponent;
		}
		Self { powers }
	}

	pub fn evaluate(&self, feed_dict: &FeedDict) -> Result<f64> {
		let mut out = 1.0;
		for (label, exponent) in self.powers.iter() {
			let value = feed_dict
				.get(label)
				.ok_or_else(|| Error::MissingPlaceholder(label.clone()))?;
			out *= value.powi(*exponent as i32);
		}
		Ok(out)
	}
}

/// Coefficient of a polynomial term: a polynomial over placeholders with
/// f64 scalars. The single-monomial form keeps the plain-number path cheap.
#[derive(Clone, Debug)]
pub enum Coeff {
	Mono { scale: f64, vars: CoeffProd },
	Poly(FxHashMap<CoeffProd, f64>),
}

impl Coeff {
	#[inline]
	pub fn num(value: f64) -> Self {
		Coeff::Mono {
			scale: value,
			vars: CoeffProd::unit(),
		}
	}

	#[inline]
	pub fn placeholder(label: impl Into<String>) -> Self {
		Coeff::Mono {
			scale: 1.0,
			vars: CoeffProd::placeholder(label),
		}
	}

	pub fn is_zero(&self) -> bool {
		match self {
			Coeff::Mono { scale, .. } => *scale == 0.0,
			Coeff::Poly(terms) => terms.is_empty(),
		}
	}

	/// The scalar value, when no placeholder is involved.
	pub fn as_num(&self) -> Option<f64> {
		match self {
			Coeff::Mono { scale, vars } if vars.is_unit() => Some(*scale),
			_ => None,
		}
	}

	pub fn scale(&self, factor: f64) -> Self {
		if factor == 0.0 {
			return Coeff::num(0.0);
		}
		match self {
			Coeff::Mono { scale, vars } => Coeff::Mono {
				scale: scale * factor,
				vars: vars.clone(),
			},
			Coeff::Poly(terms) => Coeff::Poly(
				terms
					.iter()
					.map(|(vars, scale)| (vars.clone(), scale * factor))
					.collect(),
			),
		}
	}

	pub fn evaluate(&self, feed_dict: &FeedDict) -> Result<f64> {
		match self {
			Coeff::Mono { scale, vars } => Ok(scale * vars.evaluate(feed_dict)?),
			Coeff::Poly(terms) => {
				let mut sum = 0.0;
				for (vars, scale) in terms.iter() {
					sum += scale * vars.evaluate(feed_dict)?;
				}
				Ok(sum)
			}
		}
	}

	fn into_terms(self) -> FxHashMap<CoeffProd, f64> {
		match self {
			Coeff::Mono { scale, vars } => {
				let mut terms = FxHashMap::default();
				if scale != 0.0 {
					terms.insert(vars, scale);
				}
				terms
			}
			Coeff::Poly(terms) => terms,
		}
	}

	fn from_terms(mut terms: FxHashMap<CoeffProd, f64>) -> Self {
		terms.retain(|_, scale| *scale != 0.0);
		match terms.len() {
			0 => Coeff::num(0.0),
			1 => {
				let (vars, scale) = terms.into_iter().next().unwrap();
				Coeff::Mono { scale, vars }
			}
			_ => Coeff::Poly(terms),
		}
	}
}

impl Add for Coeff {
	type Output = Coeff;

	fn add(self, other: Coeff) -> Coeff {
		// Fast path: both sides are monomials over the same placeholders.
		if let (Coeff::Mono { scale: a, vars: u }, Coeff::Mono { scale: b, vars: v }) =
			(&self, &other)
		{
			if u == v {
				return Coeff::Mono {
					scale: a + b,
					vars: u.clone(),
				};
			}
		}
		let mut terms = self.into_terms();
		for (vars, scale) in other.into_terms() {
			*terms.entry(vars).or_insert(0.0) += scale;
		}
		Coeff::from_terms(terms)
	}
}

impl Mul for Coeff {
	type Output = Coeff;

	fn mul(self, other: Coeff) -> Coeff {
		match (self, other) {
			(Coeff::Mono { scale: a, vars: u }, Coeff::Mono { scale: b, vars: v }) => Coeff::Mono {
				scale: a * b,
				vars: u.mul(&v),
			},
			(Coeff::Mono { scale, vars }, Coeff::Poly(terms))
			| (Coeff::Poly(terms), Coeff::Mono { scale, vars }) => {
				if scale == 0.0 {
					return Coeff::num(0.0);
				}
				Coeff::from_terms(
					terms
						.into_iter()
						.map(|(v, s)| (vars.mul(&v), scale * s))
						.collect(),
				)
			}
			(Coeff::Poly(left), Coeff::Poly(right)) => {
				let mut terms: FxHashMap<CoeffProd, f64> = FxHashMap::default();
				for (u, a) in left.iter() {
					for (v, b) in right.iter() {
						*terms.entry(u.mul(v)).or_insert(0.0) += a * b;
					}
				}
				Coeff::from_terms(terms)
			}
		}
	}
}

impl PartialEq for Coeff {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Coeff::Mono { scale: a, vars: u }, Coeff::Mono { scale: b, vars: v }) => {
				a == b && u == v
			}
			_ => self.clone().into_terms() == other.clone().into_terms(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn feed(pairs: &[(&str, f64)]) -> FeedDict {
		pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
	}

	#[test]
	fn mono_mul_sums_exponents() {
		let p = Coeff::placeholder("p") * Coeff::placeholder("p") * Coeff::num(3.0);
		assert_eq!(p.evaluate(&feed(&[("p", 2.0)])).unwrap(), 12.0);
	}

	#[test]
	fn add_merges_and_prunes() {
		let p = Coeff::placeholder("p");
		let sum = p.clone() + Coeff::num(2.0) + p.clone().scale(-1.0);
		assert_eq!(sum, Coeff::num(2.0));
	}

	#[test]
	fn evaluate_is_linear() {
		let p = Coeff::placeholder("p") + Coeff::num(1.5);
		let q = Coeff::placeholder("q").scale(2.0);
		let dict = feed(&[("p", 3.0), ("q", 0.5)]);
		let lhs = (p.clone() + q.clone()).evaluate(&dict).unwrap();
		let rhs = p.evaluate(&dict).unwrap() + q.evaluate(&dict).unwrap();
		assert_eq!(lhs, rhs);
	}

	#[test]
	fn missing_placeholder_is_reported() {
		let p = Coeff::placeholder("alpha");
		match p.evaluate(&FeedDict::new()) {
			Err(Error::MissingPlaceholder(label)) => assert_eq!(label, "alpha"),
			other => panic!("unexpected result: {:?}", other),
		}
	}
}
