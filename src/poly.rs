use crate::coeff::{Coeff, FeedDict};
use crate::error::Result;
use rustc_hash::FxHashMap;
use std::ops::{Add, AddAssign, Mul, MulAssign};

/// Product of distinct variable indices, kept sorted ascending. The empty
/// product is the constant term. Binaries satisfy `x * x == x`, so the
/// set-union multiplication never needs exponents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Prod {
	indices: Vec<u32>,
}

impl Prod {
	pub fn constant() -> Self {
		Self::default()
	}

	pub fn var(index: u32) -> Self {
		Self {
			indices: vec![index],
		}
	}

	pub fn pair(i: u32, j: u32) -> Self {
		debug_assert!(i != j, "pair indices should be distinct");
		Self {
			indices: if i < j { vec![i, j] } else { vec![j, i] },
		}
	}

	pub fn degree(&self) -> usize {
		self.indices.len()
	}

	pub fn indices(&self) -> &[u32] {
		&self.indices
	}

	pub fn contains(&self, index: u32) -> bool {
		self.indices.binary_search(&index).is_ok()
	}

	/// Sorted set union of two products.
	pub fn merge(&self, other: &Self) -> Self {
		let mut indices = Vec::with_capacity(self.indices.len() + other.indices.len());
		let (mut i, mut j) = (0, 0);
		while i < self.indices.len() || j < other.indices.len() {
			let next = if j == other.indices.len()
				|| (i < self.indices.len() && self.indices[i] < other.indices[j])
			{
				i += 1;
				self.indices[i - 1]
			} else {
				j += 1;
				other.indices[j - 1]
			};
			if indices.last() != Some(&next) {
				indices.push(next);
			}
		}
		Self { indices }
	}

	/// Replaces the co-occurring pair `(i, j)` by the single index `k`.
	pub fn replace_pair(&self, i: u32, j: u32, k: u32) -> Self {
		let mut indices: Vec<u32> = self
			.indices
			.iter()
			.copied()
			.filter(|&index| index != i && index != j)
			.collect();
		match indices.binary_search(&k) {
			Ok(_) => {}
			Err(pos) => indices.insert(pos, k),
		}
		Self { indices }
	}
}

/// Sparse polynomial over variable products with placeholder-valued
/// coefficients. Terms whose coefficient collapses to zero are pruned on
/// every addition, so absent and zero mean the same thing.
#[derive(Clone, Debug, Default)]
pub struct Poly {
	terms: FxHashMap<Prod, Coeff>,
}

impl Poly {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_term(prod: Prod, coeff: Coeff) -> Self {
		let mut poly = Self::new();
		poly.add_term(prod, coeff);
		poly
	}

	pub fn add_term(&mut self, prod: Prod, coeff: Coeff) {
		if coeff.is_zero() {
			return;
		}
		match self.terms.remove(&prod) {
			None => {
				self.terms.insert(prod, coeff);
			}
			Some(existing) => {
				let merged = existing + coeff;
				if !merged.is_zero() {
					self.terms.insert(prod, merged);
				}
			}
		}
	}

	pub fn len(&self) -> usize {
		self.terms.len()
	}

	pub fn is_empty(&self) -> bool {
		self.terms.is_empty()
	}

	pub fn degree(&self) -> usize {
		self.terms.keys().map(Prod::degree).max().unwrap_or(0)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Prod, &Coeff)> {
		self.terms.iter()
	}

	pub fn get(&self, prod: &Prod) -> Option<&Coeff> {
		self.terms.get(prod)
	}

	pub(crate) fn into_terms(self) -> FxHashMap<Prod, Coeff> {
		self.terms
	}

	/// Energy of a full binary assignment, indexed by encoder index.
	pub(crate) fn energy(&self, assignment: &[i32], feed_dict: &FeedDict) -> Result<f64> {
		let mut energy = 0.0;
		for (prod, coeff) in self.terms.iter() {
			let value = coeff.evaluate(feed_dict)?;
			let prod_value: i32 = prod
				.indices()
				.iter()
				.map(|&index| assignment[index as usize])
				.product();
			energy += prod_value as f64 * value;
		}
		Ok(energy)
	}
}

impl AddAssign for Poly {
	fn add_assign(&mut self, other: Poly) {
		for (prod, coeff) in other.terms {
			self.add_term(prod, coeff);
		}
	}
}

impl Add for Poly {
	type Output = Poly;

	#[inline]
	fn add(self, other: Poly) -> Poly {
		// Upsert the smaller operand into the larger one.
		let (mut large, small) = if self.len() >= other.len() {
			(self, other)
		} else {
			(other, self)
		};
		large += small;
		large
	}
}

impl Mul for Poly {
	type Output = Poly;

	fn mul(self, other: Poly) -> Poly {
		let mut out = Poly::new();
		for (left_prod, left_coeff) in self.terms.iter() {
			for (right_prod, right_coeff) in other.terms.iter() {
				out.add_term(
					left_prod.merge(right_prod),
					left_coeff.clone() * right_coeff.clone(),
				);
			}
		}
		out
	}
}

impl MulAssign for Poly {
	fn mul_assign(&mut self, other: Poly) {
		*self = std::mem::take(self) * other;
	}
}
