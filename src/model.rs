use crate::coeff::{Coeff, FeedDict};
use crate::decode::DecodedSample;
use crate::encoder::Encoder;
use crate::error::{Error, Result};
use crate::expand::{CompiledSubH, SideTables};
use crate::expr::Expr;
use crate::poly::Poly;
use crate::reduce::make_quadratic;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// Whether sample values are 0/1 or -1/+1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vartype {
	Binary,
	Spin,
}

impl FromStr for Vartype {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"BINARY" => Ok(Vartype::Binary),
			"SPIN" => Ok(Vartype::Spin),
			other => Err(Error::UnknownVartype(other.to_string())),
		}
	}
}

impl fmt::Display for Vartype {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Vartype::Binary => f.write_str("BINARY"),
			Vartype::Spin => f.write_str("SPIN"),
		}
	}
}

/// Assignment of variable labels to sample values.
pub type Sample = HashMap<String, i32>;
/// Assignment keyed by dense variable index.
pub type IndexSample = HashMap<u32, i32>;
/// QUBO biases keyed by unordered variable pairs; `(i, i)` entries carry
/// the linear biases.
pub type Qubo<K> = FxHashMap<(K, K), f64>;
/// Linear Ising biases.
pub type Linear<K> = FxHashMap<K, f64>;

/// A compiled Hamiltonian: the quadratic polynomial, the labelled
/// sub-Hamiltonian records, and the encoder that issued the indices.
/// Immutable; evaluate it as many times as needed under different feed
/// dicts.
pub struct CompiledModel {
	quadratic: Poly,
	subhs: Vec<CompiledSubH>,
	encoder: Encoder,
}

impl CompiledModel {
	pub(crate) fn build(expr: &Expr, strength: Coeff) -> Self {
		let mut encoder = Encoder::new();
		let mut tables = SideTables::default();
		let expanded = expr.expand(&mut encoder, &mut tables);
		let poly = expanded.into_poly();
		tracing::debug!(
			terms = poly.len(),
			degree = poly.degree(),
			variables = encoder.len(),
			"expanded the hamiltonian"
		);
		let quadratic = make_quadratic(poly, &mut encoder, &strength);
		Self {
			quadratic,
			subhs: tables.subhs,
			encoder,
		}
	}

	/// Variable labels in index order, auxiliary variables included.
	pub fn variables(&self) -> &[String] {
		self.encoder.labels()
	}

	pub fn to_qubo(&self, feed_dict: &FeedDict) -> Result<(Qubo<String>, f64)> {
		self.build_qubo(feed_dict, |index| self.encoder.decode(index).to_string())
	}

	pub fn to_qubo_with_index(&self, feed_dict: &FeedDict) -> Result<(Qubo<u32>, f64)> {
		self.build_qubo(feed_dict, |index| index)
	}

	pub fn to_ising(&self, feed_dict: &FeedDict) -> Result<(Linear<String>, Qubo<String>, f64)> {
		self.build_ising(feed_dict, |index| self.encoder.decode(index).to_string())
	}

	pub fn to_ising_with_index(
		&self,
		feed_dict: &FeedDict,
	) -> Result<(Linear<u32>, Qubo<u32>, f64)> {
		self.build_ising(feed_dict, |index| index)
	}

	pub fn energy(&self, sample: &Sample, vartype: Vartype, feed_dict: &FeedDict) -> Result<f64> {
		let assignment = self.normalize(sample, vartype)?;
		self.quadratic.energy(&assignment, feed_dict)
	}

	pub fn energies(
		&self,
		samples: &[Sample],
		vartype: Vartype,
		feed_dict: &FeedDict,
	) -> Result<Vec<f64>> {
		samples
			.iter()
			.map(|sample| self.energy(sample, vartype, feed_dict))
			.collect()
	}

	pub fn decode_sample(
		&self,
		sample: &Sample,
		vartype: Vartype,
		feed_dict: &FeedDict,
	) -> Result<DecodedSample> {
		let assignment = self.normalize(sample, vartype)?;
		let energy = self.quadratic.energy(&assignment, feed_dict)?;
		let mut subh = BTreeMap::new();
		let mut constraints = BTreeMap::new();
		for record in self.subhs.iter() {
			let value = record.poly.energy(&assignment, feed_dict)?;
			subh.insert(record.label.clone(), value);
			if let Some(condition) = &record.condition {
				let satisfied = (condition.as_ref())(value);
				constraints.insert(record.label.clone(), (satisfied, value));
			}
		}
		Ok(DecodedSample::new(
			sample.clone(),
			vartype,
			energy,
			subh,
			constraints,
		))
	}

	/// Decodes a batch of samples in parallel.
	pub fn decode_samples(
		&self,
		samples: &[Sample],
		vartype: Vartype,
		feed_dict: &FeedDict,
	) -> Result<Vec<DecodedSample>> {
		samples
			.par_iter()
			.map(|sample| self.decode_sample(sample, vartype, feed_dict))
			.collect()
	}

	pub fn decode_sample_with_index(
		&self,
		sample: &IndexSample,
		vartype: Vartype,
		feed_dict: &FeedDict,
	) -> Result<DecodedSample> {
		let sample = self.index_sample_to_labels(sample)?;
		self.decode_sample(&sample, vartype, feed_dict)
	}

	/// Relabels a dense sample vector, in variable order.
	pub fn sample_from_vec(&self, values: &[i32]) -> Result<Sample> {
		if values.len() != self.encoder.len() {
			return Err(Error::SampleSizeMismatch {
				expected: self.encoder.len(),
				got: values.len(),
			});
		}
		Ok(self
			.variables()
			.iter()
			.zip(values.iter())
			.map(|(label, value)| (label.clone(), *value))
			.collect())
	}

	fn index_sample_to_labels(&self, sample: &IndexSample) -> Result<Sample> {
		let mut out = Sample::with_capacity(sample.len());
		for (&index, &value) in sample.iter() {
			if index as usize >= self.encoder.len() {
				return Err(Error::IndexOutOfRange {
					index,
					size: self.encoder.len(),
				});
			}
			out.insert(self.encoder.decode(index).to_string(), value);
		}
		Ok(out)
	}

	/// Checks the sample against the model variables and maps it to a
	/// dense binary assignment in index order.
	fn normalize(&self, sample: &Sample, vartype: Vartype) -> Result<Vec<i32>> {
		for label in sample.keys() {
			if !self.encoder.contains(label) {
				return Err(Error::UnknownSampleVariable(label.clone()));
			}
		}
		let mut assignment = Vec::with_capacity(self.encoder.len());
		for label in self.variables() {
			let value = *sample
				.get(label)
				.ok_or_else(|| Error::VariableNotInSample(label.clone()))?;
			let binary = match (vartype, value) {
				(Vartype::Binary, 0) | (Vartype::Binary, 1) => value,
				(Vartype::Spin, -1) => 0,
				(Vartype::Spin, 1) => 1,
				_ => {
					return Err(Error::InvalidSampleValue {
						label: label.clone(),
						value,
						vartype,
					})
				}
			};
			assignment.push(binary);
		}
		Ok(assignment)
	}

	fn build_qubo<K, F>(&self, feed_dict: &FeedDict, key: F) -> Result<(Qubo<K>, f64)>
	where
		K: Eq + Hash,
		F: Fn(u32) -> K,
	{
		let mut qubo = Qubo::default();
		let mut offset = 0.0;
		for (prod, coeff) in self.quadratic.iter() {
			let value = coeff.evaluate(feed_dict)?;
			if value == 0.0 {
				continue;
			}
			match prod.indices() {
				[] => offset += value,
				&[i] => {
					qubo.insert((key(i), key(i)), value);
				}
				&[i, j] => {
					qubo.insert((key(i), key(j)), value);
				}
				_ => unreachable!("compiled polynomial should be quadratic"),
			}
		}
		Ok((qubo, offset))
	}

	fn build_ising<K, F>(&self, feed_dict: &FeedDict, key: F) -> Result<(Linear<K>, Qubo<K>, f64)>
	where
		K: Eq + Hash + Clone,
		F: Fn(u32) -> K,
	{
		// x = (s + 1) / 2
		let mut linear = Linear::default();
		let mut quadratic = Qubo::default();
		let mut offset = 0.0;
		for (prod, coeff) in self.quadratic.iter() {
			let value = coeff.evaluate(feed_dict)?;
			if value == 0.0 {
				continue;
			}
			match prod.indices() {
				[] => offset += value,
				&[i] => {
					offset += value / 2.0;
					*linear.entry(key(i)).or_insert(0.0) += value / 2.0;
				}
				&[i, j] => {
					offset += value / 4.0;
					*linear.entry(key(i)).or_insert(0.0) += value / 4.0;
					*linear.entry(key(j)).or_insert(0.0) += value / 4.0;
					quadratic.insert((key(i), key(j)), value / 4.0);
				}
				_ => unreachable!("compiled polynomial should be quadratic"),
			}
		}
		linear.retain(|_, value| *value != 0.0);
		Ok((linear, quadratic, offset))
	}
}

impl fmt::Debug for CompiledModel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CompiledModel")
			.field("terms", &self.quadratic.len())
			.field("variables", &self.encoder.labels())
			.field("subhs", &self.subhs.len())
			.finish()
	}
}
