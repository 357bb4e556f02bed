use crate::error::{Error, Result};
use crate::model::{Sample, Vartype};
use std::collections::BTreeMap;

/// A sample interpreted against the compiled model: total energy,
/// per-sub-Hamiltonian energies, and per-constraint satisfaction.
#[derive(Clone, Debug)]
pub struct DecodedSample {
	sample: Sample,
	vartype: Vartype,
	energy: f64,
	subh: BTreeMap<String, f64>,
	constraints: BTreeMap<String, (bool, f64)>,
}

impl DecodedSample {
	pub(crate) fn new(
		sample: Sample,
		vartype: Vartype,
		energy: f64,
		subh: BTreeMap<String, f64>,
		constraints: BTreeMap<String, (bool, f64)>,
	) -> Self {
		Self {
			sample,
			vartype,
			energy,
			subh,
			constraints,
		}
	}

	/// The sample exactly as it was passed in.
	pub fn sample(&self) -> &Sample {
		&self.sample
	}

	pub fn vartype(&self) -> Vartype {
		self.vartype
	}

	pub fn energy(&self) -> f64 {
		self.energy
	}

	/// Energies of every labelled sub-Hamiltonian, constraints included.
	pub fn subh(&self) -> &BTreeMap<String, f64> {
		&self.subh
	}

	/// Constraint labels with their satisfaction and value.
	pub fn constraints(&self, only_broken: bool) -> BTreeMap<String, (bool, f64)> {
		self.constraints
			.iter()
			.filter(|(_, (satisfied, _))| !only_broken || !satisfied)
			.map(|(label, state)| (label.clone(), *state))
			.collect()
	}

	/// Looks up an array entry such as `"x[0][1]"` in the sample.
	pub fn array(&self, name: &str, indices: &[usize]) -> Result<i32> {
		let mut label = String::from(name);
		for index in indices {
			label.push_str(&format!("[{}]", index));
		}
		self.sample
			.get(&label)
			.copied()
			.ok_or(Error::VariableNotInSample(label))
	}
}
