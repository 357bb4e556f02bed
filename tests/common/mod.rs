#![allow(dead_code)]

use quboc::{FeedDict, Qubo, Sample};

pub fn feed(pairs: &[(&str, f64)]) -> FeedDict {
	pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

pub fn sample(pairs: &[(&str, i32)]) -> Sample {
	pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

pub fn qubo(entries: &[((&str, &str), f64)]) -> Qubo<String> {
	entries
		.iter()
		.map(|((i, j), v)| ((i.to_string(), j.to_string()), *v))
		.collect()
}

/// Compares two QUBOs, treating the pair keys as unordered.
pub fn assert_qubo_eq(actual: &Qubo<String>, expected: &Qubo<String>) {
	assert_eq!(
		actual.len(),
		expected.len(),
		"number of entries differs: {:?} vs {:?}",
		actual,
		expected
	);
	for ((i, j), value) in expected.iter() {
		let found = actual
			.get(&(i.clone(), j.clone()))
			.or_else(|| actual.get(&(j.clone(), i.clone())))
			.unwrap_or_else(|| panic!("entry ({}, {}) is missing in {:?}", i, j, actual));
		approx::assert_abs_diff_eq!(*found, *value, epsilon = 1e-9);
	}
}
