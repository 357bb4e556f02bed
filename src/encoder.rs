use rustc_hash::FxHashMap;

/// Bijection between variable labels and dense indices, assigned in
/// first-seen order. Owned by a single compilation.
#[derive(Clone, Debug, Default)]
pub struct Encoder {
	label_to_index: FxHashMap<String, u32>,
	labels: Vec<String>,
}

impl Encoder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn encode(&mut self, label: &str) -> u32 {
		if let Some(index) = self.label_to_index.get(label) {
			*index
		} else {
			let index = self.labels.len() as u32;
			self.label_to_index.insert(label.to_string(), index);
			self.labels.push(label.to_string());
			index
		}
	}

	/// Panics on an out-of-range index: only indices issued by this
	/// encoder may reach here.
	pub fn decode(&self, index: u32) -> &str {
		&self.labels[index as usize]
	}

	pub fn contains(&self, label: &str) -> bool {
		self.label_to_index.contains_key(label)
	}

	pub fn labels(&self) -> &[String] {
		&self.labels
	}

	pub fn len(&self) -> usize {
		self.labels.len()
	}
}

#[test]
fn encode_roundtrip() {
	let mut encoder = Encoder::new();
	let a = encoder.encode("a");
	let b = encoder.encode("b");
	assert_eq!((a, b), (0, 1));
	assert_eq!(encoder.encode("a"), 0);
	assert_eq!(encoder.decode(1), "b");
	assert_eq!(encoder.labels(), &["a".to_string(), "b".to_string()]);
}
