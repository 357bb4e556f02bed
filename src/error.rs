use crate::model::Vartype;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
	#[error("zero divide error")]
	DivisionByZero,

	#[error("`exponent` should be positive")]
	NonPositiveExponent,

	#[error("`strength` should be positive, given {0}")]
	NonPositiveStrength(f64),

	#[error("unknown vartype `{0}`, expected \"BINARY\" or \"SPIN\"")]
	UnknownVartype(String),

	#[error("the value of placeholder `{0}` was not given in the feed dict")]
	MissingPlaceholder(String),

	#[error("the value of `{0}` was not contained in the sample")]
	VariableNotInSample(String),

	#[error("`{0}` in the sample is not a variable of the model")]
	UnknownSampleVariable(String),

	#[error("the value {value} of `{label}` is invalid for vartype {vartype}")]
	InvalidSampleValue {
		label: String,
		value: i32,
		vartype: Vartype,
	},

	#[error("the sample has {got} variables while the model has {expected}")]
	SampleSizeMismatch { expected: usize, got: usize },

	#[error("the sample contains index {index} which is out of range for {size} variables")]
	IndexOutOfRange { index: u32, size: usize },
}
