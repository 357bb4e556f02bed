use crate::coeff::Coeff;
use crate::error::{Error, Result};
use crate::model::CompiledModel;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

/// Predicate deciding whether a constraint value counts as satisfied.
pub type CheckFn = Arc<dyn Fn(f64) -> bool + Send + Sync>;

/// Immutable expression node. Hamiltonians are built bottom-up by
/// composing these with the usual operators and compiled afterwards.
#[derive(Clone)]
pub enum Expr {
	Binary(String),
	Spin(String),
	Placeholder(String),
	Num(f64),
	Add(Box<Expr>, Box<Expr>),
	Mul(Box<Expr>, Box<Expr>),
	SubH {
		label: String,
		expr: Box<Expr>,
	},
	Constraint {
		label: String,
		expr: Box<Expr>,
		condition: CheckFn,
	},
	WithPenalty {
		label: String,
		expr: Box<Expr>,
		penalty: Box<Expr>,
	},
	UserDefined(Box<Expr>),
}

impl Expr {
	#[inline]
	pub fn binary(label: impl Into<String>) -> Self {
		Expr::Binary(label.into())
	}

	#[inline]
	pub fn spin(label: impl Into<String>) -> Self {
		Expr::Spin(label.into())
	}

	#[inline]
	pub fn placeholder(label: impl Into<String>) -> Self {
		Expr::Placeholder(label.into())
	}

	#[inline]
	pub fn num(value: f64) -> Self {
		Expr::Num(value)
	}

	pub fn subh(expr: Expr, label: impl Into<String>) -> Self {
		Expr::SubH {
			label: label.into(),
			expr: Box::new(expr),
		}
	}

	/// Constraint satisfied when its value is exactly zero.
	pub fn constraint(expr: Expr, label: impl Into<String>) -> Self {
		Self::constraint_with(expr, label, |value| value == 0.0)
	}

	pub fn constraint_with<F>(expr: Expr, label: impl Into<String>, condition: F) -> Self
	where
		F: Fn(f64) -> bool + Send + Sync + 'static,
	{
		Expr::Constraint {
			label: label.into(),
			expr: Box::new(expr),
			condition: Arc::new(condition),
		}
	}

	pub fn with_penalty(expr: Expr, penalty: Expr, label: impl Into<String>) -> Self {
		Expr::WithPenalty {
			label: label.into(),
			expr: Box::new(expr),
			penalty: Box::new(penalty),
		}
	}

	pub fn user_defined(expr: Expr) -> Self {
		Expr::UserDefined(Box::new(expr))
	}

	/// `self` multiplied by itself `exponent` times.
	pub fn pow(self, exponent: u32) -> Result<Self> {
		if exponent == 0 {
			return Err(Error::NonPositiveExponent);
		}
		let mut out = self.clone();
		for _ in 1..exponent {
			out = out * self.clone();
		}
		Ok(out)
	}

	pub fn div(self, divisor: f64) -> Result<Self> {
		if divisor == 0.0 {
			return Err(Error::DivisionByZero);
		}
		Ok(self * (1.0 / divisor))
	}

	/// Compile with a numeric quadratisation strength.
	pub fn compile(&self, strength: f64) -> Result<CompiledModel> {
		if strength <= 0.0 {
			return Err(Error::NonPositiveStrength(strength));
		}
		self.compile_with_strength(Coeff::num(strength))
	}

	/// Compile with a strength resolved from the feed dict at evaluation
	/// time.
	pub fn compile_with_placeholder(&self, label: impl Into<String>) -> Result<CompiledModel> {
		self.compile_with_strength(Coeff::placeholder(label))
	}

	pub fn compile_with_strength(&self, strength: Coeff) -> Result<CompiledModel> {
		Ok(CompiledModel::build(self, strength))
	}
}

impl From<f64> for Expr {
	#[inline]
	fn from(value: f64) -> Self {
		Expr::Num(value)
	}
}

impl Neg for Expr {
	type Output = Expr;

	#[inline]
	fn neg(self) -> Self::Output {
		match self {
			Expr::Num(value) => Expr::Num(-value),
			other => Expr::Num(-1.0) * other,
		}
	}
}

impl Add for Expr {
	type Output = Expr;

	#[inline]
	fn add(self, other: Expr) -> Self::Output {
		match (self, other) {
			(Expr::Num(left), Expr::Num(right)) => Expr::Num(left + right),
			(Expr::Num(zero), other) if zero == 0.0 => other,
			(other, Expr::Num(zero)) if zero == 0.0 => other,
			(left, right) => Expr::Add(Box::new(left), Box::new(right)),
		}
	}
}

impl Sub for Expr {
	type Output = Expr;

	#[inline]
	fn sub(self, other: Expr) -> Self::Output {
		self + (-other)
	}
}

impl Mul for Expr {
	type Output = Expr;

	#[inline]
	fn mul(self, other: Expr) -> Self::Output {
		match (self, other) {
			(Expr::Num(left), Expr::Num(right)) => Expr::Num(left * right),
			(Expr::Num(zero), _) | (_, Expr::Num(zero)) if zero == 0.0 => Expr::Num(0.0),
			(Expr::Num(one), other) if one == 1.0 => other,
			(other, Expr::Num(one)) if one == 1.0 => other,
			(left, right) => Expr::Mul(Box::new(left), Box::new(right)),
		}
	}
}

macro_rules! impl_binary_op {
	($num: ty) => {
		impl Add<$num> for Expr {
			type Output = Expr;
			#[inline]
			fn add(self, other: $num) -> Self::Output {
				self + Expr::Num(other as f64)
			}
		}

		impl Add<Expr> for $num {
			type Output = Expr;
			#[inline]
			fn add(self, other: Expr) -> Self::Output {
				Expr::Num(self as f64) + other
			}
		}

		impl Sub<$num> for Expr {
			type Output = Expr;
			#[inline]
			fn sub(self, other: $num) -> Self::Output {
				self + Expr::Num(-(other as f64))
			}
		}

		impl Sub<Expr> for $num {
			type Output = Expr;
			#[inline]
			fn sub(self, other: Expr) -> Self::Output {
				Expr::Num(self as f64) + (-other)
			}
		}

		impl Mul<$num> for Expr {
			type Output = Expr;
			#[inline]
			fn mul(self, other: $num) -> Self::Output {
				self * Expr::Num(other as f64)
			}
		}

		impl Mul<Expr> for $num {
			type Output = Expr;
			#[inline]
			fn mul(self, other: Expr) -> Self::Output {
				Expr::Num(self as f64) * other
			}
		}
	};
}

impl_binary_op!(i8);
impl_binary_op!(i16);
impl_binary_op!(i32);
impl_binary_op!(i64);
impl_binary_op!(i128);
impl_binary_op!(f32);
impl_binary_op!(f64);

impl PartialEq for Expr {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Expr::Binary(a), Expr::Binary(b)) => a == b,
			(Expr::Spin(a), Expr::Spin(b)) => a == b,
			(Expr::Placeholder(a), Expr::Placeholder(b)) => a == b,
			(Expr::Num(a), Expr::Num(b)) => a == b,
			(Expr::Add(al, ar), Expr::Add(bl, br)) => al == bl && ar == br,
			(Expr::Mul(al, ar), Expr::Mul(bl, br)) => al == bl && ar == br,
			(
				Expr::SubH {
					label: al,
					expr: ae,
				},
				Expr::SubH {
					label: bl,
					expr: be,
				},
			) => al == bl && ae == be,
			// The condition is opaque; constraints compare by label and child.
			(
				Expr::Constraint {
					label: al,
					expr: ae,
					..
				},
				Expr::Constraint {
					label: bl,
					expr: be,
					..
				},
			) => al == bl && ae == be,
			(
				Expr::WithPenalty {
					label: al,
					expr: ae,
					penalty: ap,
				},
				Expr::WithPenalty {
					label: bl,
					expr: be,
					penalty: bp,
				},
			) => al == bl && ae == be && ap == bp,
			(Expr::UserDefined(a), Expr::UserDefined(b)) => a == b,
			_ => false,
		}
	}
}

impl Hash for Expr {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::mem::discriminant(self).hash(state);
		match self {
			Expr::Binary(label) | Expr::Spin(label) | Expr::Placeholder(label) => {
				label.hash(state)
			}
			Expr::Num(value) => value.to_bits().hash(state),
			Expr::Add(left, right) | Expr::Mul(left, right) => {
				left.hash(state);
				right.hash(state);
			}
			Expr::SubH { label, expr } | Expr::Constraint { label, expr, .. } => {
				label.hash(state);
				expr.hash(state);
			}
			Expr::WithPenalty {
				label,
				expr,
				penalty,
			} => {
				label.hash(state);
				expr.hash(state);
				penalty.hash(state);
			}
			Expr::UserDefined(expr) => expr.hash(state),
		}
	}
}

impl fmt::Debug for Expr {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Expr::Binary(label) => write!(f, "Binary({})", label),
			Expr::Spin(label) => write!(f, "Spin({})", label),
			Expr::Placeholder(label) => write!(f, "Placeholder({})", label),
			Expr::Num(value) => write!(f, "Num({})", value),
			Expr::Add(left, right) => write!(f, "Add({:?},{:?})", left, right),
			Expr::Mul(left, right) => write!(f, "Mul({:?},{:?})", left, right),
			Expr::SubH { label, expr } => write!(f, "SubH(label={},{:?})", label, expr),
			Expr::Constraint { label, expr, .. } => {
				write!(f, "Constraint(label={},{:?})", label, expr)
			}
			Expr::WithPenalty {
				label,
				expr,
				penalty,
			} => write!(f, "WithPenalty(label={},{:?},{:?})", label, expr, penalty),
			Expr::UserDefined(expr) => write!(f, "UserDefined({:?})", expr),
		}
	}
}
