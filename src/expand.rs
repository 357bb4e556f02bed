use crate::coeff::Coeff;
use crate::encoder::Encoder;
use crate::expr::{CheckFn, Expr};
use crate::poly::{Poly, Prod};
use rustc_hash::FxHashSet;

/// A labelled sub-Hamiltonian recorded during expansion. Constraints are
/// the records carrying a condition.
#[derive(Clone)]
pub(crate) struct CompiledSubH {
	pub label: String,
	pub poly: Poly,
	pub condition: Option<CheckFn>,
}

/// Result of expanding one sub-expression: its value polynomial and the
/// penalties accumulated from `WithPenalty` descendants. Penalties never
/// multiply into the value, they only ever add up.
pub(crate) struct Expanded {
	pub poly: Poly,
	pub penalty: Poly,
}

impl Expanded {
	fn from_poly(poly: Poly) -> Self {
		Self {
			poly,
			penalty: Poly::new(),
		}
	}

	/// The polynomial handed to the order reducer.
	pub fn into_poly(self) -> Poly {
		self.poly + self.penalty
	}
}

/// Label-keyed side tables owned by the top-level expansion. Every table
/// follows the same rule: the first occurrence of a label wins.
#[derive(Default)]
pub(crate) struct SideTables {
	pub subhs: Vec<CompiledSubH>,
	recorded: FxHashSet<String>,
	expanded_penalties: FxHashSet<String>,
}

impl SideTables {
	fn record(&mut self, label: &str, poly: Poly, condition: Option<CheckFn>) {
		if self.recorded.insert(label.to_string()) {
			self.subhs.push(CompiledSubH {
				label: label.to_string(),
				poly,
				condition,
			});
		}
	}
}

impl Expr {
	pub(crate) fn expand(&self, encoder: &mut Encoder, tables: &mut SideTables) -> Expanded {
		match self {
			Expr::Binary(label) => Expanded::from_poly(Poly::from_term(
				Prod::var(encoder.encode(label)),
				Coeff::num(1.0),
			)),
			Expr::Spin(label) => {
				// s = 2x - 1
				let mut poly = Poly::from_term(Prod::var(encoder.encode(label)), Coeff::num(2.0));
				poly.add_term(Prod::constant(), Coeff::num(-1.0));
				Expanded::from_poly(poly)
			}
			Expr::Placeholder(label) => Expanded::from_poly(Poly::from_term(
				Prod::constant(),
				Coeff::placeholder(label.clone()),
			)),
			Expr::Num(value) => {
				Expanded::from_poly(Poly::from_term(Prod::constant(), Coeff::num(*value)))
			}
			Expr::Add(left, right) => {
				let left = left.expand(encoder, tables);
				let right = right.expand(encoder, tables);
				Expanded {
					poly: left.poly + right.poly,
					penalty: left.penalty + right.penalty,
				}
			}
			Expr::Mul(left, right) => {
				let left = left.expand(encoder, tables);
				let right = right.expand(encoder, tables);
				Expanded {
					poly: left.poly * right.poly,
					penalty: left.penalty + right.penalty,
				}
			}
			Expr::SubH { label, expr } => {
				let expanded = expr.expand(encoder, tables);
				tables.record(label, expanded.poly.clone(), None);
				expanded
			}
			Expr::Constraint {
				label,
				expr,
				condition,
			} => {
				let expanded = expr.expand(encoder, tables);
				tables.record(label, expanded.poly.clone(), Some(condition.clone()));
				expanded
			}
			Expr::WithPenalty {
				label,
				expr,
				penalty,
			} => {
				let expanded = expr.expand(encoder, tables);
				if !tables.expanded_penalties.insert(label.clone()) {
					// The same penalty object was already accounted for.
					return expanded;
				}
				let penalty = penalty.expand(encoder, tables);
				Expanded {
					poly: expanded.poly,
					penalty: expanded.penalty + penalty.poly + penalty.penalty,
				}
			}
			Expr::UserDefined(expr) => expr.expand(encoder, tables),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn expand(expr: &Expr) -> (Expanded, Encoder, SideTables) {
		let mut encoder = Encoder::new();
		let mut tables = SideTables::default();
		let expanded = expr.expand(&mut encoder, &mut tables);
		(expanded, encoder, tables)
	}

	#[test]
	fn binary_square_stays_linear() {
		let a = Expr::binary("a");
		let (expanded, _, _) = expand(&(a.clone() * a));
		assert_eq!(expanded.poly.len(), 1);
		assert_eq!(expanded.poly.get(&Prod::var(0)), Some(&Coeff::num(1.0)));
	}

	#[test]
	fn spin_expands_to_two_terms() {
		let (expanded, _, _) = expand(&Expr::spin("s"));
		assert_eq!(expanded.poly.get(&Prod::var(0)), Some(&Coeff::num(2.0)));
		assert_eq!(
			expanded.poly.get(&Prod::constant()),
			Some(&Coeff::num(-1.0))
		);
	}

	#[test]
	fn subh_label_first_write_wins() {
		let first = Expr::subh(Expr::binary("a"), "g");
		let second = Expr::subh(Expr::binary("b"), "g");
		let (_, _, tables) = expand(&(first + second));
		assert_eq!(tables.subhs.len(), 1);
		assert_eq!(
			tables.subhs[0].poly.get(&Prod::var(0)),
			Some(&Coeff::num(1.0))
		);
	}

	#[test]
	fn repeated_penalty_label_counts_once() {
		let gadget = |label: &str| {
			Expr::with_penalty(Expr::binary("a"), Expr::binary("p"), label.to_string())
		};
		let (expanded, _, _) = expand(&(gadget("w") + gadget("w")));
		// main = 2a, penalty = p (once)
		assert_eq!(expanded.poly.get(&Prod::var(0)), Some(&Coeff::num(2.0)));
		assert_eq!(expanded.penalty.len(), 1);
		assert_eq!(expanded.penalty.get(&Prod::var(1)), Some(&Coeff::num(1.0)));
	}

	#[test]
	fn penalties_accumulate_through_mul() {
		let left = Expr::with_penalty(Expr::binary("a"), Expr::num(3.0), "w");
		let product = left * Expr::binary("b");
		let (expanded, _, _) = expand(&product);
		assert_eq!(expanded.poly.get(&Prod::pair(0, 1)), Some(&Coeff::num(1.0)));
		assert_eq!(
			expanded.penalty.get(&Prod::constant()),
			Some(&Coeff::num(3.0))
		);
	}
}
