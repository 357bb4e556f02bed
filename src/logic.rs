//! Logic gates over binary expressions, as plain user-level expressions,
//! plus labelled gate constraints whose energy is zero exactly on the
//! satisfying assignments.

use crate::expr::Expr;

/// `1 - a`
pub fn not_(a: Expr) -> Expr {
	Expr::user_defined(1 - a)
}

/// `a AND b`
pub fn and_(a: Expr, b: Expr) -> Expr {
	Expr::user_defined(a * b)
}

/// `a OR b`
pub fn or_(a: Expr, b: Expr) -> Expr {
	Expr::user_defined(not_(and_(not_(a), not_(b))))
}

/// `a XOR b`
pub fn xor(a: Expr, b: Expr) -> Expr {
	Expr::user_defined(a.clone() + b.clone() - 2 * (a * b))
}

/// Penalty enforcing `NOT(a) = b`.
pub fn not_const(a: Expr, b: Expr, label: impl Into<String>) -> Expr {
	let penalty = 2 * (a.clone() * b.clone()) - a - b + 1;
	Expr::subh(penalty, label)
}

/// Penalty enforcing `AND(a, b) = c`.
pub fn and_const(a: Expr, b: Expr, c: Expr, label: impl Into<String>) -> Expr {
	let penalty = a.clone() * b.clone() - 2 * (a + b) * c.clone() + 3 * c;
	Expr::subh(penalty, label)
}

/// Penalty enforcing `OR(a, b) = c`.
pub fn or_const(a: Expr, b: Expr, c: Expr, label: impl Into<String>) -> Expr {
	let penalty = a.clone() * b.clone() + (a + b) * (1 - 2 * c.clone()) + c;
	Expr::subh(penalty, label)
}

/// Penalty enforcing `XOR(a, b) = c`. Introduces one auxiliary binary
/// labelled `aux_<label>`.
pub fn xor_const(a: Expr, b: Expr, c: Expr, label: impl Into<String>) -> Expr {
	let label = label.into();
	let aux = Expr::binary(format!("aux_{}", label));
	let penalty = 2 * (a.clone() * b.clone()) - 2 * (a.clone() + b.clone()) * c.clone()
		- 4 * (a.clone() + b.clone()) * aux.clone()
		+ 4 * (aux.clone() * c.clone())
		+ a + b + c
		+ 4 * aux;
	Expr::subh(penalty, label)
}
