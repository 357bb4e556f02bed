mod common;

use common::{feed, sample};
use quboc::{logic, Expr, Vartype};

#[test]
fn broken_one_hot_is_reported() {
	let (a, b) = (Expr::binary("a"), Expr::binary("b"));
	let one_hot = Expr::constraint((a.clone() + b.clone() - 1i32).pow(2).unwrap(), "one_hot");
	let hmlt = 2i32 * a + b + 5i32 * one_hot;
	let model = hmlt.compile(5.0).unwrap();

	let decoded = model
		.decode_sample(&sample(&[("a", 1), ("b", 1)]), Vartype::Binary, &feed(&[]))
		.unwrap();
	let constraints = decoded.constraints(false);
	assert_eq!(constraints.get("one_hot"), Some(&(false, 1.0)));
	assert_eq!(decoded.constraints(true).len(), 1);
	assert_eq!(decoded.energy(), 8.0);

	let decoded = model
		.decode_sample(&sample(&[("a", 1), ("b", 0)]), Vartype::Binary, &feed(&[]))
		.unwrap();
	assert_eq!(decoded.constraints(false).get("one_hot"), Some(&(true, 0.0)));
	assert!(decoded.constraints(true).is_empty());
	assert_eq!(decoded.energy(), 2.0);
}

#[test]
fn custom_condition_widens_satisfaction() {
	let a = Expr::binary("a");
	let near_zero = Expr::constraint_with(a.clone() - 1, "near", |v| v.abs() < 1.5);
	let model = (near_zero + a).compile(5.0).unwrap();
	let decoded = model
		.decode_sample(&sample(&[("a", 0)]), Vartype::Binary, &feed(&[]))
		.unwrap();
	// value is -1, within the tolerance
	assert_eq!(decoded.constraints(false).get("near"), Some(&(true, -1.0)));
}

fn gate_energy(model: &quboc::CompiledModel, pairs: &[(&str, i32)]) -> f64 {
	model
		.energy(&sample(pairs), Vartype::Binary, &feed(&[]))
		.unwrap()
}

#[test]
fn logic_gates_evaluate_to_their_truth_tables() {
	let (a, b) = (Expr::binary("a"), Expr::binary("b"));

	let not_model = logic::not_(a.clone()).compile(5.0).unwrap();
	assert_eq!(gate_energy(&not_model, &[("a", 0)]), 1.0);
	assert_eq!(gate_energy(&not_model, &[("a", 1)]), 0.0);

	let and_model = logic::and_(a.clone(), b.clone()).compile(5.0).unwrap();
	let or_model = logic::or_(a.clone(), b.clone()).compile(5.0).unwrap();
	let xor_model = logic::xor(a, b).compile(5.0).unwrap();
	for (a_val, b_val) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
		let s = [("a", a_val), ("b", b_val)];
		assert_eq!(gate_energy(&and_model, &s), (a_val & b_val) as f64);
		assert_eq!(gate_energy(&or_model, &s), (a_val | b_val) as f64);
		assert_eq!(gate_energy(&xor_model, &s), (a_val ^ b_val) as f64);
	}
}

#[test]
fn not_const_penalises_equal_bits() {
	let (a, b) = (Expr::binary("a"), Expr::binary("b"));
	let model = logic::not_const(a, b, "not").compile(5.0).unwrap();
	assert_eq!(gate_energy(&model, &[("a", 1), ("b", 0)]), 0.0);
	assert_eq!(gate_energy(&model, &[("a", 0), ("b", 1)]), 0.0);
	assert!(gate_energy(&model, &[("a", 1), ("b", 1)]) > 0.0);
	assert!(gate_energy(&model, &[("a", 0), ("b", 0)]) > 0.0);
}

#[test]
fn and_const_penalises_wrong_outputs() {
	let (a, b, c) = (Expr::binary("a"), Expr::binary("b"), Expr::binary("c"));
	let model = logic::and_const(a, b, c, "and").compile(5.0).unwrap();
	for (a_val, b_val) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
		for c_val in [0, 1] {
			let energy = gate_energy(&model, &[("a", a_val), ("b", b_val), ("c", c_val)]);
			if c_val == (a_val & b_val) {
				assert_eq!(energy, 0.0);
			} else {
				assert!(energy > 0.0);
			}
		}
	}
}

#[test]
fn or_const_penalises_wrong_outputs() {
	let (a, b, c) = (Expr::binary("a"), Expr::binary("b"), Expr::binary("c"));
	let model = logic::or_const(a, b, c, "or").compile(5.0).unwrap();
	for (a_val, b_val) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
		for c_val in [0, 1] {
			let energy = gate_energy(&model, &[("a", a_val), ("b", b_val), ("c", c_val)]);
			if c_val == (a_val | b_val) {
				assert_eq!(energy, 0.0);
			} else {
				assert!(energy > 0.0);
			}
		}
	}
}

#[test]
fn xor_const_penalises_wrong_outputs() {
	let (a, b, c) = (Expr::binary("a"), Expr::binary("b"), Expr::binary("c"));
	let model = logic::xor_const(a, b, c, "xor").compile(5.0).unwrap();
	assert!(model.variables().contains(&"aux_xor".to_string()));
	for (a_val, b_val) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
		for c_val in [0, 1] {
			// Minimise over the auxiliary: the gate is satisfiable exactly
			// when c = a XOR b.
			let energy = [0, 1]
				.iter()
				.map(|&aux| {
					gate_energy(
						&model,
						&[("a", a_val), ("b", b_val), ("c", c_val), ("aux_xor", aux)],
					)
				})
				.fold(f64::INFINITY, f64::min);
			if c_val == (a_val ^ b_val) {
				assert_eq!(energy, 0.0);
			} else {
				assert!(energy > 0.0);
			}
		}
	}
}
