use crate::coeff::Coeff;
use crate::encoder::Encoder;
use crate::poly::{Poly, Prod};
use itertools::Itertools;
use std::collections::BTreeMap;

/// Lowers a polynomial to degree <= 2 by repeatedly substituting a fresh
/// variable for the pair of indices that co-occurs in the most
/// higher-degree products, adding the Rosenberg AND-penalty for each
/// substitution. Among pairs with equal counts the lexicographically
/// smallest `(i, j)` wins, so the emitted variable order is stable.
pub(crate) fn make_quadratic(mut poly: Poly, encoder: &mut Encoder, strength: &Coeff) -> Poly {
	warn_on_weak_strength(&poly, strength);
	while let Some((i, j)) = most_common_pair(&poly) {
		let label = format!("{}*{}", encoder.decode(i), encoder.decode(j));
		let aux = encoder.encode(&label);
		tracing::debug!(i, j, aux = %label, "substituting the most frequent pair");

		let mut reduced = Poly::new();
		for (prod, coeff) in poly.into_terms() {
			if prod.contains(i) && prod.contains(j) {
				reduced.add_term(prod.replace_pair(i, j, aux), coeff);
			} else {
				reduced.add_term(prod, coeff);
			}
		}
		poly = reduced;

		// AND-penalty enforcing aux = x_i * x_j, scaled by the strength:
		// S * (3 aux - 2 x_i aux - 2 x_j aux + x_i x_j)
		poly.add_term(Prod::var(aux), strength.scale(3.0));
		poly.add_term(Prod::pair(i, aux), strength.scale(-2.0));
		poly.add_term(Prod::pair(j, aux), strength.scale(-2.0));
		poly.add_term(Prod::pair(i, j), strength.clone());
	}
	poly
}

fn most_common_pair(poly: &Poly) -> Option<(u32, u32)> {
	let mut counter: BTreeMap<(u32, u32), u32> = BTreeMap::new();
	for (prod, _) in poly.iter() {
		if prod.degree() > 2 {
			for (&i, &j) in prod.indices().iter().tuple_combinations() {
				*counter.entry((i, j)).or_insert(0) += 1;
			}
		}
	}
	let mut best: Option<((u32, u32), u32)> = None;
	for (&pair, &count) in counter.iter() {
		match best {
			Some((_, best_count)) if count <= best_count => {}
			_ => best = Some((pair, count)),
		}
	}
	best.map(|(pair, _)| pair)
}

fn warn_on_weak_strength(poly: &Poly, strength: &Coeff) {
	let Some(strength_value) = strength.as_num() else {
		return;
	};
	let mut max_abs: f64 = 0.0;
	for (prod, coeff) in poly.iter() {
		if prod.degree() > 2 {
			if let Some(value) = coeff.as_num() {
				max_abs = max_abs.max(value.abs());
			}
		}
	}
	if max_abs > 0.0 && strength_value <= max_abs {
		tracing::warn!(
			strength = strength_value,
			max_coeff = max_abs,
			"reduction strength may be too weak to enforce the product substitutions"
		);
	}
}
