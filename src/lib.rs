//! quboc compiles symbolic Hamiltonians built from binary and spin
//! variables, placeholders and constraints into QUBO or Ising models, and
//! decodes solver samples back against the original structure.
//!
//! # Examples
//!
//! ## Simple example
//! ```
//! # use quboc::Expr;
//! # use std::collections::HashMap;
//! let a = Expr::binary("a");
//! let b = Expr::binary("b");
//! let hmlt = (a + b - 1i32).pow(2).unwrap();
//! let model = hmlt.compile(5.0).unwrap();
//! let (qubo, offset) = model.to_qubo(&HashMap::new()).unwrap();
//! // displays {("a", "a"): -1.0, ("b", "b"): -1.0, ("a", "b"): 2.0}, 1.0
//! println!("{:?}, {}", &qubo, offset);
//! # assert_eq!(qubo.get(&("a".to_string(), "b".to_string())), Some(&2.0));
//! # assert_eq!(qubo.get(&("a".to_string(), "a".to_string())), Some(&-1.0));
//! # assert_eq!(offset, 1.0);
//! ```
//!
//! ## Example with a constraint and a placeholder
//! ```
//! # use quboc::{Expr, Vartype};
//! # use std::collections::HashMap;
//! let a = Expr::binary("a");
//! let b = Expr::binary("b");
//! let one_hot = Expr::constraint((a.clone() + b.clone() - 1i32).pow(2).unwrap(), "one_hot");
//! let hmlt = Expr::placeholder("M") * one_hot + 2i32 * a + b;
//! let model = hmlt.compile(5.0).unwrap();
//! let feed_dict = HashMap::from([("M".to_string(), 5.0)]);
//! let sample = HashMap::from([("a".to_string(), 0), ("b".to_string(), 1)]);
//! let decoded = model
//! 	.decode_sample(&sample, Vartype::Binary, &feed_dict)
//! 	.unwrap();
//! // displays 1.0, {}
//! println!("{}, {:?}", decoded.energy(), decoded.constraints(true));
//! # assert_eq!(decoded.energy(), 1.0);
//! # assert!(decoded.constraints(true).is_empty());
//! ```

mod coeff;
mod decode;
mod encoder;
mod error;
mod expand;
mod expr;
pub mod logic;
mod model;
mod poly;
mod reduce;

pub use coeff::{Coeff, CoeffProd, FeedDict};
pub use decode::DecodedSample;
pub use error::{Error, Result};
pub use expr::{CheckFn, Expr};
pub use model::{CompiledModel, IndexSample, Linear, Qubo, Sample, Vartype};
