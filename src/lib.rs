//! Bitblast lowers boolean and bit-vector expressions to CNF through a
//! cached Tseitin encoder, leaving the satisfiability search to a
//! pluggable SAT engine.
/// abstract SAT engine boundary and the bundled reference engine
pub mod engine;
/// scalar boolean algebra over concrete and symbolic bits
pub mod logic;
/// the constraint store: variables, clauses, assumptions, gate cache
pub mod model;
/// plumbing layer: literals, bits, operators, errors
pub mod types;
/// fixed-width bit-vectors and their arithmetic circuits
pub mod vector;

pub use crate::{
    engine::{Certificate, SatEngineIF, SimpleEngine, SolveLimits},
    model::{Model, Satisfiability},
    types::{Bit, GateOp, Literal, ModelError},
    vector::Vector,
};
