//! Random test vectors for big-integer arithmetic.
//!
//! Each output file holds rows of `a,b,result` for one [`Operation`], with
//! operands drawn uniformly from `[-M, M]` and results computed exactly.

pub mod arithmetic;
pub mod config;
pub mod error;
pub mod generator;
pub mod sampler;

pub use arithmetic::Operation;
pub use config::{Config, ConfigFile};
pub use error::{GenError, Result};
pub use generator::{generate, generate_with_rng, FileReport};
pub use sampler::TestVector;
