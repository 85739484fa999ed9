use std::fmt;

use num_bigint::{BigInt, RandBigInt};
use num_traits::Zero;
use rand::Rng;

use crate::arithmetic::Operation;

/// One `(a, b, result)` row of an output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestVector {
    pub a: BigInt,
    pub b: BigInt,
    pub result: BigInt,
}

impl fmt::Display for TestVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.a, self.b, self.result)
    }
}

/// Draws an integer uniformly from `[-bound, bound]`.
///
/// `bound` must be positive.
pub fn sample_operand<R: Rng + ?Sized>(rng: &mut R, bound: &BigInt) -> BigInt {
    let low = -bound;
    let high = bound + 1u32;
    rng.gen_bigint_range(&low, &high)
}

/// Endless stream of test vectors for a single operation.
pub struct VectorIter<R: Rng> {
    rng: R,
    op: Operation,
    bound: BigInt,
    /// Bound for `b` when `op` divides; defaults to `bound`.
    divisor_bound: BigInt,
}

impl<R: Rng> VectorIter<R> {
    pub fn new(rng: R, op: Operation, bound: BigInt) -> Self {
        let divisor_bound = bound.clone();
        VectorIter {
            rng,
            op,
            bound,
            divisor_bound,
        }
    }

    /// Draws divisors from `[-divisor_bound, divisor_bound]` instead of the
    /// operand range. Ignored by operations that don't divide.
    pub fn with_divisor_bound(mut self, divisor_bound: BigInt) -> Self {
        self.divisor_bound = divisor_bound;
        self
    }

    fn next_vector(&mut self) -> TestVector {
        let a = sample_operand(&mut self.rng, &self.bound);
        let b = if self.op.needs_nonzero_divisor() {
            loop {
                let b = sample_operand(&mut self.rng, &self.divisor_bound);
                if !b.is_zero() {
                    break b;
                }
            }
        } else {
            sample_operand(&mut self.rng, &self.bound)
        };
        let result = self.op.apply(&a, &b);
        TestVector { a, b, result }
    }
}

impl<R: Rng> Iterator for VectorIter<R> {
    type Item = TestVector;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_vector())
    }
}

/// Iterates over freshly sampled vectors for `op` with operands in `[-bound, bound]`.
pub fn iter_vectors<R: Rng>(rng: R, op: Operation, bound: &BigInt) -> VectorIter<R> {
    VectorIter::new(rng, op, bound.clone())
}
