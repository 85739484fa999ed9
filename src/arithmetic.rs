use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use serde::Deserialize;

use crate::error::GenError;

/// A binary operation over arbitrary-precision signed integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Operation {
    Multiply,
    Add,
    Subtract,
    /// Quotient truncated toward zero.
    Divide,
    /// Remainder with the sign of the dividend.
    Remainder,
}

impl Operation {
    /// The operations written when none are configured, in output order.
    pub const DEFAULT: [Operation; 3] = [Operation::Multiply, Operation::Add, Operation::Subtract];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Multiply => "mul",
            Operation::Add => "add",
            Operation::Subtract => "sub",
            Operation::Divide => "div",
            Operation::Remainder => "rem",
        }
    }

    /// File name used when no explicit output path is given, e.g. `mul_test.csv`.
    pub fn default_file_name(self) -> String {
        format!("{}_test.csv", self.name())
    }

    pub fn needs_nonzero_divisor(self) -> bool {
        matches!(self, Operation::Divide | Operation::Remainder)
    }

    /// Computes `a <op> b` exactly.
    ///
    /// Divide and remainder panic on a zero divisor, same as `BigInt` itself;
    /// the sampler never hands them one.
    pub fn apply(self, a: &BigInt, b: &BigInt) -> BigInt {
        match self {
            Operation::Multiply => a * b,
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            Operation::Divide => a / b,
            Operation::Remainder => a % b,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mul" | "multiply" => Ok(Operation::Multiply),
            "add" => Ok(Operation::Add),
            "sub" | "subtract" => Ok(Operation::Subtract),
            "div" | "divide" => Ok(Operation::Divide),
            "rem" | "remainder" => Ok(Operation::Remainder),
            _ => Err(GenError::UnknownOperation(s.to_string())),
        }
    }
}

impl TryFrom<String> for Operation {
    type Error = GenError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
