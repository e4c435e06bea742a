//! Structural validation errors raised by model constructors and mutators.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// A structural invariant of the recipe model was violated.
///
/// Always surfaced to the caller; the model never corrects input silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Ingredient quantity must be strictly positive.
    NonPositiveQuantity(i64),
    /// Ingredient name is empty after trimming.
    EmptyIngredientName,
    /// Step numbers start at 1.
    ZeroStepNumber,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveQuantity(value) => {
                write!(f, "quantity must be > 0, got {value}")
            }
            Self::EmptyIngredientName => write!(f, "ingredient name must not be empty"),
            Self::ZeroStepNumber => write!(f, "step number must be >= 1"),
        }
    }
}

impl Error for ValidationError {}
