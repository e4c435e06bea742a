//! Identity types for the recipe aggregate.
//!
//! Two kinds of identity coexist:
//! - persisted ids (`RecipeId`, `IngredientId`, ...) assigned by a store;
//! - in-process keys (`RecipeKey`, `IngredientKey`, `StepKey`) drawn from one
//!   monotonic counter when a value is created.
//!
//! Keys order children that have no persisted id yet and serve as the
//! non-owning back-reference from a child to its recipe.

use std::sync::atomic::{AtomicU64, Ordering};

/// Persisted recipe identity.
pub type RecipeId = i64;
/// Persisted ingredient identity.
pub type IngredientId = i64;
/// Persisted instruction step identity.
pub type StepId = i64;
/// Persisted nutrition record identity.
pub type NutritionId = i64;

static NEXT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_sequence() -> u64 {
    NEXT_SEQUENCE.fetch_add(1, Ordering::Relaxed)
}

/// Handle of one in-memory `Recipe` instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecipeKey(u64);

/// Handle of one in-memory `Ingredient`; also its creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IngredientKey(u64);

/// Handle of one in-memory `InstructionStep`; also its creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StepKey(u64);

impl RecipeKey {
    pub(crate) fn next() -> Self {
        Self(next_sequence())
    }
}

impl IngredientKey {
    pub(crate) fn next() -> Self {
        Self(next_sequence())
    }
}

impl StepKey {
    pub(crate) fn next() -> Self {
        Self(next_sequence())
    }
}
