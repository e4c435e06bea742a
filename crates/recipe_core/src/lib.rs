//! Core domain logic for the recipe book.
//! This crate is the single source of truth for recipe invariants and the
//! computations derived from them.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::ingredient::Ingredient;
pub use model::keys::{IngredientKey, RecipeId, RecipeKey, StepKey};
pub use model::nutrition::NutritionalInfo;
pub use model::recipe::Recipe;
pub use model::step::InstructionStep;
pub use model::validation::ValidationError;
pub use model::value::{Difficulty, IngredientCategory, Unit};
pub use repo::memory_repo::MemoryRecipeStore;
pub use repo::recipe_repo::{RecipeStore, RepoError, RepoResult, SqliteRecipeStore};
pub use seed::{sample_recipes, seed_sample_recipes};
pub use service::computations::{
    is_vegetarian, scale_portions, total_cooking_time, ComputationError,
};
pub use service::recipe_service::{RecipeService, RecipeServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
