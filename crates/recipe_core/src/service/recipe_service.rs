//! Recipe use-case service.
//!
//! # Responsibility
//! - Lookup and search entry points for presentation layers.
//! - Run computations on stored recipes and persist results.
//!
//! # Invariants
//! - A missing identity is reported as `None`, never as an error.
//! - `scale_portions` saves only after the computation succeeded.

use crate::model::keys::RecipeId;
use crate::model::recipe::Recipe;
use crate::model::value::Difficulty;
use crate::repo::recipe_repo::{RecipeStore, RepoError, RepoResult};
use crate::service::computations::{self, ComputationError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for compute-then-persist use-cases.
#[derive(Debug)]
pub enum RecipeServiceError {
    Computation(ComputationError),
    Repo(RepoError),
}

impl Display for RecipeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Computation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RecipeServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Computation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ComputationError> for RecipeServiceError {
    fn from(value: ComputationError) -> Self {
        Self::Computation(value)
    }
}

impl From<RepoError> for RecipeServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Recipe service facade over a store implementation.
pub struct RecipeService<S: RecipeStore> {
    store: S,
}

impl<S: RecipeStore> RecipeService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn get_all(&self) -> RepoResult<Vec<Recipe>> {
        self.store.find_all()
    }

    pub fn get_by_id(&self, id: RecipeId) -> RepoResult<Option<Recipe>> {
        self.store.find_by_id(id)
    }

    /// Persists the aggregate; identities are written back into `recipe`.
    pub fn save(&mut self, recipe: &mut Recipe) -> RepoResult<RecipeId> {
        self.store.save(recipe)
    }

    /// Deletes a recipe and its children. Returns `false` when absent.
    pub fn delete(&mut self, id: RecipeId) -> RepoResult<bool> {
        self.store.delete_by_id(id)
    }

    /// Case-insensitive containment search on recipe names.
    ///
    /// `None` or an empty string returns every recipe.
    pub fn search_by_name(&self, text: Option<&str>) -> RepoResult<Vec<Recipe>> {
        match text {
            Some(text) if !text.is_empty() => self.store.find_by_name_containing(text),
            _ => self.store.find_all(),
        }
    }

    pub fn find_by_difficulty(&self, difficulty: Difficulty) -> RepoResult<Vec<Recipe>> {
        self.store.find_by_difficulty(difficulty)
    }

    /// Rescales `recipe` to `target_servings` and saves it.
    ///
    /// Nothing is saved when the computation is rejected.
    pub fn scale_portions(
        &mut self,
        recipe: &mut Recipe,
        target_servings: i32,
    ) -> Result<(), RecipeServiceError> {
        let from_servings = recipe.servings();
        if let Err(err) = computations::scale_portions(recipe, target_servings) {
            warn!(
                "event=recipe_scale module=service status=rejected from_servings={from_servings} to_servings={target_servings} error={err}"
            );
            return Err(err.into());
        }

        let recipe_id = self.store.save(recipe)?;
        info!(
            "event=recipe_scale module=service status=ok recipe_id={recipe_id} from_servings={from_servings} to_servings={target_servings} ingredients={}",
            recipe.ingredient_count()
        );
        Ok(())
    }

    /// Loads, rescales and saves one recipe. Returns `None` when absent.
    pub fn scale_portions_by_id(
        &mut self,
        id: RecipeId,
        target_servings: i32,
    ) -> Result<Option<Recipe>, RecipeServiceError> {
        let Some(mut recipe) = self.store.find_by_id(id)? else {
            return Ok(None);
        };
        self.scale_portions(&mut recipe, target_servings)?;
        Ok(Some(recipe))
    }

    /// Vegetarian classification of a stored recipe; `None` when absent.
    pub fn is_vegetarian(&self, id: RecipeId) -> RepoResult<Option<bool>> {
        Ok(self
            .store
            .find_by_id(id)?
            .map(|recipe| computations::is_vegetarian(&recipe)))
    }

    /// Total cooking minutes of a stored recipe; `None` when absent.
    pub fn total_cooking_time(&self, id: RecipeId) -> RepoResult<Option<u64>> {
        Ok(self
            .store
            .find_by_id(id)?
            .map(|recipe| computations::total_cooking_time(&recipe)))
    }
}

#[cfg(test)]
mod tests {
    use super::{RecipeService, RecipeServiceError};
    use crate::model::ingredient::Ingredient;
    use crate::model::recipe::Recipe;
    use crate::model::value::{Difficulty, IngredientCategory, Unit};
    use crate::repo::memory_repo::MemoryRecipeStore;
    use crate::service::computations::ComputationError;

    fn stored_service() -> (RecipeService<MemoryRecipeStore>, Recipe) {
        let mut service = RecipeService::new(MemoryRecipeStore::new());
        let mut recipe = Recipe::new("Test Recipe", "Test Description", Difficulty::Medium, 4);
        recipe.add_ingredient(
            Ingredient::new("Tomato", 400, Unit::G, IngredientCategory::Vegetarian).unwrap(),
        );
        service.save(&mut recipe).unwrap();
        (service, recipe)
    }

    #[test]
    fn scale_portions_saves_exactly_once() {
        let (mut service, mut recipe) = stored_service();
        let saves_before = service.store().save_count();

        service.scale_portions(&mut recipe, 8).unwrap();

        assert_eq!(service.store().save_count(), saves_before + 1);
        let id = recipe.id().unwrap();
        let stored = service.get_by_id(id).unwrap().unwrap();
        assert_eq!(stored.servings(), 8);
        assert_eq!(stored.ingredients()[0].quantity(), 800);
    }

    #[test]
    fn rejected_scaling_does_not_save() {
        let (mut service, mut recipe) = stored_service();
        let saves_before = service.store().save_count();

        let err = service.scale_portions(&mut recipe, 0).unwrap_err();

        assert!(matches!(
            err,
            RecipeServiceError::Computation(ComputationError::InvalidArgument(_))
        ));
        assert_eq!(service.store().save_count(), saves_before);
    }

    #[test]
    fn lookups_on_missing_ids_return_none() {
        let (mut service, _) = stored_service();
        assert!(service.get_by_id(999).unwrap().is_none());
        assert!(service.is_vegetarian(999).unwrap().is_none());
        assert!(service.total_cooking_time(999).unwrap().is_none());
        assert!(service.scale_portions_by_id(999, 2).unwrap().is_none());
        assert!(!service.delete(999).unwrap());
    }

    #[test]
    fn empty_search_returns_everything() {
        let (service, _) = stored_service();
        assert_eq!(service.search_by_name(None).unwrap().len(), 1);
        assert_eq!(service.search_by_name(Some("")).unwrap().len(), 1);
        assert_eq!(service.search_by_name(Some("TEST")).unwrap().len(), 1);
        assert!(service.search_by_name(Some("curry")).unwrap().is_empty());
    }
}
