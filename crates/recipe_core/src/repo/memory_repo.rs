//! In-memory recipe store.
//!
//! Keeps detached copies of saved aggregates; callers never share an
//! instance with the store. Useful for tests and for hosts without SQLite.

use crate::model::keys::RecipeId;
use crate::model::recipe::Recipe;
use crate::model::value::Difficulty;
use crate::repo::recipe_repo::{RecipeStore, RepoError, RepoResult};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// `RecipeStore` backed by a `BTreeMap`, ordered by identity.
#[derive(Debug, Default)]
pub struct MemoryRecipeStore {
    recipes: BTreeMap<RecipeId, Recipe>,
    last_recipe_id: RecipeId,
    last_child_id: i64,
    save_count: usize,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `save` calls since construction.
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    fn next_child_id(&mut self) -> i64 {
        self.last_child_id += 1;
        self.last_child_id
    }

    /// Children that arrive in `recipe` with an identity leave any other
    /// stored recipe, the way a row is re-parented in SQLite.
    fn release_moved_children(&mut self, recipe_id: RecipeId, recipe: &Recipe) {
        let ingredient_ids: BTreeSet<_> =
            recipe.ingredients().iter().filter_map(|i| i.id()).collect();
        let step_ids: BTreeSet<_> = recipe.steps().iter().filter_map(|s| s.id()).collect();
        let nutrition_id = recipe.nutritional_info().and_then(|info| info.id());

        for (_, stored) in self.recipes.iter_mut().filter(|(id, _)| **id != recipe_id) {
            stored.release_children(&ingredient_ids, &step_ids, nutrition_id);
        }
    }
}

impl RecipeStore for MemoryRecipeStore {
    fn find_all(&self) -> RepoResult<Vec<Recipe>> {
        Ok(self.recipes.values().map(Recipe::snapshot).collect())
    }

    fn find_by_id(&self, id: RecipeId) -> RepoResult<Option<Recipe>> {
        Ok(self.recipes.get(&id).map(Recipe::snapshot))
    }

    fn save(&mut self, recipe: &mut Recipe) -> RepoResult<RecipeId> {
        let recipe_id = match recipe.id() {
            Some(id) if !self.recipes.contains_key(&id) => return Err(RepoError::NotFound(id)),
            Some(id) => id,
            None => {
                self.last_recipe_id += 1;
                self.last_recipe_id
            }
        };
        recipe.assign_id(recipe_id);

        let new_ingredients: Vec<_> = recipe
            .ingredients()
            .iter()
            .filter(|ingredient| ingredient.id().is_none())
            .map(|ingredient| ingredient.key())
            .collect();
        for key in new_ingredients {
            let id = self.next_child_id();
            recipe.assign_ingredient_id(key, id);
        }

        let new_steps: Vec<_> = recipe
            .steps()
            .iter()
            .filter(|step| step.id().is_none())
            .map(|step| step.key())
            .collect();
        for key in new_steps {
            let id = self.next_child_id();
            recipe.assign_step_id(key, id);
        }

        if recipe.nutritional_info().is_some_and(|info| info.id().is_none()) {
            let id = self.next_child_id();
            recipe.assign_nutrition_id(id);
        }

        self.release_moved_children(recipe_id, recipe);
        self.recipes.insert(recipe_id, recipe.snapshot());
        self.save_count += 1;
        debug!("event=recipe_save module=memory_repo status=ok recipe_id={recipe_id}");
        Ok(recipe_id)
    }

    fn delete_by_id(&mut self, id: RecipeId) -> RepoResult<bool> {
        Ok(self.recipes.remove(&id).is_some())
    }

    fn find_by_name_containing(&self, text: &str) -> RepoResult<Vec<Recipe>> {
        let needle = text.to_lowercase();
        Ok(self
            .recipes
            .values()
            .filter(|recipe| recipe.name().to_lowercase().contains(&needle))
            .map(Recipe::snapshot)
            .collect())
    }

    fn find_by_difficulty(&self, difficulty: Difficulty) -> RepoResult<Vec<Recipe>> {
        Ok(self
            .recipes
            .values()
            .filter(|recipe| recipe.difficulty() == difficulty)
            .map(Recipe::snapshot)
            .collect())
    }
}
