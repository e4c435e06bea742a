//! Recipe aggregate root.
//!
//! # Responsibility
//! - Own ingredients, instruction steps and the optional nutrition record.
//! - Route every attach/detach through one place so back-references stay
//!   consistent.
//! - Provide deterministic ordered views over the owned children.
//!
//! # Invariants
//! - Every held child reports `owner() == Some(self.key())`.
//! - A detached child reports `owner() == None`.
//! - `servings` is not validated here; scaling rejects a non-positive base.
//! - Step numbers may repeat or skip; ordering stays stable regardless.

use super::ingredient::Ingredient;
use super::keys::{IngredientId, IngredientKey, NutritionId, RecipeId, RecipeKey, StepId, StepKey};
use super::nutrition::NutritionalInfo;
use super::step::InstructionStep;
use super::validation::ValidationError;
use super::value::Difficulty;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

/// Aggregate root of the recipe model.
#[derive(Debug)]
pub struct Recipe {
    key: RecipeKey,
    id: Option<RecipeId>,
    name: String,
    description: String,
    difficulty: Difficulty,
    servings: i32,
    ingredients: BTreeMap<IngredientKey, Ingredient>,
    steps: BTreeMap<StepKey, InstructionStep>,
    nutritional_info: Option<NutritionalInfo>,
}

impl Recipe {
    /// Creates an empty, never-persisted recipe.
    ///
    /// `servings` may be zero or negative here; a recipe can exist before its
    /// serving count is settled.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        difficulty: Difficulty,
        servings: i32,
    ) -> Self {
        Self {
            key: RecipeKey::next(),
            id: None,
            name: name.into(),
            description: description.into(),
            difficulty,
            servings,
            ingredients: BTreeMap::new(),
            steps: BTreeMap::new(),
            nutritional_info: None,
        }
    }

    pub(crate) fn restore(
        id: RecipeId,
        name: String,
        description: String,
        difficulty: Difficulty,
        servings: i32,
    ) -> Self {
        let mut recipe = Self::new(name, description, difficulty, servings);
        recipe.id = Some(id);
        recipe
    }

    /// In-process handle that children use as their back-reference.
    pub fn key(&self) -> RecipeKey {
        self.key
    }

    /// Store-assigned identity; `None` until first saved.
    pub fn id(&self) -> Option<RecipeId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn servings(&self) -> i32 {
        self.servings
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn set_servings(&mut self, servings: i32) {
        self.servings = servings;
    }

    /// Attaches an ingredient and returns its handle.
    ///
    /// Structurally identical ingredients are kept as distinct entries.
    pub fn add_ingredient(&mut self, mut ingredient: Ingredient) -> IngredientKey {
        let key = ingredient.key();
        ingredient.attach(self.key);
        self.ingredients.insert(key, ingredient);
        key
    }

    /// Detaches an ingredient, returning it with its back-reference cleared.
    ///
    /// Returns `None` when the handle is not held by this recipe.
    pub fn remove_ingredient(&mut self, key: IngredientKey) -> Option<Ingredient> {
        let mut ingredient = self.ingredients.remove(&key)?;
        ingredient.detach();
        Some(ingredient)
    }

    /// Updates the quantity of a held ingredient.
    ///
    /// Returns `Ok(false)` when the handle is not held by this recipe.
    pub fn set_ingredient_quantity(
        &mut self,
        key: IngredientKey,
        quantity: i64,
    ) -> Result<bool, ValidationError> {
        match self.ingredients.get_mut(&key) {
            Some(ingredient) => {
                ingredient.set_quantity(quantity)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Attaches a step and returns its handle. Step numbers are not adjusted.
    pub fn add_step(&mut self, mut step: InstructionStep) -> StepKey {
        let key = step.key();
        step.attach(self.key);
        self.steps.insert(key, step);
        key
    }

    /// Detaches a step. Remaining steps keep their numbers.
    pub fn remove_step(&mut self, key: StepKey) -> Option<InstructionStep> {
        let mut step = self.steps.remove(&key)?;
        step.detach();
        Some(step)
    }

    /// Replaces the nutrition record; `None` clears it.
    ///
    /// Returns the previous record, detached.
    pub fn set_nutritional_info(
        &mut self,
        info: Option<NutritionalInfo>,
    ) -> Option<NutritionalInfo> {
        let incoming = info.map(|mut info| {
            info.attach(self.key);
            info
        });
        let mut previous = std::mem::replace(&mut self.nutritional_info, incoming)?;
        previous.detach();
        Some(previous)
    }

    pub fn nutritional_info(&self) -> Option<&NutritionalInfo> {
        self.nutritional_info.as_ref()
    }

    pub fn ingredient(&self, key: IngredientKey) -> Option<&Ingredient> {
        self.ingredients.get(&key)
    }

    pub fn step(&self, key: StepKey) -> Option<&InstructionStep> {
        self.steps.get(&key)
    }

    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Ingredients ordered by persisted id, then by creation order.
    ///
    /// Persisted ingredients come before never-persisted ones.
    pub fn ingredients(&self) -> Vec<&Ingredient> {
        let mut ordered: Vec<&Ingredient> = self.ingredients.values().collect();
        ordered.sort_by_key(|ingredient| {
            (ingredient.id().is_none(), ingredient.id(), ingredient.key())
        });
        ordered
    }

    /// Steps ordered by step number; equal numbers keep creation order.
    pub fn steps(&self) -> Vec<&InstructionStep> {
        // BTreeMap yields creation order, the stable sort preserves it per number.
        let mut ordered: Vec<&InstructionStep> = self.steps.values().collect();
        ordered.sort_by_key(|step| step.step_number());
        ordered
    }

    pub(crate) fn ingredients_mut(&mut self) -> impl Iterator<Item = &mut Ingredient> {
        self.ingredients.values_mut()
    }

    pub(crate) fn assign_id(&mut self, id: RecipeId) {
        self.id = Some(id);
    }

    pub(crate) fn assign_ingredient_id(&mut self, key: IngredientKey, id: IngredientId) {
        if let Some(ingredient) = self.ingredients.get_mut(&key) {
            ingredient.assign_id(id);
        }
    }

    pub(crate) fn assign_step_id(&mut self, key: StepKey, id: StepId) {
        if let Some(step) = self.steps.get_mut(&key) {
            step.assign_id(id);
        }
    }

    pub(crate) fn assign_nutrition_id(&mut self, id: NutritionId) {
        if let Some(info) = self.nutritional_info.as_mut() {
            info.assign_id(id);
        }
    }

    /// Detached copy of the whole aggregate that keeps every persisted
    /// identity. Stores use it to hand out aggregates they still track.
    pub(crate) fn snapshot(&self) -> Self {
        let mut copy = self.empty_copy();
        copy.id = self.id;
        for ingredient in self.ingredients.values() {
            copy.add_ingredient(ingredient.snapshot());
        }
        for step in self.steps.values() {
            copy.add_step(step.snapshot());
        }
        copy.set_nutritional_info(self.nutritional_info.as_ref().map(NutritionalInfo::snapshot));
        copy
    }

    /// Drops children whose persisted identity now belongs to another recipe.
    pub(crate) fn release_children(
        &mut self,
        ingredient_ids: &BTreeSet<IngredientId>,
        step_ids: &BTreeSet<StepId>,
        nutrition_id: Option<NutritionId>,
    ) {
        self.ingredients
            .retain(|_, ingredient| !ingredient.id().is_some_and(|id| ingredient_ids.contains(&id)));
        self.steps
            .retain(|_, step| !step.id().is_some_and(|id| step_ids.contains(&id)));
        let held = self.nutritional_info.as_ref().and_then(NutritionalInfo::id);
        if held.is_some() && held == nutrition_id {
            self.nutritional_info = None;
        }
    }

    fn empty_copy(&self) -> Self {
        Self::new(
            self.name.clone(),
            self.description.clone(),
            self.difficulty,
            self.servings,
        )
    }
}

/// Copies get a fresh recipe key and fresh child keys and are never
/// persisted; creation order of the children is preserved.
impl Clone for Recipe {
    fn clone(&self) -> Self {
        let mut copy = self.empty_copy();
        for ingredient in self.ingredients.values() {
            copy.add_ingredient(ingredient.clone());
        }
        for step in self.steps.values() {
            copy.add_step(step.clone());
        }
        copy.set_nutritional_info(self.nutritional_info.clone());
        copy
    }
}

impl Serialize for Recipe {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Recipe", 8)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("difficulty", &self.difficulty)?;
        state.serialize_field("servings", &self.servings)?;
        state.serialize_field("ingredients", &self.ingredients())?;
        state.serialize_field("steps", &self.steps())?;
        state.serialize_field("nutritional_info", &self.nutritional_info)?;
        state.end()
    }
}
