//! Per-serving nutrition facts. At most one record per recipe.

use super::keys::{NutritionId, RecipeKey};
use serde::Serialize;

/// Nutrition values for one serving. Values are taken as given.
#[derive(Debug, Serialize)]
pub struct NutritionalInfo {
    id: Option<NutritionId>,
    pub calories: i32,
    pub protein: f64,
    pub fat: f64,
    pub carbohydrates: f64,
    #[serde(skip)]
    owner: Option<RecipeKey>,
}

impl NutritionalInfo {
    pub fn new(calories: i32, protein: f64, fat: f64, carbohydrates: f64) -> Self {
        Self {
            id: None,
            calories,
            protein,
            fat,
            carbohydrates,
            owner: None,
        }
    }

    pub(crate) fn restore(
        id: NutritionId,
        calories: i32,
        protein: f64,
        fat: f64,
        carbohydrates: f64,
    ) -> Self {
        let mut info = Self::new(calories, protein, fat, carbohydrates);
        info.id = Some(id);
        info
    }

    pub fn id(&self) -> Option<NutritionId> {
        self.id
    }

    pub fn owner(&self) -> Option<RecipeKey> {
        self.owner
    }

    pub(crate) fn attach(&mut self, owner: RecipeKey) {
        self.owner = Some(owner);
    }

    pub(crate) fn detach(&mut self) {
        self.owner = None;
    }

    pub(crate) fn assign_id(&mut self, id: NutritionId) {
        self.id = Some(id);
    }

    /// Detached copy that keeps the persisted identity.
    pub(crate) fn snapshot(&self) -> Self {
        Self {
            owner: None,
            ..*self
        }
    }
}

/// Copies are detached and never persisted.
impl Clone for NutritionalInfo {
    fn clone(&self) -> Self {
        Self {
            id: None,
            owner: None,
            ..*self
        }
    }
}
