//! Ingredient entity.
//!
//! # Invariants
//! - `quantity > 0` after construction and after every mutation.
//! - `name` is never blank.
//! - `owner` is set and cleared only by the owning `Recipe`.

use super::keys::{IngredientId, IngredientKey, RecipeKey};
use super::validation::ValidationError;
use super::value::{IngredientCategory, Unit};
use serde::Serialize;

/// A named, positive quantity of a category-tagged item.
#[derive(Debug, Serialize)]
pub struct Ingredient {
    #[serde(skip)]
    key: IngredientKey,
    id: Option<IngredientId>,
    name: String,
    quantity: i64,
    unit: Unit,
    category: IngredientCategory,
    #[serde(skip)]
    owner: Option<RecipeKey>,
}

impl Ingredient {
    /// Creates a detached, never-persisted ingredient.
    ///
    /// # Errors
    /// - `NonPositiveQuantity` when `quantity <= 0`.
    /// - `EmptyIngredientName` when `name` is blank.
    pub fn new(
        name: impl Into<String>,
        quantity: i64,
        unit: Unit,
        category: IngredientCategory,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyIngredientName);
        }
        ensure_positive(quantity)?;

        Ok(Self {
            key: IngredientKey::next(),
            id: None,
            name,
            quantity,
            unit,
            category,
            owner: None,
        })
    }

    /// Rebuilds a persisted ingredient; validation still applies.
    pub(crate) fn restore(
        id: IngredientId,
        name: String,
        quantity: i64,
        unit: Unit,
        category: IngredientCategory,
    ) -> Result<Self, ValidationError> {
        let mut ingredient = Self::new(name, quantity, unit, category)?;
        ingredient.id = Some(id);
        Ok(ingredient)
    }

    pub fn key(&self) -> IngredientKey {
        self.key
    }

    /// Store-assigned identity; `None` until first persisted.
    pub fn id(&self) -> Option<IngredientId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn category(&self) -> IngredientCategory {
        self.category
    }

    /// Key of the recipe currently holding this ingredient.
    pub fn owner(&self) -> Option<RecipeKey> {
        self.owner
    }

    /// Replaces the quantity, rejecting non-positive values.
    pub fn set_quantity(&mut self, quantity: i64) -> Result<(), ValidationError> {
        ensure_positive(quantity)?;
        self.quantity = quantity;
        Ok(())
    }

    pub(crate) fn attach(&mut self, owner: RecipeKey) {
        self.owner = Some(owner);
    }

    pub(crate) fn detach(&mut self) {
        self.owner = None;
    }

    pub(crate) fn assign_id(&mut self, id: IngredientId) {
        self.id = Some(id);
    }

    /// Detached copy that keeps the persisted identity.
    pub(crate) fn snapshot(&self) -> Self {
        Self {
            key: IngredientKey::next(),
            id: self.id,
            name: self.name.clone(),
            quantity: self.quantity,
            unit: self.unit,
            category: self.category,
            owner: None,
        }
    }
}

/// Copies are detached, never persisted and receive a fresh key.
impl Clone for Ingredient {
    fn clone(&self) -> Self {
        Self {
            id: None,
            ..self.snapshot()
        }
    }
}

fn ensure_positive(quantity: i64) -> Result<(), ValidationError> {
    if quantity <= 0 {
        return Err(ValidationError::NonPositiveQuantity(quantity));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Ingredient;
    use crate::model::validation::ValidationError;
    use crate::model::value::{IngredientCategory, Unit};

    #[test]
    fn rejects_zero_and_negative_quantity() {
        let zero = Ingredient::new("Salt", 0, Unit::G, IngredientCategory::Other).unwrap_err();
        assert_eq!(zero, ValidationError::NonPositiveQuantity(0));

        let negative =
            Ingredient::new("Salt", -3, Unit::G, IngredientCategory::Other).unwrap_err();
        assert_eq!(negative, ValidationError::NonPositiveQuantity(-3));
    }

    #[test]
    fn set_quantity_keeps_previous_value_on_rejection() {
        let mut ingredient =
            Ingredient::new("Rice", 250, Unit::G, IngredientCategory::Vegan).unwrap();
        assert!(ingredient.set_quantity(0).is_err());
        assert_eq!(ingredient.quantity(), 250);

        ingredient.set_quantity(300).unwrap();
        assert_eq!(ingredient.quantity(), 300);
    }

    #[test]
    fn clone_is_detached_with_fresh_key() {
        let mut original =
            Ingredient::new("Basil", 5, Unit::G, IngredientCategory::Vegan).unwrap();
        original.attach(crate::model::keys::RecipeKey::next());

        let copy = original.clone();
        assert_ne!(copy.key(), original.key());
        assert_eq!(copy.owner(), None);
        assert_eq!(copy.name(), "Basil");
    }

    #[test]
    fn clone_drops_persisted_identity_but_snapshot_keeps_it() {
        let original = Ingredient::restore(
            7,
            "Basil".to_string(),
            5,
            Unit::G,
            IngredientCategory::Vegan,
        )
        .unwrap();

        assert_eq!(original.clone().id(), None);
        let snapshot = original.snapshot();
        assert_eq!(snapshot.id(), Some(7));
        assert_ne!(snapshot.key(), original.key());
        assert_eq!(snapshot.owner(), None);
    }
}
