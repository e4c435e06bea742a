//! Closed vocabularies used by the recipe model.
//!
//! Labels serialize as upper-case snake identifiers (`GLUTEN_FREE`), the same
//! text the SQLite store persists.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Measurement label attached to an ingredient quantity.
///
/// Units are opaque: quantities are never converted between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    G,
    Kg,
    Ml,
    L,
    Pcs,
    Tsp,
    Tbsp,
    Cup,
    Pinch,
}

impl Unit {
    pub const ALL: [Unit; 9] = [
        Unit::G,
        Unit::Kg,
        Unit::Ml,
        Unit::L,
        Unit::Pcs,
        Unit::Tsp,
        Unit::Tbsp,
        Unit::Cup,
        Unit::Pinch,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Unit::G => "G",
            Unit::Kg => "KG",
            Unit::Ml => "ML",
            Unit::L => "L",
            Unit::Pcs => "PCS",
            Unit::Tsp => "TSP",
            Unit::Tbsp => "TBSP",
            Unit::Cup => "CUP",
            Unit::Pinch => "PINCH",
        }
    }

    /// Parses a label case-insensitively.
    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.label().eq_ignore_ascii_case(value.trim()))
    }
}

/// How demanding a recipe is to prepare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }

    /// Parses a label case-insensitively.
    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.label().eq_ignore_ascii_case(value.trim()))
    }
}

/// Dietary tag carried by every ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IngredientCategory {
    Vegetarian,
    Vegan,
    Meat,
    Poultry,
    Fish,
    Seafood,
    GlutenFree,
    LactoseFree,
    EggFree,
    Alcoholic,
    Other,
}

impl IngredientCategory {
    pub const ALL: [IngredientCategory; 11] = [
        IngredientCategory::Vegetarian,
        IngredientCategory::Vegan,
        IngredientCategory::Meat,
        IngredientCategory::Poultry,
        IngredientCategory::Fish,
        IngredientCategory::Seafood,
        IngredientCategory::GlutenFree,
        IngredientCategory::LactoseFree,
        IngredientCategory::EggFree,
        IngredientCategory::Alcoholic,
        IngredientCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            IngredientCategory::Vegetarian => "VEGETARIAN",
            IngredientCategory::Vegan => "VEGAN",
            IngredientCategory::Meat => "MEAT",
            IngredientCategory::Poultry => "POULTRY",
            IngredientCategory::Fish => "FISH",
            IngredientCategory::Seafood => "SEAFOOD",
            IngredientCategory::GlutenFree => "GLUTEN_FREE",
            IngredientCategory::LactoseFree => "LACTOSE_FREE",
            IngredientCategory::EggFree => "EGG_FREE",
            IngredientCategory::Alcoholic => "ALCOHOLIC",
            IngredientCategory::Other => "OTHER",
        }
    }

    /// Parses a label case-insensitively.
    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(value.trim()))
    }

    /// Returns whether this category comes from an animal's flesh.
    pub fn is_animal_flesh(self) -> bool {
        matches!(
            self,
            IngredientCategory::Meat
                | IngredientCategory::Poultry
                | IngredientCategory::Fish
                | IngredientCategory::Seafood
        )
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

impl Display for IngredientCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}
