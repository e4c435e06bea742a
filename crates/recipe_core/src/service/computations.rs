//! Derived computations over a recipe aggregate.
//!
//! # Responsibility
//! - Portion rescaling, vegetarian classification, total duration.
//!
//! # Invariants
//! - Scaling never leaves an ingredient at zero; the floor is one unit.
//! - Classification and duration are pure and total.
//! - Scaling takes `&mut Recipe`: the caller holds exclusive access for the
//!   whole call.

use crate::model::recipe::Recipe;
use crate::model::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error raised by a computation that cannot run on its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComputationError {
    /// A caller-supplied value is outside the computation's contract.
    InvalidArgument(&'static str),
    /// The aggregate's own state cannot support the computation.
    InvalidState(&'static str),
    Validation(ValidationError),
}

impl Display for ComputationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::InvalidState(message) => write!(f, "invalid state: {message}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ComputationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ComputationError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Rescales every ingredient quantity from `recipe.servings()` to
/// `target_servings`, then sets the new serving count.
///
/// Each quantity becomes `max(1, round(old * target / servings))`, rounding
/// halves away from zero. Persisting the result is the caller's job.
///
/// # Errors
/// - `InvalidArgument` when `target_servings <= 0`.
/// - `InvalidState` when `recipe.servings() <= 0`.
pub fn scale_portions(recipe: &mut Recipe, target_servings: i32) -> Result<(), ComputationError> {
    if target_servings <= 0 {
        return Err(ComputationError::InvalidArgument(
            "target_servings must be > 0",
        ));
    }
    if recipe.servings() <= 0 {
        return Err(ComputationError::InvalidState("recipe.servings must be > 0"));
    }

    let factor = f64::from(target_servings) / f64::from(recipe.servings());
    for ingredient in recipe.ingredients_mut() {
        let scaled = scaled_quantity(ingredient.quantity(), factor);
        ingredient.set_quantity(scaled)?;
    }
    recipe.set_servings(target_servings);
    Ok(())
}

/// Returns `false` when any ingredient is meat, poultry, fish or seafood.
///
/// A recipe without ingredients is vegetarian.
pub fn is_vegetarian(recipe: &Recipe) -> bool {
    !recipe
        .ingredients()
        .iter()
        .any(|ingredient| ingredient.category().is_animal_flesh())
}

/// Sum of all step durations in minutes; `0` when there are no steps.
pub fn total_cooking_time(recipe: &Recipe) -> u64 {
    recipe
        .steps()
        .iter()
        .map(|step| u64::from(step.duration_minutes()))
        .sum()
}

fn scaled_quantity(quantity: i64, factor: f64) -> i64 {
    // `f64::round` breaks ties away from zero; the `as` cast saturates.
    let rounded = (quantity as f64 * factor).round() as i64;
    rounded.max(1)
}

#[cfg(test)]
mod tests {
    use super::{is_vegetarian, scale_portions, scaled_quantity, total_cooking_time, ComputationError};
    use crate::model::ingredient::Ingredient;
    use crate::model::recipe::Recipe;
    use crate::model::step::InstructionStep;
    use crate::model::value::{Difficulty, IngredientCategory, Unit};

    fn tomato_cheese() -> Recipe {
        let mut recipe = Recipe::new("Test Recipe", "Test Description", Difficulty::Medium, 4);
        recipe.add_ingredient(
            Ingredient::new("Tomato", 400, Unit::G, IngredientCategory::Vegetarian).unwrap(),
        );
        recipe.add_ingredient(
            Ingredient::new("Cheese", 200, Unit::G, IngredientCategory::Vegetarian).unwrap(),
        );
        recipe
    }

    fn quantities(recipe: &Recipe) -> Vec<i64> {
        recipe.ingredients().iter().map(|i| i.quantity()).collect()
    }

    #[test]
    fn doubling_servings_doubles_quantities() {
        let mut recipe = tomato_cheese();
        scale_portions(&mut recipe, 8).unwrap();
        assert_eq!(recipe.servings(), 8);
        assert_eq!(quantities(&recipe), vec![800, 400]);
    }

    #[test]
    fn halving_servings_halves_quantities() {
        let mut recipe = tomato_cheese();
        scale_portions(&mut recipe, 2).unwrap();
        assert_eq!(recipe.servings(), 2);
        assert_eq!(quantities(&recipe), vec![200, 100]);
    }

    #[test]
    fn rejects_non_positive_target() {
        let mut recipe = tomato_cheese();
        for target in [0, -5] {
            let err = scale_portions(&mut recipe, target).unwrap_err();
            assert_eq!(
                err,
                ComputationError::InvalidArgument("target_servings must be > 0")
            );
        }
        assert_eq!(recipe.servings(), 4);
        assert_eq!(quantities(&recipe), vec![400, 200]);
    }

    #[test]
    fn rejects_zero_base_servings() {
        let mut recipe = Recipe::new("Invalid", "Test", Difficulty::Easy, 0);
        recipe.add_ingredient(
            Ingredient::new("Salt", 10, Unit::G, IngredientCategory::Vegetarian).unwrap(),
        );
        let err = scale_portions(&mut recipe, 4).unwrap_err();
        assert_eq!(err, ComputationError::InvalidState("recipe.servings must be > 0"));
    }

    #[test]
    fn rounding_breaks_ties_upward_and_floors_at_one() {
        assert_eq!(scaled_quantity(5, 0.5), 3);
        assert_eq!(scaled_quantity(3, 0.5), 2);
        assert_eq!(scaled_quantity(1, 0.1), 1);
        assert_eq!(scaled_quantity(7, 1.0 / 3.0), 2);
    }

    #[test]
    fn scaling_rounds_halves_up_across_serving_changes() {
        // (servings, target, quantity)
        let cases = [
            (2, 1, 5),
            (4, 6, 3),
            (4, 3, 10),
            (4, 1, 1),
            (3, 2, 7),
            (8, 1, 4),
            (6, 4, 9),
            (2, 3, 3),
            (5, 5, 17),
        ];
        for (servings, target, quantity) in cases {
            let mut recipe = Recipe::new("Case", "", Difficulty::Easy, servings);
            recipe.add_ingredient(
                Ingredient::new("Flour", quantity, Unit::G, IngredientCategory::Vegan).unwrap(),
            );
            scale_portions(&mut recipe, target).unwrap();

            let (s, t) = (i64::from(servings), i64::from(target));
            let expected = ((2 * quantity * t + s) / (2 * s)).max(1);
            assert_eq!(
                quantities(&recipe),
                vec![expected],
                "servings={servings} target={target} quantity={quantity}"
            );
            assert_eq!(recipe.servings(), target);
        }
    }

    #[test]
    fn tiny_quantities_never_reach_zero() {
        let mut recipe = Recipe::new("Big batch", "", Difficulty::Easy, 100);
        recipe.add_ingredient(
            Ingredient::new("Saffron", 1, Unit::Pinch, IngredientCategory::Vegan).unwrap(),
        );
        scale_portions(&mut recipe, 1).unwrap();
        assert_eq!(quantities(&recipe), vec![1]);
    }

    #[test]
    fn empty_recipe_is_vegetarian_and_takes_no_time() {
        let recipe = Recipe::new("Nothing", "", Difficulty::Easy, 1);
        assert!(is_vegetarian(&recipe));
        assert_eq!(total_cooking_time(&recipe), 0);
    }

    #[test]
    fn each_flesh_category_flips_classification() {
        for category in [
            IngredientCategory::Meat,
            IngredientCategory::Poultry,
            IngredientCategory::Fish,
            IngredientCategory::Seafood,
        ] {
            let mut recipe = tomato_cheese();
            assert!(is_vegetarian(&recipe));
            recipe.add_ingredient(Ingredient::new("Flesh", 100, Unit::G, category).unwrap());
            assert!(!is_vegetarian(&recipe), "{category} should not be vegetarian");
        }
    }

    #[test]
    fn duration_ignores_step_order_and_numbering() {
        let mut forward = Recipe::new("A", "", Difficulty::Easy, 1);
        let mut shuffled = Recipe::new("B", "", Difficulty::Easy, 1);
        for (number, minutes) in [(1, 10), (2, 20), (3, 15)] {
            forward.add_step(InstructionStep::new(number, "step", minutes).unwrap());
        }
        for (number, minutes) in [(7, 15), (7, 10), (2, 20)] {
            shuffled.add_step(InstructionStep::new(number, "step", minutes).unwrap());
        }

        assert_eq!(total_cooking_time(&forward), 45);
        assert_eq!(total_cooking_time(&shuffled), 45);
    }
}
