use recipe_core::{
    Difficulty, Ingredient, IngredientCategory, InstructionStep, NutritionalInfo, Recipe, Unit,
    ValidationError,
};

fn salad() -> Recipe {
    Recipe::new("Greek Salad", "Fresh and quick", Difficulty::Easy, 4)
}

#[test]
fn new_recipe_defaults() {
    let recipe = salad();

    assert_eq!(recipe.id(), None);
    assert_eq!(recipe.name(), "Greek Salad");
    assert_eq!(recipe.difficulty(), Difficulty::Easy);
    assert_eq!(recipe.servings(), 4);
    assert!(recipe.ingredients().is_empty());
    assert!(recipe.steps().is_empty());
    assert!(recipe.nutritional_info().is_none());
}

#[test]
fn recipe_accepts_non_positive_servings_at_construction() {
    let recipe = Recipe::new("Draft", "", Difficulty::Medium, 0);
    assert_eq!(recipe.servings(), 0);
}

#[test]
fn ingredient_constructor_validates_quantity_and_name() {
    assert_eq!(
        Ingredient::new("Feta", 0, Unit::G, IngredientCategory::Vegetarian).unwrap_err(),
        ValidationError::NonPositiveQuantity(0)
    );
    assert_eq!(
        Ingredient::new("Feta", -10, Unit::G, IngredientCategory::Vegetarian).unwrap_err(),
        ValidationError::NonPositiveQuantity(-10)
    );
    assert_eq!(
        Ingredient::new("  ", 10, Unit::G, IngredientCategory::Vegetarian).unwrap_err(),
        ValidationError::EmptyIngredientName
    );
    assert_eq!(
        InstructionStep::new(0, "never", 1).unwrap_err(),
        ValidationError::ZeroStepNumber
    );
}

#[test]
fn add_and_remove_maintain_back_references() {
    let mut recipe = salad();
    let ingredient = Ingredient::new("Olives", 150, Unit::G, IngredientCategory::Vegan).unwrap();
    assert_eq!(ingredient.owner(), None);

    let key = recipe.add_ingredient(ingredient);
    assert_eq!(recipe.ingredient(key).unwrap().owner(), Some(recipe.key()));

    let removed = recipe.remove_ingredient(key).expect("ingredient should be held");
    assert_eq!(removed.owner(), None);
    assert_eq!(recipe.ingredient_count(), 0);

    assert!(recipe.remove_ingredient(key).is_none());
}

#[test]
fn moving_an_ingredient_changes_its_owner() {
    let mut first = salad();
    let mut second = Recipe::new("Tomato Soup", "Warm", Difficulty::Easy, 2);
    let key = first.add_ingredient(
        Ingredient::new("Tomatoes", 400, Unit::G, IngredientCategory::Vegan).unwrap(),
    );

    let moved = first.remove_ingredient(key).unwrap();
    let new_key = second.add_ingredient(moved);

    assert_eq!(new_key, key);
    assert!(first.ingredient(key).is_none());
    assert_eq!(second.ingredient(key).unwrap().owner(), Some(second.key()));
}

#[test]
fn identical_ingredients_are_kept_as_distinct_entries() {
    let mut recipe = salad();
    for _ in 0..2 {
        recipe.add_ingredient(
            Ingredient::new("Oregano", 5, Unit::G, IngredientCategory::Vegan).unwrap(),
        );
    }
    assert_eq!(recipe.ingredient_count(), 2);
}

#[test]
fn removing_a_step_does_not_renumber_the_rest() {
    let mut recipe = salad();
    recipe.add_step(InstructionStep::new(1, "Chop", 10).unwrap());
    let middle = recipe.add_step(InstructionStep::new(2, "Combine", 3).unwrap());
    recipe.add_step(InstructionStep::new(3, "Serve", 2).unwrap());

    let removed = recipe.remove_step(middle).unwrap();
    assert_eq!(removed.owner(), None);

    let numbers: Vec<_> = recipe.steps().iter().map(|s| s.step_number()).collect();
    assert_eq!(numbers, vec![1, 3]);
}

#[test]
fn set_ingredient_quantity_goes_through_validation() {
    let mut recipe = salad();
    let key = recipe.add_ingredient(
        Ingredient::new("Cucumber", 300, Unit::G, IngredientCategory::Vegan).unwrap(),
    );

    assert_eq!(
        recipe.set_ingredient_quantity(key, 0).unwrap_err(),
        ValidationError::NonPositiveQuantity(0)
    );
    assert!(recipe.set_ingredient_quantity(key, 350).unwrap());
    assert_eq!(recipe.ingredient(key).unwrap().quantity(), 350);

    let detached = recipe.remove_ingredient(key).unwrap();
    assert!(!recipe.set_ingredient_quantity(detached.key(), 10).unwrap());
}

#[test]
fn nutritional_info_is_replaced_and_cleared() {
    let mut recipe = salad();
    assert!(recipe
        .set_nutritional_info(Some(NutritionalInfo::new(220, 8.5, 16.8, 12.5)))
        .is_none());
    assert_eq!(
        recipe.nutritional_info().unwrap().owner(),
        Some(recipe.key())
    );

    let previous = recipe
        .set_nutritional_info(Some(NutritionalInfo::new(180, 6.0, 12.0, 10.0)))
        .expect("previous info should be returned");
    assert_eq!(previous.calories, 220);
    assert_eq!(previous.owner(), None);
    assert_eq!(recipe.nutritional_info().unwrap().calories, 180);

    let cleared = recipe.set_nutritional_info(None).unwrap();
    assert_eq!(cleared.calories, 180);
    assert!(recipe.nutritional_info().is_none());
}

#[test]
fn recipe_serializes_ordered_children_and_labels() {
    let mut recipe = salad();
    recipe.add_ingredient(
        Ingredient::new("Feta Cheese", 200, Unit::G, IngredientCategory::Vegetarian).unwrap(),
    );
    recipe.add_ingredient(
        Ingredient::new("Olive Oil", 60, Unit::Ml, IngredientCategory::GlutenFree).unwrap(),
    );
    recipe.add_step(InstructionStep::new(2, "Toss", 2).unwrap());
    recipe.add_step(InstructionStep::new(1, "Chop", 10).unwrap());
    recipe.set_nutritional_info(Some(NutritionalInfo::new(220, 8.5, 16.8, 12.5)));

    let json = serde_json::to_value(&recipe).unwrap();
    assert_eq!(json["id"], serde_json::Value::Null);
    assert_eq!(json["difficulty"], "EASY");
    assert_eq!(json["ingredients"][0]["name"], "Feta Cheese");
    assert_eq!(json["ingredients"][1]["unit"], "ML");
    assert_eq!(json["ingredients"][1]["category"], "GLUTEN_FREE");
    assert_eq!(json["steps"][0]["description"], "Chop");
    assert_eq!(json["steps"][1]["duration_minutes"], 2);
    assert_eq!(json["nutritional_info"]["calories"], 220);
    assert!(json["ingredients"][0].get("owner").is_none());
}

#[test]
fn value_labels_round_trip_through_serde() {
    let category: IngredientCategory = serde_json::from_str("\"LACTOSE_FREE\"").unwrap();
    assert_eq!(category, IngredientCategory::LactoseFree);
    assert_eq!(serde_json::to_string(&Unit::Tbsp).unwrap(), "\"TBSP\"");
}
