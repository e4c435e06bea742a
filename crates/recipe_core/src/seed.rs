//! Demo recipe catalogue used to populate an empty store.

use crate::model::ingredient::Ingredient;
use crate::model::nutrition::NutritionalInfo;
use crate::model::recipe::Recipe;
use crate::model::step::InstructionStep;
use crate::model::validation::ValidationError;
use crate::model::value::{Difficulty, IngredientCategory, Unit};
use crate::repo::recipe_repo::{RecipeStore, RepoResult};
use log::info;

type IngredientSpec = (&'static str, i64, Unit, IngredientCategory);
type StepSpec = (&'static str, u32);

struct RecipeSpec {
    name: &'static str,
    description: &'static str,
    difficulty: Difficulty,
    servings: i32,
    ingredients: &'static [IngredientSpec],
    steps: &'static [StepSpec],
    nutrition: (i32, f64, f64, f64),
}

const SAMPLES: &[RecipeSpec] = &[
    RecipeSpec {
        name: "Spaghetti Carbonara",
        description: "A delicious Italian pasta dish with eggs, cheese, and vegetables.",
        difficulty: Difficulty::Medium,
        servings: 4,
        ingredients: &[
            ("Spaghetti", 400, Unit::G, IngredientCategory::Vegetarian),
            ("Eggs", 4, Unit::Pcs, IngredientCategory::Vegetarian),
            ("Parmesan Cheese", 100, Unit::G, IngredientCategory::Vegetarian),
            ("Black Pepper", 5, Unit::G, IngredientCategory::Vegetarian),
            ("Salt", 10, Unit::G, IngredientCategory::Vegetarian),
        ],
        steps: &[
            ("Bring a large pot of salted water to boil.", 10),
            ("Cook spaghetti according to package directions.", 10),
            ("Beat eggs and mix with grated Parmesan cheese.", 5),
            ("Drain pasta and immediately mix with egg mixture.", 5),
            ("Season with black pepper and serve hot.", 2),
        ],
        nutrition: (520, 18.5, 15.2, 72.3),
    },
    RecipeSpec {
        name: "Chicken Tikka Masala",
        description: "A popular Indian curry dish with tender chicken in creamy tomato sauce.",
        difficulty: Difficulty::Hard,
        servings: 6,
        ingredients: &[
            ("Chicken Breast", 800, Unit::G, IngredientCategory::Poultry),
            ("Yogurt", 200, Unit::Ml, IngredientCategory::Vegetarian),
            ("Tomato Sauce", 400, Unit::Ml, IngredientCategory::Vegan),
            ("Heavy Cream", 200, Unit::Ml, IngredientCategory::Vegetarian),
            ("Garam Masala", 20, Unit::G, IngredientCategory::Vegan),
            ("Ginger", 30, Unit::G, IngredientCategory::Vegan),
            ("Garlic", 40, Unit::G, IngredientCategory::Vegan),
        ],
        steps: &[
            ("Marinate chicken in yogurt and spices for 2 hours.", 120),
            ("Grill or bake marinated chicken until cooked through.", 25),
            ("Prepare sauce by cooking tomatoes, cream, and spices.", 20),
            ("Add grilled chicken to the sauce and simmer.", 15),
            ("Garnish with cilantro and serve with rice or naan.", 5),
        ],
        nutrition: (380, 32.0, 22.5, 12.8),
    },
    RecipeSpec {
        name: "Greek Salad",
        description: "A refreshing Mediterranean salad with fresh vegetables and feta cheese.",
        difficulty: Difficulty::Easy,
        servings: 4,
        ingredients: &[
            ("Tomatoes", 400, Unit::G, IngredientCategory::Vegan),
            ("Cucumber", 300, Unit::G, IngredientCategory::Vegan),
            ("Red Onion", 100, Unit::G, IngredientCategory::Vegan),
            ("Feta Cheese", 200, Unit::G, IngredientCategory::Vegetarian),
            ("Olives", 150, Unit::G, IngredientCategory::Vegan),
            ("Olive Oil", 60, Unit::Ml, IngredientCategory::Vegan),
            ("Oregano", 5, Unit::G, IngredientCategory::Vegan),
        ],
        steps: &[
            ("Chop tomatoes, cucumber, and onion into bite-sized pieces.", 10),
            ("Combine vegetables in a large bowl.", 3),
            ("Add olives and crumbled feta cheese.", 5),
            ("Drizzle with olive oil and sprinkle oregano.", 2),
            ("Toss gently and serve immediately.", 2),
        ],
        nutrition: (220, 8.5, 16.8, 12.5),
    },
    RecipeSpec {
        name: "Grilled Salmon with Lemon",
        description: "Perfectly grilled salmon fillets with a fresh lemon butter sauce.",
        difficulty: Difficulty::Medium,
        servings: 2,
        ingredients: &[
            ("Salmon Fillets", 400, Unit::G, IngredientCategory::Fish),
            ("Lemon", 2, Unit::Pcs, IngredientCategory::Vegan),
            ("Butter", 50, Unit::G, IngredientCategory::Vegetarian),
            ("Garlic", 20, Unit::G, IngredientCategory::Vegan),
            ("Fresh Dill", 10, Unit::G, IngredientCategory::Vegan),
        ],
        steps: &[
            ("Preheat grill to medium-high heat.", 10),
            ("Season salmon with salt, pepper, and lemon juice.", 5),
            ("Grill salmon for 4-5 minutes per side.", 10),
            ("Melt butter with garlic and fresh dill.", 5),
            ("Drizzle butter sauce over grilled salmon and serve.", 2),
        ],
        nutrition: (320, 28.0, 22.0, 2.5),
    },
];

/// Builds the demo recipes, unsaved. Steps are numbered from 1.
pub fn sample_recipes() -> Result<Vec<Recipe>, ValidationError> {
    SAMPLES.iter().map(build_recipe).collect()
}

/// Saves the demo recipes into `store` when it holds no recipes.
///
/// Returns the number of recipes written (0 when the store was not empty).
pub fn seed_sample_recipes<S: RecipeStore>(store: &mut S) -> RepoResult<usize> {
    if !store.find_all()?.is_empty() {
        info!("event=seed module=seed status=skipped reason=store_not_empty");
        return Ok(0);
    }

    let mut recipes = sample_recipes()?;
    for recipe in &mut recipes {
        store.save(recipe)?;
    }
    info!("event=seed module=seed status=ok recipes={}", recipes.len());
    Ok(recipes.len())
}

fn build_recipe(spec: &RecipeSpec) -> Result<Recipe, ValidationError> {
    let mut recipe = Recipe::new(spec.name, spec.description, spec.difficulty, spec.servings);
    for &(name, quantity, unit, category) in spec.ingredients {
        recipe.add_ingredient(Ingredient::new(name, quantity, unit, category)?);
    }
    for (number, &(description, minutes)) in (1..).zip(spec.steps) {
        recipe.add_step(InstructionStep::new(number, description, minutes)?);
    }
    let (calories, protein, fat, carbohydrates) = spec.nutrition;
    recipe.set_nutritional_info(Some(NutritionalInfo::new(
        calories,
        protein,
        fat,
        carbohydrates,
    )));
    Ok(recipe)
}
