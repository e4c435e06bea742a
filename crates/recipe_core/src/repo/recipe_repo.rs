//! Recipe store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the whole recipe aggregate (recipe row plus child rows).
//! - Rebuild aggregates from storage with children in stable order.
//!
//! # Invariants
//! - A save touches all aggregate tables inside one immediate transaction.
//! - Children dropped from the aggregate are deleted on save.
//! - Identities are written back to the aggregate only after commit.

use crate::db::DbError;
use crate::model::ingredient::Ingredient;
use crate::model::keys::{IngredientId, IngredientKey, NutritionId, RecipeId, StepId, StepKey};
use crate::model::nutrition::NutritionalInfo;
use crate::model::recipe::Recipe;
use crate::model::step::InstructionStep;
use crate::model::validation::ValidationError;
use crate::model::value::{Difficulty, IngredientCategory, Unit};
use log::{error, info};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, TransactionBehavior};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const RECIPE_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    difficulty,
    servings
FROM recipes";

const REQUIRED_TABLES: [&str; 4] = [
    "recipes",
    "ingredients",
    "instruction_steps",
    "nutritional_info",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for recipe persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    /// An update targeted a recipe identity that is not stored.
    NotFound(RecipeId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "recipe not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted recipe data: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable persistence of recipe aggregates keyed by recipe identity.
pub trait RecipeStore {
    /// Returns every stored recipe ordered by identity.
    fn find_all(&self) -> RepoResult<Vec<Recipe>>;
    /// Returns one recipe, or `None` when the identity is unknown.
    fn find_by_id(&self, id: RecipeId) -> RepoResult<Option<Recipe>>;
    /// Inserts or updates the aggregate and writes assigned identities back.
    ///
    /// Saving an already-saved, unchanged recipe is a no-op apart from the
    /// update timestamp.
    fn save(&mut self, recipe: &mut Recipe) -> RepoResult<RecipeId>;
    /// Deletes a recipe with all its children. Returns whether a row existed.
    fn delete_by_id(&mut self, id: RecipeId) -> RepoResult<bool>;
    /// Case-insensitive containment match on the recipe name.
    fn find_by_name_containing(&self, text: &str) -> RepoResult<Vec<Recipe>>;
    fn find_by_difficulty(&self, difficulty: Difficulty) -> RepoResult<Vec<Recipe>>;
}

/// SQLite-backed recipe store.
pub struct SqliteRecipeStore<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteRecipeStore<'conn> {
    /// Constructs a store from a migrated connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when the schema has not been applied.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        for table in REQUIRED_TABLES {
            if !table_exists(conn, table)? {
                return Err(RepoError::MissingRequiredTable(table));
            }
        }
        Ok(Self { conn })
    }
}

/// Identities created by one save, applied to the aggregate after commit.
#[derive(Debug, Default)]
struct AssignedIds {
    recipe: RecipeId,
    ingredients: Vec<(IngredientKey, IngredientId)>,
    steps: Vec<(StepKey, StepId)>,
    nutrition: Option<NutritionId>,
}

impl RecipeStore for SqliteRecipeStore<'_> {
    fn find_all(&self) -> RepoResult<Vec<Recipe>> {
        let mut recipes = load_recipe_shells(self.conn, "", Vec::new())?;
        for recipe in &mut recipes {
            load_children(self.conn, recipe)?;
        }
        Ok(recipes)
    }

    fn find_by_id(&self, id: RecipeId) -> RepoResult<Option<Recipe>> {
        let mut recipes =
            load_recipe_shells(self.conn, " WHERE id = ?", vec![Value::Integer(id)])?;
        let Some(mut recipe) = recipes.pop() else {
            return Ok(None);
        };
        load_children(self.conn, &mut recipe)?;
        Ok(Some(recipe))
    }

    fn save(&mut self, recipe: &mut Recipe) -> RepoResult<RecipeId> {
        let started_at = Instant::now();
        let assigned = match save_in_transaction(self.conn, recipe) {
            Ok(assigned) => assigned,
            Err(err) => {
                error!(
                    "event=recipe_save module=repo status=error recipe_id={} duration_ms={} error={}",
                    recipe.id().map_or_else(|| "new".to_string(), |id| id.to_string()),
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err);
            }
        };

        recipe.assign_id(assigned.recipe);
        for (key, id) in assigned.ingredients {
            recipe.assign_ingredient_id(key, id);
        }
        for (key, id) in assigned.steps {
            recipe.assign_step_id(key, id);
        }
        if let Some(id) = assigned.nutrition {
            recipe.assign_nutrition_id(id);
        }

        info!(
            "event=recipe_save module=repo status=ok recipe_id={} ingredients={} steps={} duration_ms={}",
            assigned.recipe,
            recipe.ingredient_count(),
            recipe.step_count(),
            started_at.elapsed().as_millis()
        );
        Ok(assigned.recipe)
    }

    fn delete_by_id(&mut self, id: RecipeId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM recipes WHERE id = ?1;", [id])?;
        info!("event=recipe_delete module=repo status=ok recipe_id={id} deleted={}", changed > 0);
        Ok(changed > 0)
    }

    fn find_by_name_containing(&self, text: &str) -> RepoResult<Vec<Recipe>> {
        // SQLite LIKE folds ASCII only; match in Rust to fold all of Unicode.
        let needle = text.to_lowercase();
        let mut recipes = load_recipe_shells(self.conn, "", Vec::new())?;
        recipes.retain(|recipe| recipe.name().to_lowercase().contains(&needle));
        for recipe in &mut recipes {
            load_children(self.conn, recipe)?;
        }
        Ok(recipes)
    }

    fn find_by_difficulty(&self, difficulty: Difficulty) -> RepoResult<Vec<Recipe>> {
        let mut recipes = load_recipe_shells(
            self.conn,
            " WHERE difficulty = ?",
            vec![Value::Text(difficulty.label().to_string())],
        )?;
        for recipe in &mut recipes {
            load_children(self.conn, recipe)?;
        }
        Ok(recipes)
    }
}

fn save_in_transaction(conn: &mut Connection, recipe: &Recipe) -> RepoResult<AssignedIds> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let recipe_id = upsert_recipe_row(&tx, recipe)?;
    let assigned = AssignedIds {
        recipe: recipe_id,
        ingredients: sync_ingredients(&tx, recipe_id, recipe)?,
        steps: sync_steps(&tx, recipe_id, recipe)?,
        nutrition: sync_nutrition(&tx, recipe_id, recipe)?,
    };
    tx.commit()?;
    Ok(assigned)
}

fn upsert_recipe_row(conn: &Connection, recipe: &Recipe) -> RepoResult<RecipeId> {
    if let Some(id) = recipe.id() {
        let changed = conn.execute(
            "UPDATE recipes
             SET
                name = ?1,
                description = ?2,
                difficulty = ?3,
                servings = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?5;",
            params![
                recipe.name(),
                recipe.description(),
                recipe.difficulty().label(),
                recipe.servings(),
                id,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        return Ok(id);
    }

    conn.execute(
        "INSERT INTO recipes (name, description, difficulty, servings)
         VALUES (?1, ?2, ?3, ?4);",
        params![
            recipe.name(),
            recipe.description(),
            recipe.difficulty().label(),
            recipe.servings(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn sync_ingredients(
    conn: &Connection,
    recipe_id: RecipeId,
    recipe: &Recipe,
) -> RepoResult<Vec<(IngredientKey, IngredientId)>> {
    let ingredients = recipe.ingredients();
    let kept: BTreeSet<i64> = ingredients.iter().filter_map(|i| i.id()).collect();
    delete_stale_children(conn, "ingredients", recipe_id, &kept)?;

    let mut assigned = Vec::new();
    for ingredient in ingredients {
        let updated = match ingredient.id() {
            // Also re-parents an ingredient moved here from another recipe.
            Some(id) => {
                conn.execute(
                    "UPDATE ingredients
                     SET recipe_id = ?1, name = ?2, quantity = ?3, unit = ?4, category = ?5
                     WHERE id = ?6;",
                    params![
                        recipe_id,
                        ingredient.name(),
                        ingredient.quantity(),
                        ingredient.unit().label(),
                        ingredient.category().label(),
                        id,
                    ],
                )? > 0
            }
            None => false,
        };
        if updated {
            continue;
        }

        conn.execute(
            "INSERT INTO ingredients (recipe_id, name, quantity, unit, category)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                recipe_id,
                ingredient.name(),
                ingredient.quantity(),
                ingredient.unit().label(),
                ingredient.category().label(),
            ],
        )?;
        assigned.push((ingredient.key(), conn.last_insert_rowid()));
    }
    Ok(assigned)
}

fn sync_steps(
    conn: &Connection,
    recipe_id: RecipeId,
    recipe: &Recipe,
) -> RepoResult<Vec<(StepKey, StepId)>> {
    let steps = recipe.steps();
    let kept: BTreeSet<i64> = steps.iter().filter_map(|s| s.id()).collect();
    delete_stale_children(conn, "instruction_steps", recipe_id, &kept)?;

    let mut assigned = Vec::new();
    for step in steps {
        let updated = match step.id() {
            Some(id) => {
                conn.execute(
                    "UPDATE instruction_steps
                     SET recipe_id = ?1, step_number = ?2, description = ?3, duration_minutes = ?4
                     WHERE id = ?5;",
                    params![
                        recipe_id,
                        step.step_number(),
                        step.description(),
                        step.duration_minutes(),
                        id,
                    ],
                )? > 0
            }
            None => false,
        };
        if updated {
            continue;
        }

        conn.execute(
            "INSERT INTO instruction_steps (recipe_id, step_number, description, duration_minutes)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                recipe_id,
                step.step_number(),
                step.description(),
                step.duration_minutes(),
            ],
        )?;
        assigned.push((step.key(), conn.last_insert_rowid()));
    }
    Ok(assigned)
}

fn sync_nutrition(
    conn: &Connection,
    recipe_id: RecipeId,
    recipe: &Recipe,
) -> RepoResult<Option<NutritionId>> {
    let Some(info) = recipe.nutritional_info() else {
        conn.execute(
            "DELETE FROM nutritional_info WHERE recipe_id = ?1;",
            [recipe_id],
        )?;
        return Ok(None);
    };

    // Free the unique recipe_id slot before inserting or re-parenting.
    conn.execute(
        "DELETE FROM nutritional_info WHERE recipe_id = ?1 AND id IS NOT ?2;",
        params![recipe_id, info.id()],
    )?;

    if let Some(id) = info.id() {
        let changed = conn.execute(
            "UPDATE nutritional_info
             SET recipe_id = ?1, calories = ?2, protein = ?3, fat = ?4, carbohydrates = ?5
             WHERE id = ?6;",
            params![
                recipe_id,
                info.calories,
                info.protein,
                info.fat,
                info.carbohydrates,
                id,
            ],
        )?;
        if changed > 0 {
            return Ok(None);
        }
    }

    conn.execute(
        "INSERT INTO nutritional_info (recipe_id, calories, protein, fat, carbohydrates)
         VALUES (?1, ?2, ?3, ?4, ?5);",
        params![
            recipe_id,
            info.calories,
            info.protein,
            info.fat,
            info.carbohydrates,
        ],
    )?;
    Ok(Some(conn.last_insert_rowid()))
}

fn delete_stale_children(
    conn: &Connection,
    table: &'static str,
    recipe_id: RecipeId,
    kept: &BTreeSet<i64>,
) -> RepoResult<()> {
    let mut stmt = conn.prepare(&format!("SELECT id FROM {table} WHERE recipe_id = ?1;"))?;
    let existing = stmt
        .query_map([recipe_id], |row| row.get::<_, i64>(0))?
        .collect::<Result<BTreeSet<i64>, _>>()?;

    for stale in existing.difference(kept) {
        conn.execute(&format!("DELETE FROM {table} WHERE id = ?1;"), [stale])?;
    }
    Ok(())
}

fn load_recipe_shells(
    conn: &Connection,
    filter_sql: &str,
    bind_values: Vec<Value>,
) -> RepoResult<Vec<Recipe>> {
    let mut stmt = conn.prepare(&format!("{RECIPE_SELECT_SQL}{filter_sql} ORDER BY id ASC;"))?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut recipes = Vec::new();
    while let Some(row) = rows.next()? {
        recipes.push(parse_recipe_row(row)?);
    }
    Ok(recipes)
}

fn load_children(conn: &Connection, recipe: &mut Recipe) -> RepoResult<()> {
    let Some(recipe_id) = recipe.id() else {
        return Ok(());
    };

    let mut stmt = conn.prepare(
        "SELECT id, name, quantity, unit, category
         FROM ingredients
         WHERE recipe_id = ?1
         ORDER BY id ASC;",
    )?;
    let mut rows = stmt.query([recipe_id])?;
    while let Some(row) = rows.next()? {
        recipe.add_ingredient(parse_ingredient_row(row)?);
    }

    let mut stmt = conn.prepare(
        "SELECT id, step_number, description, duration_minutes
         FROM instruction_steps
         WHERE recipe_id = ?1
         ORDER BY id ASC;",
    )?;
    let mut rows = stmt.query([recipe_id])?;
    while let Some(row) = rows.next()? {
        recipe.add_step(parse_step_row(row)?);
    }

    let mut stmt = conn.prepare(
        "SELECT id, calories, protein, fat, carbohydrates
         FROM nutritional_info
         WHERE recipe_id = ?1;",
    )?;
    let mut rows = stmt.query([recipe_id])?;
    if let Some(row) = rows.next()? {
        recipe.set_nutritional_info(Some(NutritionalInfo::restore(
            row.get("id")?,
            row.get("calories")?,
            row.get("protein")?,
            row.get("fat")?,
            row.get("carbohydrates")?,
        )));
    }

    Ok(())
}

fn parse_recipe_row(row: &Row<'_>) -> RepoResult<Recipe> {
    let difficulty_text: String = row.get("difficulty")?;
    let difficulty = Difficulty::from_label(&difficulty_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid difficulty `{difficulty_text}` in recipes.difficulty"
        ))
    })?;

    Ok(Recipe::restore(
        row.get("id")?,
        row.get("name")?,
        row.get("description")?,
        difficulty,
        row.get("servings")?,
    ))
}

fn parse_ingredient_row(row: &Row<'_>) -> RepoResult<Ingredient> {
    let id: IngredientId = row.get("id")?;
    let unit_text: String = row.get("unit")?;
    let unit = Unit::from_label(&unit_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid unit `{unit_text}` in ingredients.unit"))
    })?;

    let category_text: String = row.get("category")?;
    let category = IngredientCategory::from_label(&category_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in ingredients.category"
        ))
    })?;

    Ingredient::restore(
        id,
        row.get("name")?,
        row.get("quantity")?,
        unit,
        category,
    )
    .map_err(|err| RepoError::InvalidData(format!("ingredient {id}: {err}")))
}

fn parse_step_row(row: &Row<'_>) -> RepoResult<InstructionStep> {
    let id: StepId = row.get("id")?;
    let step_number: i64 = row.get("step_number")?;
    let step_number = u32::try_from(step_number).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid step_number `{step_number}` in instruction_steps.step_number"
        ))
    })?;

    InstructionStep::restore(
        id,
        step_number,
        row.get("description")?,
        row.get("duration_minutes")?,
    )
    .map_err(|err| RepoError::InvalidData(format!("instruction step {id}: {err}")))
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
