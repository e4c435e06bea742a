//! Command-line front end for the recipe book.
//!
//! # Responsibility
//! - Translate subcommands into `RecipeService` calls.
//! - Map "not found" and rejected computations to a non-zero exit code.

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use recipe_core::db::{open_db, open_db_in_memory};
use recipe_core::{
    default_log_level, init_logging, is_vegetarian, seed_sample_recipes, total_cooking_time,
    Difficulty, Recipe, RecipeId, RecipeService, RecipeServiceError, SqliteRecipeStore,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "recipebook")]
#[command(author, version, about = "Manage recipes, rescale portions, check diets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// SQLite database file; an in-memory demo catalogue is used when omitted
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print core health and version
    Ping,
    /// Add the demo recipes to an empty database
    Seed,
    /// List all recipes
    List,
    /// Show one recipe with ingredients, steps and nutrition
    Show { id: RecipeId },
    /// Find recipes whose name contains TEXT (case-insensitive)
    Search { text: Option<String> },
    /// List recipes of one difficulty
    ByDifficulty {
        #[arg(value_parser = parse_difficulty)]
        difficulty: Difficulty,
    },
    /// Rescale a recipe to a new number of servings and save it
    Scale {
        id: RecipeId,
        #[arg(allow_negative_numbers = true)]
        servings: i32,
    },
    /// Delete a recipe and everything it owns
    Delete { id: RecipeId },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    let mut conn = match cli.db.as_ref() {
        Some(path) => open_db(path)
            .with_context(|| format!("failed to open database `{}`", path.display()))?,
        None => open_db_in_memory().context("failed to open in-memory database")?,
    };
    let mut store = SqliteRecipeStore::try_new(&mut conn)?;
    if auto_seeds(&cli) {
        seed_sample_recipes(&mut store)?;
    }
    let mut service = RecipeService::new(store);
    let format = cli.format;

    match cli.command {
        Commands::Ping => {
            println!("recipe_core ping={}", recipe_core::ping());
            println!("recipe_core version={}", recipe_core::core_version());
        }
        Commands::Seed => {
            let written = seed_sample_recipes(&mut service.into_store())?;
            info!("event=cli_seed module=cli status=ok recipes={written}");
            println!("seeded {written} recipe(s)");
        }
        Commands::List => print_list(format, &service.get_all()?)?,
        Commands::Show { id } => match service.get_by_id(id)? {
            Some(recipe) => print_recipe(format, &recipe)?,
            None => return Ok(not_found(id)),
        },
        Commands::Search { text } => {
            print_list(format, &service.search_by_name(text.as_deref())?)?;
        }
        Commands::ByDifficulty { difficulty } => {
            print_list(format, &service.find_by_difficulty(difficulty)?)?;
        }
        Commands::Scale { id, servings } => match service.scale_portions_by_id(id, servings) {
            Ok(Some(recipe)) => print_recipe(format, &recipe)?,
            Ok(None) => return Ok(not_found(id)),
            Err(RecipeServiceError::Computation(err)) => {
                eprintln!("cannot scale recipe {id}: {err}");
                return Ok(ExitCode::from(2));
            }
            Err(err) => return Err(err.into()),
        },
        Commands::Delete { id } => {
            if !service.delete(id)? {
                return Ok(not_found(id));
            }
            println!("deleted recipe {id}");
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// The in-memory catalogue is seeded up front, except when `seed` itself runs.
fn auto_seeds(cli: &Cli) -> bool {
    cli.db.is_none() && !matches!(cli.command, Commands::Seed)
}

fn parse_difficulty(value: &str) -> Result<Difficulty, String> {
    Difficulty::from_label(value)
        .ok_or_else(|| format!("unknown difficulty `{value}`; expected easy|medium|hard"))
}

fn not_found(id: RecipeId) -> ExitCode {
    eprintln!("recipe {id} not found");
    ExitCode::FAILURE
}

fn print_list(format: OutputFormat, recipes: &[Recipe]) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(recipes)?),
        OutputFormat::Text => {
            for recipe in recipes {
                println!(
                    "{:>4}  {:<32} {:<6} serves {:<3} {:>4} min  {}",
                    recipe.id().unwrap_or_default(),
                    recipe.name(),
                    recipe.difficulty(),
                    recipe.servings(),
                    total_cooking_time(recipe),
                    if is_vegetarian(recipe) { "vegetarian" } else { "" }
                );
            }
        }
    }
    Ok(())
}

fn print_recipe(format: OutputFormat, recipe: &Recipe) -> anyhow::Result<()> {
    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(recipe)?);
        return Ok(());
    }

    println!("{} ({}, serves {})", recipe.name(), recipe.difficulty(), recipe.servings());
    println!("{}", recipe.description());
    println!();
    println!("Ingredients:");
    for ingredient in recipe.ingredients() {
        println!(
            "  - {} {} {} [{}]",
            ingredient.quantity(),
            ingredient.unit(),
            ingredient.name(),
            ingredient.category()
        );
    }
    println!("Steps:");
    for step in recipe.steps() {
        println!(
            "  {}. {} ({} min)",
            step.step_number(),
            step.description(),
            step.duration_minutes()
        );
    }
    if let Some(info) = recipe.nutritional_info() {
        println!(
            "Nutrition per serving: {} kcal, protein {:.1} g, fat {:.1} g, carbs {:.1} g",
            info.calories, info.protein, info.fat, info.carbohydrates
        );
    }
    println!(
        "Total time: {} min, vegetarian: {}",
        total_cooking_time(recipe),
        if is_vegetarian(recipe) { "yes" } else { "no" }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{auto_seeds, Cli};
    use clap::Parser;

    #[test]
    fn seed_command_is_not_preceded_by_auto_seeding() {
        let seed = Cli::try_parse_from(["recipebook", "seed"]).unwrap();
        assert!(!auto_seeds(&seed));

        let list = Cli::try_parse_from(["recipebook", "list"]).unwrap();
        assert!(auto_seeds(&list));

        let on_disk = Cli::try_parse_from(["recipebook", "--db", "/tmp/recipes.db", "list"]).unwrap();
        assert!(!auto_seeds(&on_disk));
    }

    #[test]
    fn scale_accepts_negative_servings_for_validation_downstream() {
        let cli = Cli::try_parse_from(["recipebook", "scale", "1", "-2"]).unwrap();
        assert!(matches!(
            cli.command,
            super::Commands::Scale { id: 1, servings: -2 }
        ));
    }
}
