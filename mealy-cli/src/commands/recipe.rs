use clap::{Args, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;

use mealy_core::{
    num_or_zero, prepare_image, ApiClient, DataSource, Ingredient, NewRecipe, OverlayStore,
    RecipeOverlay, RecipeView, SessionStore,
};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Manage your recipe collection
#[derive(Args)]
pub struct RecipeCommand {
    #[command(subcommand)]
    pub command: RecipeSubcommand,
}

#[derive(Subcommand)]
pub enum RecipeSubcommand {
    /// Create a new recipe
    Create {
        /// Recipe name
        #[arg(long, short)]
        name: String,

        /// Preparation notes
        #[arg(long, short, default_value = "")]
        description: String,

        /// Ingredient as NAME:AMOUNT:UNIT (can be repeated)
        #[arg(long = "ingredient", short = 'i', value_name = "INGREDIENT")]
        ingredients: Vec<String>,

        /// Attach an image file (stored locally, max 6 MB)
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// List your recipes
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show one recipe with its locally stored fields
    Show {
        /// Recipe id
        id: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete a recipe
    Delete {
        /// Recipe id
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Publish a recipe to the shared collection
    Share {
        /// Recipe id
        id: String,
    },

    /// Remove a recipe from the shared collection
    Unshare {
        /// Recipe id
        id: String,
    },
}

impl RecipeCommand {
    pub fn run(
        &self,
        api: &ApiClient,
        session: &SessionStore,
        overlay: &OverlayStore,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let token = session.require_token()?;
        let rt = tokio::runtime::Runtime::new()?;

        match &self.command {
            RecipeSubcommand::Create {
                name,
                description,
                ingredients,
                image,
            } => {
                let name = name.trim();
                if name.is_empty() {
                    return Err("Recipe name cannot be empty.".into());
                }

                let mut parsed = Vec::new();
                for raw in ingredients {
                    parsed.push(parse_ingredient(raw)?);
                }

                let recipe =
                    NewRecipe::new(name, description.trim()).with_ingredients(parsed);
                let message = rt.block_on(api.create_recipe(&token, &recipe))?;
                println!("{}", message);

                // The image never reaches the backend. It is encoded and
                // kept in the local overlay; failures must not undo the
                // creation that already happened.
                if let Some(path) = image {
                    match prepare_image(path) {
                        Ok(data_url) => {
                            overlay.store_image(name, &data_url);
                            println!("Image attached.");
                        }
                        Err(e) => {
                            eprintln!("Warning: could not attach image: {}", e);
                        }
                    }
                }
                Ok(())
            }

            RecipeSubcommand::List { format } => {
                let recipes = rt.block_on(api.list_recipes(&token))?;

                if recipes.is_empty() {
                    println!("No recipes found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&recipes)?);
                    }
                    OutputFormat::Text => {
                        for recipe in &recipes {
                            println!("{}", recipe);
                        }
                        println!("\nTotal: {} recipe(s)", recipes.len());
                    }
                }
                Ok(())
            }

            RecipeSubcommand::Show { id, format } => {
                let detail = rt.block_on(api.recipe_detail(&token, id))?;

                let fields = RecipeOverlay {
                    image: overlay.image_for(&detail.name, Some(id)),
                    nutrition: overlay
                        .nutrition_for_recipe(&detail.name, Some(id))
                        .map(|record| record.facts),
                };
                let view = RecipeView::merge(detail, fields);

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&view)?);
                    }
                    OutputFormat::Text => print_recipe(&view),
                }
                Ok(())
            }

            RecipeSubcommand::Delete { id, force } => {
                let detail = rt.block_on(api.recipe_detail(&token, id))?;

                if !force {
                    print!("Delete recipe '{}'? [y/N] ", detail.name);
                    io::stdout().flush()?;

                    let mut input = String::new();
                    io::stdin().read_line(&mut input)?;

                    if !input.trim().eq_ignore_ascii_case("y") {
                        println!("Deletion cancelled.");
                        return Ok(());
                    }
                }

                let message = rt.block_on(api.delete_recipe(&token, id))?;
                overlay.remove_image(&detail.name, Some(id));
                println!("{}", message);
                Ok(())
            }

            RecipeSubcommand::Share { id } => {
                let response = rt.block_on(api.share_recipe(&token, id))?;
                println!("{}", response.message);
                Ok(())
            }

            RecipeSubcommand::Unshare { id } => {
                let response = rt.block_on(api.unshare_recipe(&token, id))?;
                println!("{}", response.message);
                Ok(())
            }
        }
    }
}

pub(super) fn print_recipe(view: &RecipeView) {
    println!("{}", view.name);
    println!("{}", "=".repeat(view.name.chars().count()));
    if let Some(owner) = &view.owner {
        println!("By: {}", owner);
    }
    if !view.description.is_empty() {
        println!("\n{}", view.description);
    }
    if !view.ingredients.is_empty() {
        println!("\nIngredients:");
        for ingredient in &view.ingredients {
            println!("  - {}", ingredient);
        }
    }
    if let Some(nutrition) = &view.nutrition {
        let marker = match view.nutrition_source {
            Some(DataSource::LocalOverlay) => " (local)",
            _ => "",
        };
        println!("\nNutrition{}: {}", marker, nutrition);
    }
    if view.image.is_some() {
        println!("\nImage: attached");
    }
}

/// Parses an ingredient argument of the form `NAME:AMOUNT:UNIT`.
///
/// Amount and unit are optional. Amounts accept comma decimals; an
/// unparsable or zero amount leaves the ingredient uncounted.
fn parse_ingredient(raw: &str) -> Result<Ingredient, String> {
    let mut parts = raw.splitn(3, ':');
    let name = parts.next().unwrap_or("").trim();
    if name.is_empty() {
        return Err(format!("Ingredient name missing in '{}'", raw));
    }
    let amount = parts.next().map(num_or_zero).filter(|a| *a > 0.0);
    let unit = parts.next().unwrap_or("").trim();
    Ok(Ingredient::new(name, amount, unit))
}
