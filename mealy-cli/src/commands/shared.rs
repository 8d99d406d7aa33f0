use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;

use mealy_core::api::NewRating;
use mealy_core::{
    validate_stars, ApiClient, DataSource, OverlayStore, RatingEntry, RatingSummary,
    RecipeOverlay, RecipeView, SessionStore, SharedRecipeSummary,
};

use super::recipe::print_recipe;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Browse and rate shared recipes
#[derive(Args)]
pub struct SharedCommand {
    #[command(subcommand)]
    pub command: SharedSubcommand,
}

#[derive(Subcommand)]
pub enum SharedSubcommand {
    /// List recipes shared by the community
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a shared recipe with its ratings
    Show {
        /// Shared recipe id
        id: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Rate a shared recipe
    Rate {
        /// Shared recipe id
        id: String,

        /// Stars, 1 to 5
        #[arg(long, short)]
        stars: Option<u8>,

        /// Optional comment
        #[arg(long, short, default_value = "")]
        comment: String,
    },
}

#[derive(Serialize)]
struct SharedListRow<'a> {
    #[serde(flatten)]
    recipe: &'a SharedRecipeSummary,
    rating: RatingSummary,
    has_image: bool,
}

impl SharedCommand {
    pub fn run(
        &self,
        api: &ApiClient,
        session: &SessionStore,
        overlay: &OverlayStore,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let rt = tokio::runtime::Runtime::new()?;

        match &self.command {
            // Browsing is public; no token is needed here. Ratings shown in
            // the listing come from the local map to keep it to one request.
            SharedSubcommand::List { format } => {
                let recipes = rt.block_on(api.shared_recipes())?;

                if recipes.is_empty() {
                    println!("No shared recipes found");
                    return Ok(());
                }

                let rows: Vec<SharedListRow> = recipes
                    .iter()
                    .map(|recipe| {
                        let key = recipe.id.clone().unwrap_or_else(|| recipe.name.clone());
                        let ratings = overlay.ratings_for(&key);
                        SharedListRow {
                            recipe,
                            rating: RatingSummary::from_entries(
                                &ratings,
                                DataSource::LocalOverlay,
                            ),
                            has_image: overlay
                                .image_for(&recipe.name, recipe.id.as_deref())
                                .is_some(),
                        }
                    })
                    .collect();

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&rows)?);
                    }
                    OutputFormat::Text => {
                        for row in &rows {
                            let image_marker = if row.has_image { " [image]" } else { "" };
                            println!("{}  {}{}", row.recipe, row.rating, image_marker);
                        }
                        println!("\nTotal: {} shared recipe(s)", rows.len());
                    }
                }
                Ok(())
            }

            SharedSubcommand::Show { id, format } => {
                let detail = rt.block_on(api.shared_recipe_detail(id))?;

                let overlay_id = detail.id.clone().unwrap_or_else(|| id.clone());
                let fields = RecipeOverlay {
                    image: overlay.image_for(&detail.name, Some(&overlay_id)),
                    nutrition: overlay
                        .nutrition_for_recipe(&detail.name, Some(&overlay_id))
                        .map(|record| record.facts),
                };
                let view = RecipeView::merge(detail, fields);

                // Backend ratings when the endpoint answers; the legacy
                // local map when it does not exist yet.
                let (entries, source) = match rt.block_on(api.shared_ratings(id)) {
                    Ok(entries) => (entries, DataSource::Backend),
                    Err(e) if e.is_not_found() => {
                        (overlay.ratings_for(&overlay_id), DataSource::LocalOverlay)
                    }
                    Err(e) => return Err(e.into()),
                };
                let summary = RatingSummary::from_entries(&entries, source);

                match format {
                    OutputFormat::Json => {
                        #[derive(Serialize)]
                        struct SharedShowView {
                            #[serde(flatten)]
                            recipe: RecipeView,
                            rating_summary: RatingSummary,
                            ratings: Vec<RatingEntry>,
                        }
                        let payload = SharedShowView {
                            recipe: view,
                            rating_summary: summary,
                            ratings: entries,
                        };
                        println!("{}", serde_json::to_string_pretty(&payload)?);
                    }
                    OutputFormat::Text => {
                        print_recipe(&view);
                        println!("\nRating: {}", summary);
                        if summary.source == DataSource::LocalOverlay && !entries.is_empty() {
                            println!("(ratings stored on this device only)");
                        }
                        for entry in &entries {
                            println!("  {}", entry);
                        }
                    }
                }
                Ok(())
            }

            SharedSubcommand::Rate { id, stars, comment } => {
                let stars = validate_stars(*stars)?;
                let token = session.require_token()?;

                let rating = NewRating {
                    stars,
                    comment: comment.trim().to_string(),
                };

                match rt.block_on(api.post_rating(&token, id, &rating)) {
                    Ok(message) => {
                        println!("{}", message);
                        Ok(())
                    }
                    Err(e) if e.is_not_found() => {
                        // Endpoint not there yet: keep the rating in the
                        // local map so it still shows up when browsing.
                        overlay.add_rating(id, RatingEntry::new(stars, rating.comment.clone()));
                        let summary = RatingSummary::from_entries(
                            &overlay.ratings_for(id),
                            DataSource::LocalOverlay,
                        );
                        println!("Rating saved on this device.");
                        println!("{}", summary);
                        Ok(())
                    }
                    Err(e) => Err(e.into()),
                }
            }
        }
    }
}
