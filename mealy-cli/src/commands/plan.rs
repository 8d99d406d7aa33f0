use clap::{Args, Subcommand, ValueEnum};

use mealy_core::{
    merge_slot, num_or_zero, validate_slot, ApiClient, Calendar, DataSource, MealEntry,
    NewMealSlot, NutritionFacts, OverlayStore, SessionStore, SlotNutrition,
};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Manage the weekly meal plan
#[derive(Args)]
pub struct PlanCommand {
    #[command(subcommand)]
    pub command: PlanSubcommand,
}

#[derive(Subcommand)]
pub enum PlanSubcommand {
    /// Show the meal plan as a calendar
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Plan a recipe for a day and time
    Add {
        /// Day (YYYY-MM-DD)
        #[arg(long, short)]
        day: String,

        /// Time (HH:MM)
        #[arg(long, short)]
        time: String,

        /// Recipe id
        #[arg(long, short)]
        recipe: String,

        /// Calories for this serving (comma decimals accepted)
        #[arg(long)]
        calories: Option<String>,

        /// Protein in grams
        #[arg(long)]
        protein: Option<String>,

        /// Carbs in grams
        #[arg(long)]
        carbs: Option<String>,

        /// Fat in grams
        #[arg(long)]
        fats: Option<String>,
    },

    /// Remove the meal planned for a day and time
    Remove {
        /// Day (YYYY-MM-DD)
        #[arg(long, short)]
        day: String,

        /// Time (HH:MM)
        #[arg(long, short)]
        time: String,
    },
}

impl PlanCommand {
    pub fn run(
        &self,
        api: &ApiClient,
        session: &SessionStore,
        overlay: &OverlayStore,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let token = session.require_token()?;
        let rt = tokio::runtime::Runtime::new()?;

        match &self.command {
            PlanSubcommand::Show { format } => {
                let meals = rt.block_on(api.meal_plan(&token))?;
                let calendar = build_calendar(&meals, overlay);

                if calendar.is_empty() {
                    println!("No meals planned");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(calendar.events())?);
                    }
                    OutputFormat::Text => print_calendar(&calendar),
                }
                Ok(())
            }

            PlanSubcommand::Add {
                day,
                time,
                recipe,
                calories,
                protein,
                carbs,
                fats,
            } => {
                validate_slot(day, time)?;
                if recipe.trim().is_empty() {
                    return Err("Recipe id cannot be empty.".into());
                }

                let detail = rt.block_on(api.recipe_detail(&token, recipe))?;

                let slot = NewMealSlot {
                    day: day.clone(),
                    time: time.clone(),
                    id: recipe.trim().to_string(),
                };
                let message = rt.block_on(api.add_meal(&token, &slot))?;
                println!("{}", message);

                let has_manual = calories.is_some()
                    || protein.is_some()
                    || carbs.is_some()
                    || fats.is_some();
                if has_manual {
                    let facts = NutritionFacts::new(
                        calories.as_deref().map(num_or_zero).unwrap_or(0.0),
                        protein.as_deref().map(num_or_zero).unwrap_or(0.0),
                        carbs.as_deref().map(num_or_zero).unwrap_or(0.0),
                        fats.as_deref().map(num_or_zero).unwrap_or(0.0),
                    );
                    overlay.put_slot_nutrition(
                        day,
                        time,
                        SlotNutrition::new(Some(slot.id.clone()), detail.name.clone(), facts),
                    );
                    println!("Saved nutrition for this slot.");
                }

                println!("Planned {} for {} at {}.", detail.name, day, time);
                Ok(())
            }

            PlanSubcommand::Remove { day, time } => {
                validate_slot(day, time)?;

                // Optimistic removal: the overlay entry goes first and is
                // not restored if the backend refuses.
                overlay.remove_slot_nutrition(day, time);

                match rt.block_on(api.remove_meal(&token, day, time)) {
                    Ok(message) => {
                        println!("{}", message);
                        Ok(())
                    }
                    Err(e) => {
                        eprintln!("Warning: removal failed: {}", e);

                        // Local state may now disagree with the backend.
                        // Throw the stale calendar away and rebuild it from
                        // the server's answer.
                        let meals = rt.block_on(api.meal_plan(&token))?;
                        let calendar = build_calendar(&meals, overlay);

                        if calendar.is_empty() {
                            println!("No meals planned");
                        } else {
                            println!("Current meal plan:");
                            print_calendar(&calendar);
                        }
                        Ok(())
                    }
                }
            }
        }
    }
}

fn build_calendar(meals: &[MealEntry], overlay: &OverlayStore) -> Calendar {
    let mut calendar = Calendar::new();
    for meal in meals {
        let record = overlay.nutrition_for_slot(&meal.day, &meal.time);
        calendar.upsert(merge_slot(meal, record.as_ref()));
    }
    calendar
}

fn print_calendar(calendar: &Calendar) {
    let mut current_day: Option<&str> = None;
    for event in calendar.events() {
        if current_day != Some(event.day.as_str()) {
            if current_day.is_some() {
                println!();
            }
            println!("{}", event.day);
            println!("{}", "-".repeat(10));
            current_day = Some(event.day.as_str());
        }
        let marker = match event.nutrition_source {
            Some(DataSource::LocalOverlay) => " (local)",
            _ => "",
        };
        println!("  {}{}", event.title, marker);
    }
    println!("\nTotal: {} meal(s)", calendar.len());
}
