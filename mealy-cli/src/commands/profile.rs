use clap::{Args, Subcommand, ValueEnum};
use std::io::{self, Write};

use mealy_core::api::UpdateUserRequest;
use mealy_core::{ApiClient, SessionStore};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Show or change account details
#[derive(Args)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand)]
pub enum ProfileSubcommand {
    /// Show the logged-in account
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Change account details
    Update {
        /// New display name
        #[arg(long)]
        username: Option<String>,

        /// New email address
        #[arg(long)]
        email: Option<String>,

        /// New password
        #[arg(long)]
        password: Option<String>,
    },

    /// Delete the account permanently
    Delete {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl ProfileCommand {
    pub fn run(
        &self,
        api: &ApiClient,
        session: &SessionStore,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let token = session.require_token()?;
        let rt = tokio::runtime::Runtime::new()?;

        match &self.command {
            ProfileSubcommand::Show { format } => {
                let profile = rt.block_on(api.fetch_profile(&token))?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&profile)?);
                    }
                    OutputFormat::Text => {
                        println!("Username: {}", profile.user_name);
                        println!("Email:    {}", profile.email);
                    }
                }
                Ok(())
            }

            ProfileSubcommand::Update {
                username,
                email,
                password,
            } => {
                let request = UpdateUserRequest {
                    user_name: username.clone(),
                    email: email.clone(),
                    password: password.clone(),
                };
                if request.is_empty() {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let response = rt.block_on(api.update_profile(&token, &request))?;
                println!("{}", response.message);

                // Changing the email re-keys the session; the backend hands
                // back a replacement token that must overwrite the old one.
                if let Some(new_token) = response.token {
                    session.set_token(&new_token)?;
                }
                Ok(())
            }

            ProfileSubcommand::Delete { force } => {
                if !force {
                    print!("Delete your account and all recipes? [y/N] ");
                    io::stdout().flush()?;

                    let mut input = String::new();
                    io::stdin().read_line(&mut input)?;

                    if !input.trim().eq_ignore_ascii_case("y") {
                        println!("Deletion cancelled.");
                        return Ok(());
                    }
                }

                let message = rt.block_on(api.delete_account(&token))?;
                session.clear()?;
                println!("{}", message);
                Ok(())
            }
        }
    }
}
