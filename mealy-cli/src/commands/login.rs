use clap::Args;

use mealy_core::{ApiClient, SessionStore};

use super::register::prompt;

/// Log in and store the session token
#[derive(Args)]
pub struct LoginCommand {
    /// Email address
    #[arg(long, short)]
    email: String,

    /// Password (prompted when omitted)
    #[arg(long)]
    password: Option<String>,
}

impl LoginCommand {
    pub fn run(
        &self,
        api: &ApiClient,
        session: &SessionStore,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let password = match &self.password {
            Some(p) => p.clone(),
            None => prompt("Enter password: ")?,
        };
        if password.is_empty() {
            return Err("Password cannot be empty.".into());
        }

        let rt = tokio::runtime::Runtime::new()?;
        let token = rt.block_on(api.login(self.email.trim(), &password))?;

        session.set_token(&token)?;
        println!("Logged in as {}.", self.email.trim());
        Ok(())
    }
}

/// Log out and clear stored tokens
#[derive(Args)]
pub struct LogoutCommand {}

impl LogoutCommand {
    pub fn run(&self, session: &SessionStore) -> Result<(), Box<dyn std::error::Error>> {
        session.clear()?;
        println!("Logged out.");
        Ok(())
    }
}
