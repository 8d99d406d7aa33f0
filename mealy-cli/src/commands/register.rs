use clap::Args;
use std::io::{self, Write};

use mealy_core::api::RegisterRequest;
use mealy_core::{validate_registration, ApiClient};

/// Create a new account
#[derive(Args)]
pub struct RegisterCommand {
    /// Email address
    #[arg(long, short)]
    email: String,

    /// Display name for the account
    #[arg(long, short)]
    username: String,

    /// Password (prompted twice when omitted)
    #[arg(long)]
    password: Option<String>,
}

impl RegisterCommand {
    pub fn run(&self, api: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
        let (password, password_confirm) = match &self.password {
            Some(p) => (p.clone(), p.clone()),
            None => (
                prompt("Enter password: ")?,
                prompt("Confirm password: ")?,
            ),
        };

        validate_registration(&self.email, &self.username, &password, &password_confirm)?;

        let request = RegisterRequest {
            email: self.email.trim().to_string(),
            user_name: self.username.trim().to_string(),
            password,
        };

        let rt = tokio::runtime::Runtime::new()?;
        let message = rt.block_on(api.register(&request))?;

        println!("{}", message);
        println!("Log in with 'mealy login --email {}'.", request.email);
        Ok(())
    }
}

pub(crate) fn prompt(label: &str) -> Result<String, io::Error> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}
