mod config_cmd;
mod login;
mod plan;
mod profile;
mod recipe;
mod register;
mod shared;

pub use config_cmd::ConfigCommand;
pub use login::{LoginCommand, LogoutCommand};
pub use plan::PlanCommand;
pub use profile::ProfileCommand;
pub use recipe::RecipeCommand;
pub use register::RegisterCommand;
pub use shared::SharedCommand;
