use anyhow::Result;

use super::{auth, dishes, orders, stats, Action};
use crate::cli::globals::GlobalArgs;

/// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    match action {
        Action::Login(args) => auth::login(args, globals).await,
        Action::Logout => auth::logout(globals).await,
        Action::Signup(args) => auth::signup(args, globals).await,
        Action::Orders(action) => orders::execute(action, globals).await,
        Action::Dishes(action) => dishes::execute(action, globals).await,
        Action::Stats => stats::execute(globals).await,
    }
}
