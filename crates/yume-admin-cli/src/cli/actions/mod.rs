pub mod auth;
pub mod dishes;
pub mod orders;
pub mod stats;

// Internal "interpreter" for `Action`.
mod run;

use super::globals::GlobalArgs;

#[derive(Debug)]
pub enum Action {
    Login(auth::LoginArgs),
    Logout,
    Signup(auth::SignupArgs),
    Orders(orders::OrdersAction),
    Dishes(dishes::DishesAction),
    Stats,
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self, globals: &GlobalArgs) -> anyhow::Result<()> {
        run::execute(self, globals).await
    }
}
