use crate::models::{OneOrMany, User};

use super::{ApiError, RequestDescriptor, SessionClient};

pub(crate) const USERS_PATH: &str = "users";

impl SessionClient {
    pub async fn fetch_users(&self) -> Result<Vec<User>, ApiError> {
        let users: OneOrMany<User> = self
            .send(&RequestDescriptor::get(USERS_PATH))
            .await
            .into_json()?;
        Ok(users.into_vec())
    }
}
