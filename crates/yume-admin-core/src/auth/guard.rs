//! Admin-only login policy and account signup.
//!
//! The request client authenticates anyone; this module decides who may use
//! the console. Only accounts whose role is `admin` are let through.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::api::users::USERS_PATH;
use crate::api::{ApiError, LoginResponse, RequestDescriptor, ResponseOutcome, SessionClient};

use super::Destination;

const ADMIN_ROLE: &str = "admin";
const MIN_PASSWORD_LENGTH: usize = 6;
const SIGNUP_FAILED_MESSAGE: &str = "Failed to create account";

#[derive(Error, Debug)]
pub enum AdminLoginError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    AccessDenied(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AdminLoginError {
    /// Text shown next to the login form.
    pub fn user_message(&self) -> String {
        match self {
            AdminLoginError::Validation(m) | AdminLoginError::AccessDenied(m) => m.clone(),
            AdminLoginError::Api(e) => e.user_message(),
        }
    }
}

fn is_admin(role: Option<&str>) -> bool {
    role.map(|r| r.trim().eq_ignore_ascii_case(ADMIN_ROLE))
        .unwrap_or(false)
}

/// Log in and admit the session only if it belongs to an administrator.
///
/// A non-admin session is logged out again straight away, which erases the
/// credentials that were just stored.
pub async fn login_admin(
    client: &SessionClient,
    email: &str,
    password: &str,
) -> Result<LoginResponse, AdminLoginError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AdminLoginError::Validation(
            "Please enter both email and password".to_string(),
        ));
    }

    let login = client.login(email, password).await?;

    if !is_admin(login.role.as_deref()) {
        warn!(role = ?login.role, "Rejected non-admin login");
        client.logout().await;
        return Err(AdminLoginError::AccessDenied(
            "Access denied. Admin privileges required.".to_string(),
        ));
    }

    client.navigate(Destination::Dashboard);
    Ok(login)
}

/// Registration form for a customer account.
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Serialize)]
struct SignupRequest<'a> {
    username: &'a str,
    last_name: &'a str,
    email: &'a str,
    password: &'a str,
    phone_number: &'a str,
    address: &'a str,
    role: &'a str,
}

impl NewAccount {
    pub fn validate(&self) -> Result<(), String> {
        if self.first_name.trim().is_empty()
            || self.last_name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.is_empty()
        {
            return Err("Please fill in all required fields".to_string());
        }
        if self.password != self.confirm_password {
            return Err("Passwords do not match".to_string());
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            ));
        }
        Ok(())
    }

    fn to_request(&self) -> SignupRequest<'_> {
        SignupRequest {
            username: self.first_name.trim(),
            last_name: self.last_name.trim(),
            email: self.email.trim(),
            password: &self.password,
            phone_number: self.phone.trim(),
            address: self.address.trim(),
            role: "user",
        }
    }
}

/// Create a customer account, then send the user to the login screen.
pub async fn signup(client: &SessionClient, account: &NewAccount) -> Result<(), ApiError> {
    account.validate().map_err(ApiError::Validation)?;

    let request = RequestDescriptor::post(USERS_PATH).json(&account.to_request())?;
    let outcome = client.send_public(&request).await;

    if let ResponseOutcome::Success { status, body } = &outcome {
        if !status.is_success() && body.message().is_none() {
            return Err(ApiError::Application {
                status: *status,
                message: SIGNUP_FAILED_MESSAGE.to_string(),
            });
        }
    }
    outcome.into_empty()?;

    info!(email = %account.email.trim(), "Account created");
    client.navigate(Destination::Login);
    Ok(())
}
