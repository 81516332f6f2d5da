//! yume-admin - terminal admin console for the Yume food-ordering service.
//!
//! Signs administrators in, shows the live order queue and manages the menu
//! against the Yume REST API.

mod cli;

use tracing::info;
use yume_admin_core::api::ApiError;

#[tokio::main]
async fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let invocation = match cli::start() {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    info!("yume-admin starting");

    let result = invocation.action.execute(&invocation.globals).await;

    if let Err(e) = result {
        if let Some(message) = failure_message(&e) {
            eprintln!("{}", message);
        }
        drop(invocation.log_guard);
        std::process::exit(1);
    }
}

/// Text printed for a failed command. An expired session has already been
/// reported by the navigator when it was torn down.
fn failure_message(error: &anyhow::Error) -> Option<String> {
    let expired = error
        .downcast_ref::<ApiError>()
        .is_some_and(ApiError::is_auth_expired);
    (!expired).then(|| format!("Error: {:#}", error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_session_is_not_reported_twice() {
        let expired = anyhow::Error::from(ApiError::AuthExpired);
        assert_eq!(failure_message(&expired), None);

        let other = anyhow::Error::from(ApiError::Validation("Price must be positive".to_string()));
        assert_eq!(
            failure_message(&other).as_deref(),
            Some("Error: Price must be positive")
        );
    }
}
