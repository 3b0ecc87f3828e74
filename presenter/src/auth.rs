//! Login, signup and logout against the auth endpoints.

use crate::backend::Backend;
use crate::config::DashboardConfig;
use crate::error::{DashboardError, FetchError};
use common::model::user::CurrentUser;
use common::requests::{LoginRequest, SignupRequest};
use common::responses::AuthResponse;

const CONNECTION_ERROR: &str = "Connection error. Please try again.";

pub fn validate_signup(
    request: &SignupRequest,
    config: &DashboardConfig,
) -> Result<(), DashboardError> {
    if request.password.chars().count() < config.min_password_len {
        return Err(DashboardError::Validation(format!(
            "Password must be at least {} characters",
            config.min_password_len
        )));
    }
    Ok(())
}

fn into_user(
    outcome: Result<AuthResponse, FetchError>,
    default_message: &str,
) -> Result<CurrentUser, DashboardError> {
    match outcome {
        Ok(response) if response.success => Ok(response.user.unwrap_or_default()),
        Ok(response) => Err(DashboardError::Auth(
            response
                .message
                .unwrap_or_else(|| default_message.to_string()),
        )),
        Err(FetchError::Status { message, .. }) | Err(FetchError::Rejected(message)) => {
            Err(DashboardError::Auth(message))
        }
        Err(err) => {
            log::error!("auth request failed: {}", err);
            Err(DashboardError::Auth(CONNECTION_ERROR.to_string()))
        }
    }
}

pub async fn login(
    backend: &dyn Backend,
    request: &LoginRequest,
) -> Result<CurrentUser, DashboardError> {
    let user = into_user(backend.login(request).await, "Login failed")?;
    log::info!("signed in as {}", user.email);
    Ok(user)
}

pub async fn signup(
    backend: &dyn Backend,
    request: &SignupRequest,
    config: &DashboardConfig,
) -> Result<CurrentUser, DashboardError> {
    validate_signup(request, config)?;
    let user = into_user(backend.signup(request).await, "Signup failed")?;
    log::info!("created account {}", user.email);
    Ok(user)
}

/// Ends the server session. The caller clears local state whatever happens.
pub async fn logout(backend: &dyn Backend) {
    if let Err(err) = backend.logout().await {
        log::warn!("logout request failed: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBackend;

    fn signup_request(password: &str) -> SignupRequest {
        SignupRequest {
            username: "ana".into(),
            email: "ana@example.org".into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn short_password_never_reaches_server() {
        let backend = FakeBackend::new();
        let err = signup(&backend, &signup_request("12345"), &DashboardConfig::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Password must be at least 6 characters");
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn login_returns_user() {
        let backend = FakeBackend::new().with_auth(Ok(AuthResponse {
            success: true,
            user: Some(CurrentUser {
                id: Some(1),
                username: "ana".into(),
                email: "ana@example.org".into(),
                created_at: None,
            }),
            message: None,
        }));
        let request = LoginRequest {
            email: "ana@example.org".into(),
            password: "secret1".into(),
            remember: false,
        };

        let user = login(&backend, &request).await.unwrap();
        assert_eq!(user.username, "ana");
        assert_eq!(backend.calls(), vec!["login"]);
    }

    #[tokio::test]
    async fn rejected_credentials_show_server_message() {
        let backend = FakeBackend::new().with_auth(Err(FetchError::Status {
            status: 401,
            message: "Invalid email or password".into(),
        }));
        let request = LoginRequest {
            email: "ana@example.org".into(),
            password: "nope".into(),
            remember: true,
        };

        let err = login(&backend, &request).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[tokio::test]
    async fn network_failure_is_connection_error() {
        let backend = FakeBackend::new().with_auth(Err(FetchError::Network("offline".into())));
        let err = signup(&backend, &signup_request("long enough"), &DashboardConfig::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), CONNECTION_ERROR);
    }
}
