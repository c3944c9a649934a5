//! Operator login.

use axum::{extract::State, Json};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::extract::ValidJson;
use crate::AppState;
use pdv_core::validation::validate_login;
use pdv_core::{LoginRequest, UserProfile};

/// `POST /api/login`
///
/// Unknown usernames and wrong passwords get the same 401 and the same work:
/// a missing user is checked against the decoy hash, so response time does
/// not reveal which usernames exist.
pub async fn login(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<LoginRequest>,
) -> ApiResult<Json<UserProfile>> {
    validate_login(&request)
        .map_err(|_| ApiError::validation("Username and password are required"))?;

    let user = state.store.users().find_by_username(&request.username).await?;

    let hash = user
        .as_ref()
        .map_or(state.decoy_hash.as_ref(), |user| user.password_hash.as_str());
    let verified = state.credentials.verify(&request.password, hash);

    let user = match user {
        Some(user) if verified => user,
        _ => {
            debug!(username = %request.username, "Login rejected");
            return Err(ApiError::invalid_credentials());
        }
    };

    info!(id = user.id, username = %user.username, "Operator logged in");
    Ok(Json(user.profile()))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use pdv_core::{CoreResult, Credentials, NewUser};
    use pdv_store::Store;

    /// Plaintext stand-in that counts how many hashes it was asked to check.
    #[derive(Default)]
    struct CountingCredentials {
        verifications: AtomicUsize,
    }

    impl Credentials for CountingCredentials {
        fn hash(&self, password: &str) -> CoreResult<String> {
            Ok(format!("plain${}", password))
        }

        fn verify(&self, password: &str, hash: &str) -> bool {
            self.verifications.fetch_add(1, Ordering::SeqCst);
            hash == format!("plain${}", password)
        }
    }

    async fn state(credentials: Arc<CountingCredentials>) -> AppState {
        let store = Store::new();
        store
            .users()
            .create(NewUser {
                username: "admin".into(),
                password_hash: credentials.hash("password").unwrap(),
                name: "Administrador".into(),
                is_admin: true,
            })
            .await
            .unwrap();
        AppState::new(store, credentials).unwrap()
    }

    fn request(username: &str, password: &str) -> ValidJson<LoginRequest> {
        ValidJson(LoginRequest {
            username: username.into(),
            password: password.into(),
        })
    }

    #[tokio::test]
    async fn test_unknown_user_costs_one_verification() {
        let credentials = Arc::new(CountingCredentials::default());
        let state = state(credentials.clone()).await;

        let unknown = login(State(state.clone()), request("ghost", "password")).await;
        assert!(matches!(unknown, Err(ApiError::Unauthorized(_))));
        assert_eq!(credentials.verifications.load(Ordering::SeqCst), 1);

        let wrong = login(State(state.clone()), request("admin", "123456")).await;
        assert!(matches!(wrong, Err(ApiError::Unauthorized(_))));
        assert_eq!(credentials.verifications.load(Ordering::SeqCst), 2);

        let ok = login(State(state), request("admin", "password")).await.unwrap();
        assert_eq!(ok.0.username, "admin");
    }

    #[tokio::test]
    async fn test_decoy_password_does_not_log_in() {
        let credentials = Arc::new(CountingCredentials::default());
        let state = state(credentials).await;

        let result = login(State(state), request("ghost", "pdv-decoy-password")).await;
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }
}
