use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

use crate::core::auth::{Authenticator, SharedSecretAuthenticator};
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Configuration,
    pub store: RepositoryStore,
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    pub fn new(branch: &str, store: RepositoryStore) -> AppState {
        let config = Configuration::new(branch);
        let authenticator = Arc::new(SharedSecretAuthenticator::new(config.api_key.as_str()));
        AppState {
            config,
            store,
            authenticator,
        }
    }
}

// Wire shape of a single field-level failure, e.g.
// {"propertyName": "Isbn", "errorMessage": "Value was not a valid ISBN-13"}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    pub property_name: String,
    pub error_message: String,
}

impl ValidationFailure {
    pub fn new(property_name: &str, error_message: &str) -> Self {
        Self {
            property_name: property_name.to_string(),
            error_message: error_message.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ServerError {
    Unauthenticated,
    BadRequest(String),
    Validation(Vec<ValidationFailure>),
    NotFound,
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::Unauthenticated => {
                StatusCode::UNAUTHORIZED.into_response()
            }
            ServerError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            ServerError::Validation(failures) => {
                (StatusCode::BAD_REQUEST, Json(failures)).into_response()
            }
            ServerError::NotFound => {
                StatusCode::NOT_FOUND.into_response()
            }
            ServerError::Internal(message) => {
                tracing::error!("request failed: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    ServerError::BadRequest(format!("{}", err))
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Access { .. } => {
                ServerError::Unauthenticated
            }
            CommandError::Database { message, reason_code, retryable } => {
                ServerError::Internal(format!("{} {:?} {}", message, reason_code, retryable))
            }
            CommandError::DuplicateKey { message } => {
                // A duplicate create surfaces as a field-level failure on the key,
                // not as a conflict.
                ServerError::Validation(vec![ValidationFailure::new("Isbn", message.as_str())])
            }
            CommandError::NotFound { .. } => {
                ServerError::NotFound
            }
            CommandError::Runtime { message, reason_code, .. } => {
                ServerError::Internal(format!("{} {:?}", message, reason_code))
            }
            CommandError::Serialization { message } => {
                ServerError::BadRequest(message)
            }
            CommandError::Validation { message, reason_code } => {
                ServerError::BadRequest(format!("{} {:?}", message, reason_code))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use crate::core::command::CommandError;
    use crate::core::controller::{AppState, ServerError, ValidationFailure};
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_build_app_state() {
        let state = AppState::new("test", RepositoryStore::LocalDynamoDB);
        assert_eq!("test", state.config.branch_id.as_str());
        assert_eq!(RepositoryStore::LocalDynamoDB, state.store);
    }

    #[tokio::test]
    async fn test_should_map_duplicate_key_to_validation_body() {
        let err = ServerError::from(CommandError::DuplicateKey {
            message: "A book with this ISBN already exists".to_string(),
        });
        match err {
            ServerError::Validation(failures) => {
                assert_eq!(1, failures.len());
                assert_eq!("Isbn", failures[0].property_name.as_str());
                assert_eq!("A book with this ISBN already exists", failures[0].error_message.as_str());
            }
            other => panic!("unexpected mapping {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_should_map_not_found_to_404() {
        let err = ServerError::from(CommandError::NotFound { message: "nope".to_string() });
        assert_eq!(StatusCode::NOT_FOUND, err.into_response().status());
    }

    #[tokio::test]
    async fn test_should_serialize_validation_failure_camel_case() {
        let failure = ValidationFailure::new("Title", "'Title' must not be empty.");
        let json = serde_json::to_value(&failure).expect("should serialize");
        assert_eq!("Title", json["propertyName"]);
        assert_eq!("'Title' must not be empty.", json["errorMessage"]);
    }
}
