use axum::extract::State;
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;

use crate::core::controller::{AppState, ServerError};
use crate::core::library::{LibraryError, LibraryResult};

// The identity attached to every authenticated request. The shared secret
// identifies the calling application, not a person, so the identity is fixed
// rather than derived from the credential.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    pub fn api_client() -> Self {
        Self {
            name: "library-api-client".to_string(),
            email: "client@library.dev".to_string(),
        }
    }
}

// Capability seam for the authentication strategy so the shared secret can be
// swapped for per-user tokens without touching the middleware or handlers.
pub trait Authenticator: Sync + Send {
    fn verify(&self, credential: Option<&str>) -> LibraryResult<Identity>;
}

pub struct SharedSecretAuthenticator {
    api_key: String,
}

impl SharedSecretAuthenticator {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
        }
    }
}

impl Authenticator for SharedSecretAuthenticator {
    fn verify(&self, credential: Option<&str>) -> LibraryResult<Identity> {
        let provided = credential.ok_or_else(|| {
            LibraryError::access_denied("missing api key", None)
        })?;
        // ct_eq rejects length mismatches without an early return on content.
        if provided.as_bytes().ct_eq(self.api_key.as_bytes()).into() {
            Ok(Identity::api_client())
        } else {
            Err(LibraryError::access_denied("invalid api key", None))
        }
    }
}

// Gates every routed request behind the configured authenticator; rejected
// requests never reach a handler.
pub async fn require_api_key<B>(
    State(state): State<AppState>,
    mut request: Request<B>,
    next: Next<B>) -> Result<Response, ServerError> {
    let credential = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    match state.authenticator.verify(credential) {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            Ok(next.run(request).await)
        }
        Err(_) => Err(ServerError::Unauthenticated),
    }
}
