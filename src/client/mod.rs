//! Typed client for the vault's HTTP API.
//!
//! [`VaultClient`] keeps the session cookie in its own cookie jar, so one instance
//! behaves like one logged-in browser tab. Deletes take a [`DeleteConfirmation`],
//! which can only be obtained through an explicit confirmation step.

use reqwest::{Response, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use url::Url;
use uuid::Uuid;

use crate::models::{
    ApiResponse,
    api_key::{ApiKeyResponse, CreateApiKeyRequest},
    auth::{AuthStatus, LoginRequest},
    hackathon::{HackathonFields, HackathonRecord},
};

pub mod form;
pub mod view;

/// Errors returned by [`VaultClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Network failure or unreadable response.
    #[error("could not reach the vault: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error status.
    ///
    /// `message` is the server's short, operator-facing text.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// Rejected before sending: a required field is blank.
    #[error("{0}")]
    Validation(String),

    #[error("invalid vault URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    /// True when the server rejected the request for lack of a session.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ClientError::Api { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }
}

/// Proof that the operator confirmed a destructive action.
#[derive(Debug)]
pub struct DeleteConfirmation(());

impl DeleteConfirmation {
    /// Ask before deleting. Returns `None` when the operator declines.
    pub fn ask(what: &str, prompt: impl FnOnce(&str) -> bool) -> Option<Self> {
        let question = format!("Are you sure you want to delete this {what}?");
        prompt(&question).then_some(Self(()))
    }

    /// Confirmation given up front, e.g. with a `--yes` flag.
    pub fn given() -> Self {
        Self(())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client bound to one vault server and one session.
#[derive(Debug, Clone)]
pub struct VaultClient {
    http: reqwest::Client,
    base: Url,
}

impl VaultClient {
    /// Create a client for the vault at `base_url` (e.g. `http://localhost:3000`).
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = reqwest::Client::builder().cookie_store(true).build()?;

        Ok(Self { http, base })
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(path)?)
    }

    /// Log in; on success the session cookie is kept for later calls.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ClientError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .http
            .post(self.url("api/login")?)
            .json(&body)
            .send()
            .await?;

        read::<ApiResponse<()>>(response).await?;
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self.http.post(self.url("api/logout")?).send().await?;
        read::<ApiResponse<()>>(response).await?;
        Ok(())
    }

    pub async fn auth_status(&self) -> Result<bool, ClientError> {
        let response = self.http.get(self.url("api/auth-status")?).send().await?;
        Ok(read::<AuthStatus>(response).await?.is_authenticated)
    }

    pub async fn list_keys(&self) -> Result<Vec<ApiKeyResponse>, ClientError> {
        let response = self.http.get(self.url("api/keys")?).send().await?;
        read(response).await
    }

    /// Store a new key. Blank name or key is rejected without a request.
    pub async fn add_key(
        &self,
        request: &CreateApiKeyRequest,
    ) -> Result<ApiKeyResponse, ClientError> {
        if request.name.trim().is_empty() || request.api_key.trim().is_empty() {
            return Err(ClientError::Validation(
                "Please enter both name and API key".to_string(),
            ));
        }

        let response = self
            .http
            .post(self.url("api/keys")?)
            .json(request)
            .send()
            .await?;

        data(read::<ApiResponse<ApiKeyResponse>>(response).await?)
    }

    pub async fn delete_key(
        &self,
        id: Uuid,
        _confirmed: DeleteConfirmation,
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("api/keys/{id}"))?)
            .send()
            .await?;

        read::<ApiResponse<()>>(response).await?;
        Ok(())
    }

    pub async fn list_hackathons(&self) -> Result<Vec<HackathonRecord>, ClientError> {
        let response = self.http.get(self.url("api/hackathons")?).send().await?;
        read(response).await
    }

    pub async fn create_hackathon(
        &self,
        fields: &HackathonFields,
    ) -> Result<HackathonRecord, ClientError> {
        let response = self
            .http
            .post(self.url("api/hackathons")?)
            .json(fields)
            .send()
            .await?;

        data(read::<ApiResponse<HackathonRecord>>(response).await?)
    }

    pub async fn update_hackathon(
        &self,
        id: Uuid,
        fields: &HackathonFields,
    ) -> Result<HackathonRecord, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("api/hackathons/{id}"))?)
            .json(fields)
            .send()
            .await?;

        data(read::<ApiResponse<HackathonRecord>>(response).await?)
    }

    pub async fn delete_hackathon(
        &self,
        id: Uuid,
        _confirmed: DeleteConfirmation,
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("api/hackathons/{id}"))?)
            .send()
            .await?;

        read::<ApiResponse<()>>(response).await?;
        Ok(())
    }
}

/// Decode a success body, or turn an error status into [`ClientError::Api`].
async fn read<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };

    Err(ClientError::Api { status, message })
}

fn data<T>(response: ApiResponse<T>) -> Result<T, ClientError> {
    response.data.ok_or_else(|| ClientError::Api {
        status: StatusCode::OK,
        message: "Response did not include the saved record".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = VaultClient::new("http://localhost:3000/vault").unwrap();

        assert_eq!(
            client.url("api/keys").unwrap().as_str(),
            "http://localhost:3000/vault/api/keys"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            VaultClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_confirmation_requires_yes() {
        let mut asked = String::new();
        let declined = DeleteConfirmation::ask("API key", |q| {
            asked = q.to_string();
            false
        });

        assert!(declined.is_none());
        assert_eq!(asked, "Are you sure you want to delete this API key?");
        assert!(DeleteConfirmation::ask("hackathon", |_| true).is_some());
    }

    #[tokio::test]
    async fn test_blank_key_not_sent() {
        // Nothing listens here; a request would fail with Http, not Validation
        let client = VaultClient::new("http://127.0.0.1:9").unwrap();

        let result = client
            .add_key(&CreateApiKeyRequest {
                name: "OpenAI".to_string(),
                description: None,
                api_key: "   ".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ClientError::Validation(_))));
    }
}
