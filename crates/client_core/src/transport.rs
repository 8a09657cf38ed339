use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::RequestError;

/// Write responses are only trusted for the assigned id; their remaining
/// shape differs per operation and may omit nested references.
#[derive(Debug, Deserialize)]
pub struct MutationReply {
    pub id: i64,
}

/// Thin wrapper over the four collection endpoints every entity type
/// exposes: `{base}/listar`, `{base}/criar`, `{base}/atualizar/{id}`,
/// `{base}/remover/{id}`.
#[derive(Clone)]
pub struct CollectionClient {
    http: Client,
    base_url: String,
}

impl CollectionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list<T: DeserializeOwned>(
        &self,
        base_path: &str,
    ) -> Result<Vec<T>, RequestError> {
        let response = self
            .http
            .get(self.endpoint(base_path, "listar"))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn create<I: Serialize>(
        &self,
        base_path: &str,
        input: &I,
    ) -> Result<MutationReply, RequestError> {
        let response = self
            .http
            .post(self.endpoint(base_path, "criar"))
            .json(input)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn update<I: Serialize>(
        &self,
        base_path: &str,
        id: i64,
        input: &I,
    ) -> Result<MutationReply, RequestError> {
        let response = self
            .http
            .put(format!("{}/{id}", self.endpoint(base_path, "atualizar")))
            .json(input)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn remove(&self, base_path: &str, id: i64) -> Result<(), RequestError> {
        let response = self
            .http
            .delete(format!("{}/{id}", self.endpoint(base_path, "remover")))
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            // Delete bodies are empty or a free-form confirmation; ignored.
            return Ok(());
        }
        Err(rejection(status, response).await)
    }

    fn endpoint(&self, base_path: &str, operation: &str) -> String {
        format!("{}{}/{}", self.base_url, base_path, operation)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RequestError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    Err(rejection(status, response).await)
}

async fn rejection(status: reqwest::StatusCode, response: Response) -> RequestError {
    let body = response.text().await.unwrap_or_default();
    RequestError::Rejected { status, body }
}
