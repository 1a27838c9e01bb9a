//! Project access token endpoints

use super::{ClientError, MocktailClient};
use crate::types::CreateAccessTokenRequest;
use mocktail_core::{ProjectAccessToken, interpolate_path};
use reqwest::Method;

const TOKENS: &str = "auth/api-tokens";
const TOKEN: &str = "auth/api-tokens/:tokenId";

impl MocktailClient {
    pub async fn list_access_tokens(
        &self,
        project_id: &str,
    ) -> Result<Vec<ProjectAccessToken>, ClientError> {
        let request = self
            .request(Method::GET, TOKENS)
            .query(&[("projectId", project_id)]);
        self.execute(request).await
    }

    /// Create a token; the response is the only time its value is returned
    pub async fn create_access_token(
        &self,
        body: &CreateAccessTokenRequest,
    ) -> Result<ProjectAccessToken, ClientError> {
        let request = self.request(Method::POST, TOKENS).json(body);
        self.execute(request).await
    }

    pub async fn delete_access_token(&self, token_id: &str) -> Result<(), ClientError> {
        let path = interpolate_path(TOKEN, [("tokenId", token_id)])?;
        self.execute_empty(self.request(Method::DELETE, &path)).await
    }
}
