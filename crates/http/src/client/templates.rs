//! Template endpoints

use super::{ClientError, MocktailClient};
use crate::types::{GenerateRequest, ServiceAvailability, Template, TemplatePayload};
use mocktail_core::interpolate_path;
use reqwest::Method;
use serde_json::Value;

const TEMPLATES: &str = "backend/templates";
const TEMPLATE: &str = "backend/templates/:id";
const GENERATE: &str = "backend/templates/:id/generate";

impl MocktailClient {
    /// Templates of one project
    pub async fn list_templates(&self, project_id: &str) -> Result<Vec<Template>, ClientError> {
        let request = self
            .request(Method::GET, TEMPLATES)
            .query(&[("relatedProjectId", project_id)]);
        self.execute(request).await
    }

    pub async fn get_template(&self, id: &str) -> Result<Template, ClientError> {
        let path = interpolate_path(TEMPLATE, [("id", id)])?;
        self.execute(self.request(Method::GET, &path)).await
    }

    pub async fn create_template(&self, template: &TemplatePayload) -> Result<Template, ClientError> {
        let request = self.request(Method::POST, TEMPLATES).json(template);
        self.execute(request).await
    }

    pub async fn update_template(
        &self,
        id: &str,
        template: &TemplatePayload,
    ) -> Result<(), ClientError> {
        let path = interpolate_path(TEMPLATE, [("id", id)])?;
        let request = self.request(Method::PUT, &path).json(template);
        self.execute_empty(request).await
    }

    pub async fn delete_template(&self, id: &str) -> Result<(), ClientError> {
        let path = interpolate_path(TEMPLATE, [("id", id)])?;
        self.execute_empty(self.request(Method::DELETE, &path)).await
    }

    /// Generate mock records from a template
    pub async fn generate_from_template(
        &self,
        id: &str,
        count: u32,
    ) -> Result<Value, ClientError> {
        let path = interpolate_path(GENERATE, [("id", id)])?;
        let request = self
            .request(Method::POST, &path)
            .json(&GenerateRequest { count });
        self.execute(request).await
    }

    pub async fn check_content_availability(&self) -> Result<ServiceAvailability, ClientError> {
        let request = self.request(Method::GET, "content/check-availability");
        self.execute_public(request).await
    }
}
