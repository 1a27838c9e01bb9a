//! Project endpoints

use super::{ClientError, MocktailClient};
use crate::types::{Project, ProjectPayload, ServiceAvailability};
use mocktail_core::interpolate_path;
use reqwest::Method;

const PROJECTS: &str = "backend/projects";
const PROJECT: &str = "backend/projects/:id";

impl MocktailClient {
    pub async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        let request = self.request(Method::GET, PROJECTS);
        self.execute(request).await
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, ClientError> {
        let path = interpolate_path(PROJECT, [("id", id)])?;
        self.execute(self.request(Method::GET, &path)).await
    }

    pub async fn create_project(&self, project: &ProjectPayload) -> Result<Project, ClientError> {
        let request = self.request(Method::POST, PROJECTS).json(project);
        self.execute(request).await
    }

    pub async fn update_project(
        &self,
        id: &str,
        project: &ProjectPayload,
    ) -> Result<(), ClientError> {
        let path = interpolate_path(PROJECT, [("id", id)])?;
        let request = self.request(Method::PUT, &path).json(project);
        self.execute_empty(request).await
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), ClientError> {
        let path = interpolate_path(PROJECT, [("id", id)])?;
        self.execute_empty(self.request(Method::DELETE, &path)).await
    }

    pub async fn check_backend_availability(&self) -> Result<ServiceAvailability, ClientError> {
        let request = self.request(Method::GET, "backend/check-availability");
        self.execute_public(request).await
    }
}
