//! Client service

use opsdesk_shared::models::{Client, CreateClient, UpdateClient};
use opsdesk_shared::repos::{ClientRepo, RepoResult};
use std::sync::Arc;
use uuid::Uuid;

/// Orchestrates client operations on top of a `ClientRepo`
#[derive(Clone)]
pub struct ClientsService {
    repo: Arc<dyn ClientRepo>,
}

impl ClientsService {
    pub fn new(repo: Arc<dyn ClientRepo>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> RepoResult<Vec<Client>> {
        self.repo.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<Client>> {
        self.repo.get_by_id(id).await
    }

    /// Creates a client; an empty-string email is normalized to absent
    pub async fn create(&self, mut input: CreateClient) -> RepoResult<Client> {
        if input.email.as_deref() == Some("") {
            input.email = None;
        }
        self.repo.create(input).await
    }

    pub async fn update(&self, id: Uuid, input: UpdateClient) -> RepoResult<Option<Client>> {
        self.repo.update(id, input).await
    }

    pub async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsdesk_shared::repos::memory::MemoryClientRepo;

    #[tokio::test]
    async fn test_empty_email_is_normalized_to_absent() {
        let service = ClientsService::new(Arc::new(MemoryClientRepo::new()));
        let client = service
            .create(CreateClient {
                name: "Acme".to_string(),
                email: Some(String::new()),
                phone: None,
                notes: None,
            })
            .await
            .unwrap();

        assert!(client.email.is_none());
    }
}
