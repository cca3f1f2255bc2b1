//! In-memory client store

use crate::models::{Client, CreateClient, UpdateClient};
use crate::repos::{ClientRepo, RepoResult};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory `ClientRepo`
#[derive(Debug, Default)]
pub struct MemoryClientRepo {
    clients: RwLock<Vec<Client>>,
}

impl MemoryClientRepo {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientRepo for MemoryClientRepo {
    async fn list(&self) -> RepoResult<Vec<Client>> {
        Ok(self.clients.read().await.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<Client>> {
        Ok(self
            .clients
            .read()
            .await
            .iter()
            .find(|client| client.id == id)
            .cloned())
    }

    async fn create(&self, input: CreateClient) -> RepoResult<Client> {
        let client = Client {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            notes: input.notes,
            created_at: Utc::now(),
        };
        self.clients.write().await.push(client.clone());
        Ok(client)
    }

    async fn update(&self, id: Uuid, input: UpdateClient) -> RepoResult<Option<Client>> {
        let mut clients = self.clients.write().await;
        let Some(client) = clients.iter_mut().find(|client| client.id == id) else {
            return Ok(None);
        };
        if let Some(name) = input.name {
            client.name = name;
        }
        if let Some(email) = input.email {
            client.email = Some(email);
        }
        if let Some(phone) = input.phone {
            client.phone = Some(phone);
        }
        if let Some(notes) = input.notes {
            client.notes = Some(notes);
        }
        Ok(Some(client.clone()))
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let mut clients = self.clients.write().await;
        let before = clients.len();
        clients.retain(|client| client.id != id);
        Ok(clients.len() != before)
    }
}
