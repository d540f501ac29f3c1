use std::collections::BTreeMap;
use std::fmt::Debug;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::app_system::Resource;
use crate::clients::Accessor;
use crate::error::ApiError;
use crate::forms::FieldSpec;
use crate::gateway::{Ack, ApiResponse};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// A record type managed by one CRUD view.
pub trait Entity:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The record without its id, as sent on create and update.
    type Draft: Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static;

    const RESOURCE: Resource;

    fn id(&self) -> u64;

    /// Short human label, used in cards and confirmation prompts.
    fn label(&self) -> String;

    /// Form schema: local field keys, API names, kinds and rules.
    fn fields() -> &'static [FieldSpec];

    fn from_draft(id: u64, draft: Self::Draft) -> Self;

    fn to_draft(&self) -> Self::Draft;

    /// Fills derived draft fields after validation.
    fn on_submit(_draft: &mut Self::Draft) {}

    /// One-line summary of a list, shown above the cards.
    fn summarize(items: &[Self]) -> String {
        format!("{} registros", items.len())
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, ApiError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: u64,
        respond_to: Response<T>,
    },
    Create {
        draft: T::Draft,
        respond_to: Response<T>,
    },
    Update {
        id: u64,
        draft: T::Draft,
        respond_to: Response<T>,
    },
    Delete {
        id: u64,
        respond_to: Response<()>,
    },
}

// =============================================================================
// 3. THE IN-MEMORY STORE
// =============================================================================

/// Owns one entity's mock records and serves them over a channel.
///
/// Ids come from a counter that starts above the largest seeded id and only
/// moves forward, so an id is never handed out twice.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<u64, T>,
    next_id: u64,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(buffer_size: usize, seed: Vec<T>) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let next_id = seed.iter().map(Entity::id).max().unwrap_or(0) + 1;
        let store = seed.into_iter().map(|item| (item.id(), item)).collect();
        let actor = Self {
            receiver,
            store,
            next_id,
        };
        (actor, ResourceClient::new(sender))
    }

    #[instrument(name = "resource_actor", skip(self), fields(resource = T::RESOURCE.path()))]
    pub async fn run(mut self) {
        info!(records = self.store.len(), "Mock store starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned().ok_or_else(|| ApiError::not_found(id));
                    let _ = respond_to.send(item);
                }
                ResourceRequest::Create { draft, respond_to } => {
                    let id = self.next_id;
                    self.next_id += 1;
                    let item = T::from_draft(id, draft);
                    self.store.insert(id, item.clone());
                    debug!(id, "Record created");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    draft,
                    respond_to,
                } => {
                    let result = match self.store.get_mut(&id) {
                        Some(item) => {
                            *item = T::from_draft(id, draft);
                            debug!(id, "Record updated");
                            Ok(item.clone())
                        }
                        None => Err(ApiError::not_found(id)),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let result = match self.store.remove(&id) {
                        Some(_) => {
                            debug!(id, "Record deleted");
                            Ok(())
                        }
                        None => Err(ApiError::not_found(id)),
                    };
                    let _ = respond_to.send(result);
                }
            }
        }
        info!("Mock store stopped");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Debug)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn call<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
        cancel: &CancellationToken,
    ) -> Result<R, ApiError> {
        let (respond_to, response) = oneshot::channel();
        let exchange = async {
            self.sender
                .send(build(respond_to))
                .await
                .map_err(|_| ApiError::Transport("Actor closed".to_string()))?;
            response
                .await
                .map_err(|_| ApiError::Transport("Actor dropped".to_string()))?
        };
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ApiError::Cancelled),
            result = exchange => result,
        }
    }

    pub async fn list(&self, cancel: &CancellationToken) -> Result<Vec<T>, ApiError> {
        self.call(|respond_to| ResourceRequest::List { respond_to }, cancel)
            .await
    }

    pub async fn get(&self, id: u64, cancel: &CancellationToken) -> Result<T, ApiError> {
        self.call(|respond_to| ResourceRequest::Get { id, respond_to }, cancel)
            .await
    }

    pub async fn create(&self, draft: T::Draft, cancel: &CancellationToken) -> Result<T, ApiError> {
        self.call(|respond_to| ResourceRequest::Create { draft, respond_to }, cancel)
            .await
    }

    pub async fn update(
        &self,
        id: u64,
        draft: T::Draft,
        cancel: &CancellationToken,
    ) -> Result<T, ApiError> {
        self.call(
            |respond_to| ResourceRequest::Update {
                id,
                draft,
                respond_to,
            },
            cancel,
        )
        .await
    }

    pub async fn delete(&self, id: u64, cancel: &CancellationToken) -> Result<(), ApiError> {
        self.call(|respond_to| ResourceRequest::Delete { id, respond_to }, cancel)
            .await
    }
}

fn echo<T: Entity>(item: &T) -> Result<ApiResponse, ApiError> {
    serde_json::to_value(item)
        .map(ApiResponse::Json)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl<T: Entity> Accessor<T> for ResourceClient<T> {
    async fn get_all(&self, cancel: &CancellationToken) -> Result<Vec<T>, ApiError> {
        self.list(cancel).await
    }

    async fn get_by_id(&self, id: u64, cancel: &CancellationToken) -> Result<T, ApiError> {
        self.get(id, cancel).await
    }

    async fn create(&self, draft: T::Draft, cancel: &CancellationToken) -> Result<ApiResponse, ApiError> {
        let item = ResourceClient::create(self, draft, cancel).await?;
        echo(&item)
    }

    async fn update(
        &self,
        id: u64,
        draft: T::Draft,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse, ApiError> {
        let item = ResourceClient::update(self, id, draft, cancel).await?;
        echo(&item)
    }

    async fn delete(&self, id: u64, cancel: &CancellationToken) -> Result<ApiResponse, ApiError> {
        ResourceClient::delete(self, id, cancel).await?;
        Ok(ApiResponse::Ack(Ack::no_content()))
    }
}

// =============================================================================
// 5. TESTS
// =============================================================================
