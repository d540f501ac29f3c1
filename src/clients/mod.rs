//! Entity accessors: getAll / getById / create / update / delete bound to one
//! resource path.
//!
//! [`Accessor`] is the seam views depend on. [`HttpAccessor`] drives it through
//! the request gateway; the mock store's `ResourceClient` implements the same
//! contract in memory.

#[macro_use]
mod macros;

pub mod customer_client;
pub mod envelope;
pub mod order_client;
pub mod product_client;
pub mod supplier_client;

pub use customer_client::CustomerClient;
pub use envelope::{decode_collection, Envelope};
pub use order_client::OrderClient;
pub use product_client::ProductClient;
pub use supplier_client::SupplierClient;

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::actor_framework::Entity;
use crate::error::ApiError;
use crate::gateway::{ApiResponse, ApiService, RequestOptions};

#[async_trait]
pub trait Accessor<T: Entity>: Send + Sync {
    async fn get_all(&self, cancel: &CancellationToken) -> Result<Vec<T>, ApiError>;

    async fn get_by_id(&self, id: u64, cancel: &CancellationToken) -> Result<T, ApiError>;

    async fn create(&self, draft: T::Draft, cancel: &CancellationToken) -> Result<ApiResponse, ApiError>;

    async fn update(
        &self,
        id: u64,
        draft: T::Draft,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse, ApiError>;

    async fn delete(&self, id: u64, cancel: &CancellationToken) -> Result<ApiResponse, ApiError>;
}

#[async_trait]
impl<T: Entity, A: Accessor<T> + ?Sized> Accessor<T> for Arc<A> {
    async fn get_all(&self, cancel: &CancellationToken) -> Result<Vec<T>, ApiError> {
        (**self).get_all(cancel).await
    }

    async fn get_by_id(&self, id: u64, cancel: &CancellationToken) -> Result<T, ApiError> {
        (**self).get_by_id(id, cancel).await
    }

    async fn create(&self, draft: T::Draft, cancel: &CancellationToken) -> Result<ApiResponse, ApiError> {
        (**self).create(draft, cancel).await
    }

    async fn update(
        &self,
        id: u64,
        draft: T::Draft,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse, ApiError> {
        (**self).update(id, draft, cancel).await
    }

    async fn delete(&self, id: u64, cancel: &CancellationToken) -> Result<ApiResponse, ApiError> {
        (**self).delete(id, cancel).await
    }
}

/// Accessor for one REST collection, backed by the gateway.
pub struct HttpAccessor<T: Entity> {
    api: Arc<ApiService>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for HttpAccessor<T> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> HttpAccessor<T> {
    pub fn new(api: Arc<ApiService>) -> Self {
        Self {
            api,
            _entity: PhantomData,
        }
    }

    fn collection_path() -> &'static str {
        T::RESOURCE.path()
    }

    fn item_path(id: u64) -> String {
        format!("{}/{}", T::RESOURCE.path(), id)
    }
}

fn to_body<D: serde::Serialize>(draft: &D) -> Result<Value, ApiError> {
    serde_json::to_value(draft).map_err(|e| ApiError::Decode(format!("unserializable payload: {e}")))
}

/// Adds `id` to an object payload unless the caller already set one.
pub fn inject_id(mut body: Value, id: u64) -> Value {
    if let Value::Object(map) = &mut body {
        map.entry("id").or_insert_with(|| Value::from(id));
    }
    body
}

#[async_trait]
impl<T: Entity> Accessor<T> for HttpAccessor<T> {
    #[instrument(skip(self, cancel), fields(resource = T::RESOURCE.path()))]
    async fn get_all(&self, cancel: &CancellationToken) -> Result<Vec<T>, ApiError> {
        let body = self
            .api
            .request(Self::collection_path(), RequestOptions::get(), cancel)
            .await?
            .into_json()?;
        decode_collection(body, T::RESOURCE)
    }

    #[instrument(skip(self, cancel), fields(resource = T::RESOURCE.path()))]
    async fn get_by_id(&self, id: u64, cancel: &CancellationToken) -> Result<T, ApiError> {
        let body = self
            .api
            .request(&Self::item_path(id), RequestOptions::get(), cancel)
            .await?
            .into_json()?;
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    #[instrument(skip(self, cancel), fields(resource = T::RESOURCE.path()))]
    async fn create(&self, draft: T::Draft, cancel: &CancellationToken) -> Result<ApiResponse, ApiError> {
        let body = to_body(&draft)?;
        self.api
            .request(Self::collection_path(), RequestOptions::post(body), cancel)
            .await
    }

    #[instrument(skip(self, cancel), fields(resource = T::RESOURCE.path()))]
    async fn update(
        &self,
        id: u64,
        draft: T::Draft,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse, ApiError> {
        let body = inject_id(to_body(&draft)?, id);
        self.api
            .request(&Self::item_path(id), RequestOptions::put(body), cancel)
            .await
    }

    #[instrument(skip(self, cancel), fields(resource = T::RESOURCE.path()))]
    async fn delete(&self, id: u64, cancel: &CancellationToken) -> Result<ApiResponse, ApiError> {
        self.api
            .request(&Self::item_path(id), RequestOptions::delete(), cancel)
            .await
    }
}
