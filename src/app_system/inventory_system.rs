use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::actor_framework::{Entity, ResourceActor};
use crate::app_system::ApiConfig;
use crate::clients::{Accessor, CustomerClient, OrderClient, ProductClient, SupplierClient};
use crate::domain::{Customer, Order, Product, Supplier};
use crate::error::ApiError;
use crate::gateway::ApiService;
use crate::mock_data;
use crate::views::EntityView;

const STORE_BUFFER: usize = 32;

/// Where entity accessors send their requests.
#[derive(Debug, Clone)]
pub enum Backend {
    /// The REST API.
    Http(ApiConfig),
    /// In-process stores seeded with sample data.
    Mock,
}

#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Mock store task failed: {0}")]
    StoreFailed(String),
}

/// Type-erased accessor shared by every view of one entity.
pub type SharedAccessor<T> = Arc<dyn Accessor<T>>;

/// One accessor per entity, wired to the chosen backend.
///
/// With [`Backend::Mock`] every entity gets its own store task; they stop once
/// the system and every view built from it are dropped.
pub struct InventorySystem {
    pub products: SharedAccessor<Product>,
    pub customers: SharedAccessor<Customer>,
    pub suppliers: SharedAccessor<Supplier>,
    pub orders: SharedAccessor<Order>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl InventorySystem {
    pub fn new(backend: Backend) -> Result<Self, SystemError> {
        match backend {
            Backend::Http(config) => {
                info!(base_url = %config.base_url, timeout_ms = config.timeout.as_millis() as u64, "Using REST backend");
                let api = Arc::new(ApiService::new(&config)?);
                Ok(Self {
                    products: Arc::new(ProductClient::new(Arc::clone(&api))),
                    customers: Arc::new(CustomerClient::new(Arc::clone(&api))),
                    suppliers: Arc::new(SupplierClient::new(Arc::clone(&api))),
                    orders: Arc::new(OrderClient::new(api)),
                    handles: Vec::new(),
                })
            }
            Backend::Mock => {
                info!("Using in-memory mock backend");
                let mut handles = Vec::new();
                Ok(Self {
                    products: spawn_store(mock_data::products(), &mut handles),
                    customers: spawn_store(mock_data::customers(), &mut handles),
                    suppliers: spawn_store(mock_data::suppliers(), &mut handles),
                    orders: spawn_store(mock_data::orders(), &mut handles),
                    handles,
                })
            }
        }
    }

    pub fn product_view(&self) -> EntityView<Product, SharedAccessor<Product>> {
        EntityView::new(Arc::clone(&self.products))
    }

    pub fn customer_view(&self) -> EntityView<Customer, SharedAccessor<Customer>> {
        EntityView::new(Arc::clone(&self.customers))
    }

    pub fn supplier_view(&self) -> EntityView<Supplier, SharedAccessor<Supplier>> {
        EntityView::new(Arc::clone(&self.suppliers))
    }

    pub fn order_view(&self) -> EntityView<Order, SharedAccessor<Order>> {
        EntityView::new(Arc::clone(&self.orders))
    }

    /// Drops the accessors and waits for mock stores to stop.
    ///
    /// Views built from this system must be dropped first.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        let Self {
            products,
            customers,
            suppliers,
            orders,
            handles,
        } = self;
        drop((products, customers, suppliers, orders));

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(SystemError::StoreFailed(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

fn spawn_store<T: Entity>(
    seed: Vec<T>,
    handles: &mut Vec<tokio::task::JoinHandle<()>>,
) -> SharedAccessor<T> {
    let (actor, client) = ResourceActor::new(STORE_BUFFER, seed);
    handles.push(tokio::spawn(actor.run()));
    Arc::new(client)
}
