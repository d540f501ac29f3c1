//! # Inventory Admin
//!
//! Client library for an inventory/order REST backend: products, customers,
//! suppliers and orders, each managed through a CRUD view.
//!
//! ## Ingredients
//!
//! - **Foundation**
//!     - **Domain types** - Plain records with their form schemas and card rendering → [`domain`]
//!     - **Errors** - One taxonomy for transport, HTTP, decode, timeout, cancellation and validation failures → [`error`]
//! - **Core Patterns**
//!     - **Request gateway** - Every call goes through one place that builds URLs, merges headers, enforces the timeout and classifies failures → [`gateway::ApiService`]
//!     - **Entity accessors** - getAll / getById / create / update / delete bound to one collection → [`clients::Accessor`]
//!     - **Generated clients** - Named per-entity methods with automatic tracing → [`clients::ProductClient`]
//!     - **Schema-driven forms** - One validator for every entity, driven by field specs → [`forms::FormState`]
//! - **Architecture**
//!     - **Views** - Per-entity state machines owning list, modal, confirmation and status → [`views::EntityView`]
//!     - **Mock stores** - One in-memory actor per entity behind the same accessor contract → [`actor_framework::ResourceActor`]
//! - **System Concerns**
//!     - **System coordinator** - Backend selection, store startup and shutdown → [`app_system::InventorySystem`]
//!     - **Configuration** - Base URL and timeout from defaults, environment and flags → [`app_system::ApiConfig`]
//!     - **Tracing setup** - Centralized observability configuration → [`app_system::setup_tracing`]
//!
//! ## Example Usage
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use inventory_admin::app_system::{ApiConfig, Backend, InventorySystem};
//!
//! let system = InventorySystem::new(Backend::Http(ApiConfig::from_env()?))?;
//!
//! let mut products = system.product_view();
//! products.load().await?;
//!
//! products.open_modal(None);
//! products.set_field("nombreProducto", "Cerveza Lager")?;
//! products.set_field("idProveedor", "101")?;
//! products.set_field("precioUnitario", "2.50")?;
//! products.set_field("tipoPresentacion", "Six pack")?;
//! products.submit().await?;
//!
//! drop(products);
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Expected Tracing Output
//!
//! ```text
//! INFO inventory_system: Using in-memory mock backend
//! INFO resource_actor{resource="/products"}: Mock store starting records=3
//! INFO load{resource="/products"}: List loaded count=3
//! DEBUG submit{resource="/products"}: resource_actor{resource="/products"}: Record created id=4
//! INFO submit{resource="/products"}: Record saved target=None
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod domain;
pub mod error;
pub mod forms;
pub mod gateway;
pub mod mock_data;
pub mod views;

#[cfg(test)]
mod http_stub;
#[cfg(test)]
mod mock_framework;
