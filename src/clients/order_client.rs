use tokio_util::sync::CancellationToken;

use crate::clients::HttpAccessor;
use crate::domain::{orders_total, Order};
use crate::error::ApiError;

/// Client for the `/orders` collection.
///
/// Besides plain CRUD it can report the grand total of every order.
#[derive(Clone)]
pub struct OrderClient {
    inner: HttpAccessor<Order>,
}

impl_basic_client!(OrderClient, Order, order, orders);

impl OrderClient {
    /// Sum of every order total, rounded to cents.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn grand_total(&self, cancel: &CancellationToken) -> Result<f64, ApiError> {
        let orders = self.get_orders(cancel).await?;
        Ok(orders_total(&orders))
    }
}
