use crate::clients::HttpAccessor;
use crate::domain::Supplier;

/// Client for the `/suppliers` collection.
#[derive(Clone)]
pub struct SupplierClient {
    inner: HttpAccessor<Supplier>,
}

impl_basic_client!(SupplierClient, Supplier, supplier, suppliers);
