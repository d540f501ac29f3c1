use crate::clients::HttpAccessor;
use crate::domain::Product;

/// Client for the `/products` collection.
#[derive(Clone)]
pub struct ProductClient {
    inner: HttpAccessor<Product>,
}

impl_basic_client!(ProductClient, Product, product, products);
