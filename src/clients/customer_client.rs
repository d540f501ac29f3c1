use crate::clients::HttpAccessor;
use crate::domain::Customer;

/// Client for the `/customers` collection.
#[derive(Clone)]
pub struct CustomerClient {
    inner: HttpAccessor<Customer>,
}

impl_basic_client!(CustomerClient, Customer, customer, customers);
