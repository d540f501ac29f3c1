//! Business records. Plain data plus their form schemas and card rendering.

pub mod customer;
pub mod order;
pub mod product;
pub mod supplier;

pub use customer::*;
pub use order::*;
pub use product::*;
pub use supplier::*;
