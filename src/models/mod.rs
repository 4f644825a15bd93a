pub mod product;
pub mod order;

pub use product::{Category, Product};
pub use order::{CustomerDetails, Order, OrderItem, PlacedOrder};
