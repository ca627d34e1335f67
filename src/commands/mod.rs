//! CLI command implementations.

pub mod details;
pub mod prices;

pub use details::DetailsCommand;
pub use prices::{PriceQuery, PricesCommand};
