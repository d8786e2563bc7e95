pub mod config;
pub mod domain;
pub mod errors;
pub mod money;

pub use domain::cart::{Cart, CartEntry, CartId, CartLine, CartView, LineChange, SessionId};
pub use domain::product::{Product, ProductDraft, ProductId};
pub use errors::DomainError;
pub use money::format_price;
