// src/models/mod.rs
pub mod campaign;
pub mod channel;
pub mod product;
pub mod sale;

pub use campaign::Campaign;
pub use channel::Channel;
pub use product::Product;
pub use sale::SalesFact;
