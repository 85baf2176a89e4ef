//! Record types held by the document store.

pub mod country;
pub mod neighbor;

pub use country::{Country, NewCountry};
pub use neighbor::Neighbor;
