pub mod provider;
pub mod schema;
pub mod tagged;

pub use provider::MerriamWebster;
