pub mod provider;
pub mod schema;

pub use provider::LinguaRobot;
