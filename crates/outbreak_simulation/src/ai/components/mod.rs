//! AI components

pub mod agent;


// Re-export all components
pub use agent::*;
