//! AI systems (perception, contact attack, death reaction)

pub mod attack;
pub mod perception;
pub mod reactions;

#[cfg(test)]
mod perception_tests;

// Re-export all systems
pub use attack::*;
pub use perception::*;
pub use reactions::*;
