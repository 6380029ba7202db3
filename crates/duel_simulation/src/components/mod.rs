//! ECS Components для бойцов
//!
//! Организация по доменам:
//! - fighter: идентичность бойца (Hero | Monster)
//! - clock: per-fighter ActionClock (elapsed → normalized animation time)

pub mod clock;
pub mod fighter;

// Re-exports для удобного импорта
pub use clock::*;
pub use fighter::*;
