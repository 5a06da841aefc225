//! AI module - per-kind enemy profiles and the enemy decision step

mod decision;
mod profiles;

pub use decision::*;
pub use profiles::*;
