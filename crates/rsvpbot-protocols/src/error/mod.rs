//! Error types for the rsvpbot protocol layer.

mod automation;
mod collaborator;
mod page;
mod validation;

pub use automation::*;
pub use collaborator::*;
pub use page::*;
pub use validation::*;
