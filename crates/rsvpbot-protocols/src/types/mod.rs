//! Domain types shared across rsvpbot.

mod batch;
mod event;
mod identity;
mod outcome;

pub use batch::*;
pub use event::*;
pub use identity::*;
pub use outcome::*;
