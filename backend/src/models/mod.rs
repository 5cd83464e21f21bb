pub mod booking;
pub mod destination;
pub mod launch;
pub mod macros;

pub use booking::*;
pub use destination::*;
pub use launch::*;
