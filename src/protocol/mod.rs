pub mod frame;
pub mod transport;

pub use frame::{Command, Frame};
