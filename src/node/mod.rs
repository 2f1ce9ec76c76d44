pub mod agent;
pub mod listener;

pub use agent::NodeAgent;
pub use listener::NodeListener;
