pub mod step;
pub mod token;

pub use step::{relax_and_select, NextHop};
pub use token::{CostTable, Token, VisitedSet};
