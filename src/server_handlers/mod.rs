pub mod health;
pub mod search;

pub use health::*;
pub use search::*;
