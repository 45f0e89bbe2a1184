pub mod extract;
pub mod health;

pub use extract::*;
pub use health::*;
