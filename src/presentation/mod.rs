//! Display formatting for extracted metadata: date normalisation plus the
//! summary and detail cards shown to users.

mod report;
mod value;
mod views;

pub use report::*;
pub use value::*;
pub use views::*;
