mod extractor;
pub use extractor::*;

mod upload;
pub use upload::*;
