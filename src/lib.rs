pub mod analyzers;
pub mod error;
pub mod field;
pub mod output;
pub mod survey;

pub use error::{ErrorKind, SurveyError};
pub use field::Field;
