pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod validate;

pub use extractor::{SafeCourseId, SafeSubmissionId};
pub use parameter_error_handler::form_error_handler;
