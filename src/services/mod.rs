pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod exams;

pub use auth::AuthService;
pub use courses::CourseService;
pub use enrollments::EnrollmentService;
pub use exams::ExamService;

use actix_web::{HttpRequest, web};
use std::sync::Arc;

use crate::errors::{OnlineCourseError, Result};
use crate::storage::Storage;

/// 从应用数据中取出存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> Result<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| OnlineCourseError::database_connection("Storage not found in app data"))
}
