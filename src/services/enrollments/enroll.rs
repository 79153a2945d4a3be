use actix_web::HttpRequest;
use tracing::{debug, info};

use super::EnrollmentService;
use crate::errors::{OnlineCourseError, Result};
use crate::models::enrollments::entities::EnrollmentMode;
use crate::models::users::entities::User;
use crate::routes::paths;
use crate::storage::Storage;
use crate::views::ViewOutcome;

/// 用户是否已选该课程，匿名用户总是未选
pub async fn is_enrolled(storage: &dyn Storage, user: Option<&User>, course_id: i64) -> Result<bool> {
    match user {
        Some(user) => Ok(storage.count_enrollments(user.id, course_id).await? > 0),
        None => Ok(false),
    }
}

/// 选课
///
/// 返回是否新建了选课记录。匿名用户和已选课用户都不做任何修改。
pub async fn enroll(storage: &dyn Storage, user: Option<&User>, course_id: i64) -> Result<bool> {
    if storage.get_course_by_id(course_id).await?.is_none() {
        return Err(OnlineCourseError::not_found("Course not found"));
    }

    let Some(user) = user else {
        debug!("Anonymous enroll request for course {} ignored", course_id);
        return Ok(false);
    };

    if is_enrolled(storage, Some(user), course_id).await? {
        return Ok(false);
    }

    match storage
        .create_enrollment(user.id, course_id, EnrollmentMode::Honor)
        .await?
    {
        Some(enrollment) => {
            info!(
                "User {} enrolled in course {} (enrollment ID: {})",
                user.id, course_id, enrollment.id
            );
            Ok(true)
        }
        None => {
            debug!(
                "Concurrent enrollment of user {} in course {} detected",
                user.id, course_id
            );
            Ok(false)
        }
    }
}

pub async fn handle_enroll(
    service: &EnrollmentService,
    viewer: Option<&User>,
    course_id: i64,
    request: &HttpRequest,
) -> ViewOutcome {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return ViewOutcome::failed(e),
    };

    match enroll(storage.as_ref(), viewer, course_id).await {
        Ok(_) => ViewOutcome::redirect(paths::course_detail(course_id)),
        Err(e) => ViewOutcome::failed(e),
    }
}
