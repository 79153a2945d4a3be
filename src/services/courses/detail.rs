use actix_web::HttpRequest;
use tera::Context;

use super::CourseService;
use crate::errors::{OnlineCourseError, Result};
use crate::models::courses::responses::CourseDetailResponse;
use crate::models::users::entities::User;
use crate::services::enrollments::is_enrolled;
use crate::storage::Storage;
use crate::views::ViewOutcome;

/// 课程详情，已选课的访问者同时获得考试题目
pub async fn course_detail(
    storage: &dyn Storage,
    viewer: Option<&User>,
    course_id: i64,
) -> Result<CourseDetailResponse> {
    let course = storage
        .get_course_by_id(course_id)
        .await?
        .ok_or_else(|| OnlineCourseError::not_found("Course not found"))?;

    let lessons = storage.list_lessons_by_course(course_id).await?;
    let is_enrolled = is_enrolled(storage, viewer, course_id).await?;
    let questions = if is_enrolled {
        storage.list_exam_questions(course_id).await?
    } else {
        Vec::new()
    };

    Ok(CourseDetailResponse {
        course,
        lessons,
        is_enrolled,
        questions,
    })
}

pub async fn handle_course_detail(
    service: &CourseService,
    viewer: Option<&User>,
    course_id: i64,
    request: &HttpRequest,
) -> ViewOutcome {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return ViewOutcome::failed(e),
    };

    match course_detail(storage.as_ref(), viewer, course_id).await {
        Ok(detail) => match Context::from_serialize(&detail) {
            Ok(context) => ViewOutcome::render("course_detail.html", context),
            Err(e) => ViewOutcome::failed(e.into()),
        },
        Err(e) => ViewOutcome::failed(e),
    }
}
