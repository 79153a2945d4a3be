use actix_web::{HttpRequest, web};
use once_cell::sync::Lazy;

use crate::services::{CourseService, EnrollmentService};
use crate::utils::SafeCourseId;
use crate::views::ViewOutcome;

static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

// 热门课程列表
pub async fn list_courses(req: HttpRequest) -> ViewOutcome {
    COURSE_SERVICE.list_courses(&req).await
}

// 课程详情
pub async fn course_detail(req: HttpRequest, course_id: SafeCourseId) -> ViewOutcome {
    COURSE_SERVICE.get_course(&req, course_id.0).await
}

// 选课
pub async fn enroll(req: HttpRequest, course_id: SafeCourseId) -> ViewOutcome {
    ENROLLMENT_SERVICE.enroll(&req, course_id.0).await
}

pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(list_courses))
        .route("/{course_id}/", web::get().to(course_detail))
        .route("/{course_id}/enroll/", web::post().to(enroll));
}
