use actix_web::{HttpRequest, web};
use once_cell::sync::Lazy;

use crate::services::ExamService;
use crate::utils::{SafeCourseId, SafeSubmissionId};
use crate::views::ViewOutcome;

static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);

// 提交答卷，表单字段原样交给服务层解析
pub async fn submit(
    req: HttpRequest,
    course_id: SafeCourseId,
    form: web::Form<Vec<(String, String)>>,
) -> ViewOutcome {
    EXAM_SERVICE
        .submit(&req, course_id.0, form.into_inner())
        .await
}

// 考试结果
pub async fn show_result(
    req: HttpRequest,
    course_id: SafeCourseId,
    submission_id: SafeSubmissionId,
) -> ViewOutcome {
    EXAM_SERVICE
        .show_result(&req, course_id.0, submission_id.0)
        .await
}

pub fn configure_exam_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{course_id}/submit/", web::post().to(submit))
        .route(
            "/course/{course_id}/submission/{submission_id}/result/",
            web::get().to(show_result),
        );
}
