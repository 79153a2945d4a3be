use actix_web::HttpRequest;
use std::collections::HashSet;
use tracing::info;

use super::ExamService;
use crate::errors::{OnlineCourseError, Result};
use crate::models::exams::requests::ExamAnswers;
use crate::models::users::entities::User;
use crate::routes::paths;
use crate::storage::Storage;
use crate::views::ViewOutcome;

/// 提交答卷，返回新答卷的 ID
///
/// 检查顺序：课程存在、用户已选课、字段均为整数、选项都属于本课程题目。
/// 答卷与所选选项在同一事务中写入。
pub async fn submit_exam(
    storage: &dyn Storage,
    user: Option<&User>,
    course_id: i64,
    fields: &[(String, String)],
) -> Result<i64> {
    if storage.get_course_by_id(course_id).await?.is_none() {
        return Err(OnlineCourseError::not_found("Course not found"));
    }

    let enrollment = match user {
        Some(user) => storage.get_enrollment(user.id, course_id).await?,
        None => None,
    }
    .ok_or_else(|| {
        OnlineCourseError::not_enrolled("You must enroll in this course before taking the exam")
    })?;

    let answers =
        ExamAnswers::from_form_fields(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;

    let course_choice_ids: HashSet<i64> = storage
        .list_exam_questions(course_id)
        .await?
        .iter()
        .flat_map(|q| q.choices.iter().map(|c| c.id))
        .collect();

    if let Some(foreign) = answers
        .choice_ids
        .iter()
        .find(|id| !course_choice_ids.contains(*id))
    {
        return Err(OnlineCourseError::malformed_input(format!(
            "Choice {foreign} does not belong to this course"
        )));
    }

    let submission = storage
        .create_submission(enrollment.id, &answers.choice_ids)
        .await?;

    info!(
        "Submission {} recorded for enrollment {} with {} choice(s)",
        submission.id,
        enrollment.id,
        answers.choice_ids.len()
    );
    Ok(submission.id)
}

pub async fn handle_submit(
    service: &ExamService,
    viewer: Option<&User>,
    course_id: i64,
    fields: Vec<(String, String)>,
    request: &HttpRequest,
) -> ViewOutcome {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return ViewOutcome::failed(e),
    };

    match submit_exam(storage.as_ref(), viewer, course_id, &fields).await {
        Ok(submission_id) => ViewOutcome::redirect(paths::exam_result(course_id, submission_id)),
        Err(e) => ViewOutcome::failed(e),
    }
}
