use actix_web::HttpRequest;
use std::collections::{HashMap, HashSet};
use tera::Context;

use super::{ExamService, scoring};
use crate::config::AppConfig;
use crate::errors::{OnlineCourseError, Result};
use crate::models::exams::responses::ExamResultResponse;
use crate::storage::Storage;
use crate::views::ViewOutcome;

/// 计算答卷成绩
///
/// 课程或答卷不存在，或答卷属于其它课程时返回 `NotFound`。
pub async fn get_result(
    storage: &dyn Storage,
    course_id: i64,
    submission_id: i64,
) -> Result<ExamResultResponse> {
    let course = storage
        .get_course_by_id(course_id)
        .await?
        .ok_or_else(|| OnlineCourseError::not_found("Course not found"))?;

    let submission = storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| OnlineCourseError::not_found("Submission not found"))?;

    match storage.get_enrollment_by_id(submission.enrollment_id).await? {
        Some(enrollment) if enrollment.course_id == course_id => {}
        _ => return Err(OnlineCourseError::not_found("Submission not found")),
    }

    let selected = storage.list_submission_choices(submission.id).await?;

    let question_ids: Vec<i64> = selected
        .iter()
        .map(|c| c.question_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let grades: HashMap<i64, i32> = storage
        .get_questions_by_ids(&question_ids)
        .await?
        .into_iter()
        .map(|q| (q.id, q.grade))
        .collect();
    let total_score = scoring::total_score(&selected, &grades);

    let questions = storage.list_exam_questions(course_id).await?;
    let possible_score = scoring::possible_score(&questions);
    let selected_ids: HashSet<i64> = selected.iter().map(|c| c.id).collect();
    let pass_mark = AppConfig::get().exam.pass_mark;

    Ok(ExamResultResponse {
        course,
        submission_id: submission.id,
        total_score,
        possible_score,
        percentage: scoring::percentage(total_score, possible_score),
        pass_mark,
        passed: scoring::is_passed(total_score, possible_score, pass_mark),
        questions: scoring::question_outcomes(&questions, &selected_ids),
        choices: selected,
    })
}

pub async fn handle_show_result(
    service: &ExamService,
    course_id: i64,
    submission_id: i64,
    request: &HttpRequest,
) -> ViewOutcome {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return ViewOutcome::failed(e),
    };

    let result = match get_result(storage.as_ref(), course_id, submission_id).await {
        Ok(result) => result,
        Err(e) => return ViewOutcome::failed(e),
    };

    match Context::from_serialize(&result) {
        Ok(mut context) => {
            context.insert("grade", &result.total_score);
            ViewOutcome::render("exam_result.html", context)
        }
        Err(e) => ViewOutcome::failed(e.into()),
    }
}
