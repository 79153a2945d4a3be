use serde::Serialize;

use super::entities::{Course, Lesson};
use crate::models::exams::entities::ExamQuestion;

/// 课程详情
///
/// `questions` 只对已选课用户填充，考试表单嵌在详情页中。
#[derive(Debug, Clone, Serialize)]
pub struct CourseDetailResponse {
    pub course: Course,
    pub lessons: Vec<Lesson>,
    pub is_enrolled: bool,
    pub questions: Vec<ExamQuestion>,
}
