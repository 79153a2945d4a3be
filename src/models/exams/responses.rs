use serde::Serialize;

use super::entities::{Choice, Question};
use crate::models::courses::entities::Course;

/// 单个选项在答卷中的状态
#[derive(Debug, Clone, Serialize)]
pub struct ChoiceOutcome {
    #[serde(flatten)]
    pub choice: Choice,
    pub selected: bool,
}

/// 单道题的作答情况
#[derive(Debug, Clone, Serialize)]
pub struct QuestionOutcome {
    #[serde(flatten)]
    pub question: Question,
    pub choices: Vec<ChoiceOutcome>,
    // 选中了全部正确选项且没有选中错误选项
    pub answered_correctly: bool,
}

/// 考试结果，每次查看时重新计算
#[derive(Debug, Clone, Serialize)]
pub struct ExamResultResponse {
    pub course: Course,
    pub submission_id: i64,
    pub total_score: i64,
    pub possible_score: i64,
    pub percentage: i64,
    pub pass_mark: u8,
    pub passed: bool,
    pub choices: Vec<Choice>,
    pub questions: Vec<QuestionOutcome>,
}
