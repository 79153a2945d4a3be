use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: i64,
    pub course_id: i64,
    pub question_text: String,
    // 答对该题获得的分值
    pub grade: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    pub id: i64,
    pub question_id: i64,
    pub choice_text: String,
    pub is_correct: bool,
}

/// 题目及其全部选项
#[derive(Debug, Clone, Serialize)]
pub struct ExamQuestion {
    #[serde(flatten)]
    pub question: Question,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub enrollment_id: i64,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}
