use serde::Deserialize;
use std::collections::BTreeSet;

use crate::errors::{OnlineCourseError, Result};

/// 考试表单中代表所选选项的字段名前缀
pub const CHOICE_FIELD_PREFIX: &str = "choice";

// 题目创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestionRequest {
    pub course_id: i64,
    pub question_text: String,
    pub grade: i32,
    pub choices: Vec<CreateChoiceRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateChoiceRequest {
    pub choice_text: String,
    pub is_correct: bool,
}

/// 从考试表单中提取出的作答
///
/// 所有以 `choice` 开头的字段都被视为一个选项 ID，重复的 ID 只保留一次。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExamAnswers {
    pub choice_ids: BTreeSet<i64>,
}

impl ExamAnswers {
    pub fn from_form_fields<'a, I>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut choice_ids = BTreeSet::new();

        for (key, value) in fields {
            if !key.starts_with(CHOICE_FIELD_PREFIX) {
                continue;
            }

            let id = value.trim().parse::<i64>().map_err(|_| {
                OnlineCourseError::malformed_input(format!(
                    "Field '{key}' must be an integer choice id, got '{value}'"
                ))
            })?;
            choice_ids.insert(id);
        }

        Ok(Self { choice_ids })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
        pairs.to_vec()
    }

    #[test]
    fn test_only_choice_prefixed_fields_are_collected() {
        let answers = ExamAnswers::from_form_fields(fields(&[
            ("csrfmiddlewaretoken", "abc"),
            ("choice_1", "7"),
            ("choice_2", "9"),
            ("comment", "hello"),
        ]))
        .unwrap();

        assert_eq!(answers.choice_ids.into_iter().collect::<Vec<_>>(), vec![7, 9]);
    }

    #[test]
    fn test_duplicate_choice_ids_are_collapsed() {
        let answers =
            ExamAnswers::from_form_fields(fields(&[("choice_1", "3"), ("choice_1", "3")])).unwrap();
        assert_eq!(answers.choice_ids.len(), 1);
    }

    #[test]
    fn test_non_integer_choice_is_malformed() {
        let err = ExamAnswers::from_form_fields(fields(&[("choice_1", "abc")])).unwrap_err();
        assert!(matches!(err, OnlineCourseError::MalformedInput(_)));
        assert!(err.message().contains("choice_1"));
    }

    #[test]
    fn test_no_choice_fields_is_empty() {
        let answers = ExamAnswers::from_form_fields(fields(&[("other", "1")])).unwrap();
        assert!(answers.choice_ids.is_empty());
    }
}
