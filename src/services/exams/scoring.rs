//! 考试计分
//!
//! 每个被选中的正确选项都计入其所属题目的分值，分数从不持久化。

use std::collections::{HashMap, HashSet};

use crate::models::exams::{
    entities::{Choice, ExamQuestion},
    responses::{ChoiceOutcome, QuestionOutcome},
};

/// 所选选项的总得分，`grades` 为题目 ID 到分值的映射
pub fn total_score(selected: &[Choice], grades: &HashMap<i64, i32>) -> i64 {
    selected
        .iter()
        .filter(|choice| choice.is_correct)
        .filter_map(|choice| grades.get(&choice.question_id))
        .map(|grade| i64::from(*grade))
        .sum()
}

/// 课程全部题目的分值之和
pub fn possible_score(questions: &[ExamQuestion]) -> i64 {
    questions
        .iter()
        .map(|q| i64::from(q.question.grade))
        .sum()
}

/// 得分百分比，向下取整；总分为 0 时为 0
pub fn percentage(total: i64, possible: i64) -> i64 {
    if possible <= 0 {
        return 0;
    }
    (total.max(0) * 100 / possible).min(100)
}

pub fn is_passed(total: i64, possible: i64, pass_mark: u8) -> bool {
    possible > 0 && percentage(total, possible) >= i64::from(pass_mark)
}

/// 逐题作答情况
pub fn question_outcomes(
    questions: &[ExamQuestion],
    selected_ids: &HashSet<i64>,
) -> Vec<QuestionOutcome> {
    questions
        .iter()
        .map(|exam_question| {
            let choices: Vec<ChoiceOutcome> = exam_question
                .choices
                .iter()
                .map(|choice| ChoiceOutcome {
                    choice: choice.clone(),
                    selected: selected_ids.contains(&choice.id),
                })
                .collect();
            let answered_correctly = !choices.is_empty()
                && choices.iter().all(|c| c.selected == c.choice.is_correct);

            QuestionOutcome {
                question: exam_question.question.clone(),
                choices,
                answered_correctly,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::exams::entities::Question;

    fn cs101() -> (ExamQuestion, Choice, Choice) {
        let question = Question {
            id: 1,
            course_id: 1,
            question_text: "What does CPU stand for?".to_string(),
            grade: 10,
        };
        let c1 = Choice {
            id: 1,
            question_id: 1,
            choice_text: "Central Processing Unit".to_string(),
            is_correct: true,
        };
        let c2 = Choice {
            id: 2,
            question_id: 1,
            choice_text: "Computer Personal Unit".to_string(),
            is_correct: false,
        };
        let exam_question = ExamQuestion {
            question,
            choices: vec![c1.clone(), c2.clone()],
        };
        (exam_question, c1, c2)
    }

    fn grades() -> HashMap<i64, i32> {
        HashMap::from([(1, 10)])
    }

    #[test]
    fn test_correct_choice_scores_question_grade() {
        let (_, c1, _) = cs101();
        assert_eq!(total_score(&[c1], &grades()), 10);
    }

    #[test]
    fn test_incorrect_choice_scores_zero() {
        let (_, _, c2) = cs101();
        assert_eq!(total_score(&[c2], &grades()), 0);
    }

    #[test]
    fn test_both_choices_score_correct_one_only() {
        let (_, c1, c2) = cs101();
        assert_eq!(total_score(&[c1, c2], &grades()), 10);
    }

    #[test]
    fn test_no_choices_score_zero() {
        assert_eq!(total_score(&[], &grades()), 0);
    }

    #[test]
    fn test_percentage_and_pass_mark() {
        assert_eq!(percentage(10, 10), 100);
        assert_eq!(percentage(7, 10), 70);
        assert_eq!(percentage(0, 0), 0);
        assert!(is_passed(8, 10, 80));
        assert!(!is_passed(7, 10, 80));
        assert!(!is_passed(0, 0, 0));
    }

    #[test]
    fn test_question_outcomes_mark_selection() {
        let (exam_question, _, _) = cs101();
        let questions = vec![exam_question];

        let outcomes = question_outcomes(&questions, &HashSet::from([1]));
        assert!(outcomes[0].answered_correctly);
        assert!(outcomes[0].choices[0].selected);
        assert!(!outcomes[0].choices[1].selected);

        let outcomes = question_outcomes(&questions, &HashSet::from([1, 2]));
        assert!(!outcomes[0].answered_correctly);
        assert_eq!(possible_score(&questions), 10);
    }
}
