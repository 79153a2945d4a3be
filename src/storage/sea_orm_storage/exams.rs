use super::SeaOrmStorage;
use crate::entity::choices::{
    ActiveModel as ChoiceActiveModel, Column as ChoiceColumn, Entity as Choices,
};
use crate::entity::questions::{ActiveModel, Column, Entity as Questions};
use crate::entity::submission_choices::{
    ActiveModel as SubmissionChoiceActiveModel, Column as SubmissionChoiceColumn,
    Entity as SubmissionChoices,
};
use crate::entity::submissions::{ActiveModel as SubmissionActiveModel, Entity as Submissions};
use crate::errors::{OnlineCourseError, Result};
use crate::models::exams::{
    entities::{Choice, ExamQuestion, Question, Submission},
    requests::CreateQuestionRequest,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use std::collections::{BTreeSet, HashMap};

impl SeaOrmStorage {
    /// 创建题目及其选项
    pub async fn create_question_impl(&self, req: CreateQuestionRequest) -> Result<ExamQuestion> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("开启事务失败: {e}")))?;

        let question = ActiveModel {
            course_id: Set(req.course_id),
            question_text: Set(req.question_text),
            grade: Set(req.grade),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| OnlineCourseError::database_operation(format!("创建题目失败: {e}")))?;

        let mut choices = Vec::with_capacity(req.choices.len());
        for choice in req.choices {
            let model = ChoiceActiveModel {
                question_id: Set(question.id),
                choice_text: Set(choice.choice_text),
                is_correct: Set(choice.is_correct),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("创建选项失败: {e}")))?;
            choices.push(model.into_choice());
        }

        txn.commit()
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(ExamQuestion {
            question: question.into_question(),
            choices,
        })
    }

    /// 列出课程的全部题目及选项
    pub async fn list_exam_questions_impl(&self, course_id: i64) -> Result<Vec<ExamQuestion>> {
        let questions = Questions::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("查询题目失败: {e}")))?;

        if questions.is_empty() {
            return Ok(Vec::new());
        }

        let question_ids: Vec<i64> = questions.iter().map(|q| q.id).collect();
        let choices = Choices::find()
            .filter(ChoiceColumn::QuestionId.is_in(question_ids))
            .order_by_asc(ChoiceColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("查询选项失败: {e}")))?;

        // 按题目分组
        let mut grouped: HashMap<i64, Vec<Choice>> = HashMap::new();
        for choice in choices {
            grouped
                .entry(choice.question_id)
                .or_default()
                .push(choice.into_choice());
        }

        Ok(questions
            .into_iter()
            .map(|q| {
                let choices = grouped.remove(&q.id).unwrap_or_default();
                ExamQuestion {
                    question: q.into_question(),
                    choices,
                }
            })
            .collect())
    }

    /// 通过 ID 批量获取题目
    pub async fn get_questions_by_ids_impl(&self, question_ids: &[i64]) -> Result<Vec<Question>> {
        if question_ids.is_empty() {
            return Ok(Vec::new());
        }

        let questions = Questions::find()
            .filter(Column::Id.is_in(question_ids.to_vec()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("查询题目失败: {e}")))?;

        Ok(questions.into_iter().map(|m| m.into_question()).collect())
    }

    /// 创建答卷，答卷本身与所选选项在同一事务中写入
    pub async fn create_submission_impl(
        &self,
        enrollment_id: i64,
        choice_ids: &BTreeSet<i64>,
    ) -> Result<Submission> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("开启事务失败: {e}")))?;

        let submission = SubmissionActiveModel {
            enrollment_id: Set(enrollment_id),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| OnlineCourseError::database_operation(format!("创建答卷失败: {e}")))?;

        for choice_id in choice_ids {
            SubmissionChoiceActiveModel {
                submission_id: Set(submission.id),
                choice_id: Set(*choice_id),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| {
                OnlineCourseError::database_operation(format!("保存答卷选项失败: {e}"))
            })?;
        }

        txn.commit()
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(submission.into_submission())
    }

    /// 通过 ID 获取答卷
    pub async fn get_submission_by_id_impl(&self, submission_id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("查询答卷失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 列出答卷所选的选项
    pub async fn list_submission_choices_impl(&self, submission_id: i64) -> Result<Vec<Choice>> {
        let choice_ids: Vec<i64> = SubmissionChoices::find()
            .select_only()
            .column(SubmissionChoiceColumn::ChoiceId)
            .filter(SubmissionChoiceColumn::SubmissionId.eq(submission_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| {
                OnlineCourseError::database_operation(format!("查询答卷选项失败: {e}"))
            })?;

        if choice_ids.is_empty() {
            return Ok(Vec::new());
        }

        let choices = Choices::find()
            .filter(ChoiceColumn::Id.is_in(choice_ids))
            .order_by_asc(ChoiceColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("查询选项失败: {e}")))?;

        Ok(choices.into_iter().map(|m| m.into_choice()).collect())
    }
}
