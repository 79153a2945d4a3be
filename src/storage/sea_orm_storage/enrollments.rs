use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::errors::{OnlineCourseError, Result};
use crate::models::enrollments::entities::{Enrollment, EnrollmentMode};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, Set,
    TransactionTrait,
};
use std::collections::HashSet;

impl SeaOrmStorage {
    /// 统计用户在课程下的选课记录数
    pub async fn count_enrollments_impl(&self, user_id: i64, course_id: i64) -> Result<u64> {
        Enrollments::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("统计选课记录失败: {e}")))
    }

    /// 在给定课程中筛选出用户已选的课程
    pub async fn list_enrolled_course_ids_impl(
        &self,
        user_id: i64,
        course_ids: &[i64],
    ) -> Result<HashSet<i64>> {
        if course_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let ids: Vec<i64> = Enrollments::find()
            .select_only()
            .column(Column::CourseId)
            .filter(Column::UserId.eq(user_id))
            .filter(Column::CourseId.is_in(course_ids.to_vec()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(ids.into_iter().collect())
    }

    /// 获取用户在课程下的选课记录
    pub async fn get_enrollment_impl(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 通过 ID 获取选课记录
    pub async fn get_enrollment_by_id_impl(&self, enrollment_id: i64) -> Result<Option<Enrollment>> {
        let result = Enrollments::find_by_id(enrollment_id)
            .one(&self.db)
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 创建选课记录
    ///
    /// 插入与选课人数累加在同一事务中完成。(user_id, course_id) 上有唯一索引，
    /// 并发的重复选课会触发唯一约束冲突，此时回滚并返回 `None`。
    pub async fn create_enrollment_impl(
        &self,
        user_id: i64,
        course_id: i64,
        mode: EnrollmentMode,
    ) -> Result<Option<Enrollment>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            user_id: Set(user_id),
            course_id: Set(course_id),
            mode: Set(mode.to_string()),
            date_enrolled: Set(chrono::Utc::now().timestamp()),
            rating: Set(None),
            ..Default::default()
        };

        let enrollment = match model.insert(&txn).await {
            Ok(m) => m,
            Err(e) if is_unique_violation(&e) => {
                // 事务在 drop 时回滚
                return Ok(None);
            }
            Err(e) => {
                return Err(OnlineCourseError::database_operation(format!(
                    "创建选课记录失败: {e}"
                )));
            }
        };

        Courses::update_many()
            .col_expr(
                CourseColumn::TotalEnrollment,
                Expr::cust("total_enrollment + 1"),
            )
            .filter(CourseColumn::Id.eq(course_id))
            .exec(&txn)
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("更新选课人数失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(enrollment.into_enrollment()))
    }
}
