use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::lessons::{
    ActiveModel as LessonActiveModel, Column as LessonColumn, Entity as Lessons,
};
use crate::errors::{OnlineCourseError, Result};
use crate::models::courses::{
    entities::{Course, Lesson},
    requests::{CreateCourseRequest, CreateLessonRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            image_url: Set(req.image_url),
            pub_date: Set(req.pub_date.map(|d| d.timestamp())),
            total_enrollment: Set(0),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 热门课程列表
    pub async fn list_top_courses_impl(&self, limit: u64) -> Result<Vec<Course>> {
        let courses = Courses::find()
            .order_by_desc(Column::TotalEnrollment)
            .order_by_asc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| {
                OnlineCourseError::database_operation(format!("查询课程列表失败: {e}"))
            })?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    /// 统计课程数量
    pub async fn count_courses_impl(&self) -> Result<u64> {
        Courses::find()
            .count(&self.db)
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("统计课程数量失败: {e}")))
    }

    /// 创建课时
    pub async fn create_lesson_impl(&self, req: CreateLessonRequest) -> Result<Lesson> {
        let model = LessonActiveModel {
            course_id: Set(req.course_id),
            title: Set(req.title),
            lesson_order: Set(req.order),
            content: Set(req.content),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("创建课时失败: {e}")))?;

        Ok(result.into_lesson())
    }

    /// 列出课程的课时，按顺序号排列
    pub async fn list_lessons_by_course_impl(&self, course_id: i64) -> Result<Vec<Lesson>> {
        let lessons = Lessons::find()
            .filter(LessonColumn::CourseId.eq(course_id))
            .order_by_asc(LessonColumn::LessonOrder)
            .order_by_asc(LessonColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("查询课时失败: {e}")))?;

        Ok(lessons.into_iter().map(|m| m.into_lesson()).collect())
    }
}
