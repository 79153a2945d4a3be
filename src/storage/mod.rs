use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::models::{
    courses::{
        entities::{Course, Lesson},
        requests::{CreateCourseRequest, CreateLessonRequest},
    },
    enrollments::entities::{Enrollment, EnrollmentMode},
    exams::{
        entities::{Choice, ExamQuestion, Question, Submission},
        requests::CreateQuestionRequest,
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户，用户名冲突时返回 DuplicateUser
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 注销时递增会话版本号，版本号已变化时不做修改并返回 false
    async fn bump_session_version(&self, id: i64, expected: i32) -> Result<bool>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 按选课人数降序列出课程，人数相同按 ID 升序
    async fn list_top_courses(&self, limit: u64) -> Result<Vec<Course>>;
    // 统计课程数量
    async fn count_courses(&self) -> Result<u64>;
    // 创建课时
    async fn create_lesson(&self, lesson: CreateLessonRequest) -> Result<Lesson>;
    // 列出课程的课时
    async fn list_lessons_by_course(&self, course_id: i64) -> Result<Vec<Lesson>>;

    /// 选课管理方法
    // 统计用户在课程下的选课记录数
    async fn count_enrollments(&self, user_id: i64, course_id: i64) -> Result<u64>;
    // 在给定课程中筛选出用户已选的课程
    async fn list_enrolled_course_ids(
        &self,
        user_id: i64,
        course_ids: &[i64],
    ) -> Result<HashSet<i64>>;
    // 获取用户在课程下的选课记录
    async fn get_enrollment(&self, user_id: i64, course_id: i64) -> Result<Option<Enrollment>>;
    // 通过ID获取选课记录
    async fn get_enrollment_by_id(&self, enrollment_id: i64) -> Result<Option<Enrollment>>;
    // 创建选课记录并累加课程选课人数；并发重复选课时返回 None
    async fn create_enrollment(
        &self,
        user_id: i64,
        course_id: i64,
        mode: EnrollmentMode,
    ) -> Result<Option<Enrollment>>;

    /// 考试管理方法
    // 创建题目及其选项
    async fn create_question(&self, question: CreateQuestionRequest) -> Result<ExamQuestion>;
    // 列出课程的全部题目及选项
    async fn list_exam_questions(&self, course_id: i64) -> Result<Vec<ExamQuestion>>;
    // 通过ID批量获取题目
    async fn get_questions_by_ids(&self, question_ids: &[i64]) -> Result<Vec<Question>>;
    // 创建答卷并关联所选选项
    async fn create_submission(
        &self,
        enrollment_id: i64,
        choice_ids: &BTreeSet<i64>,
    ) -> Result<Submission>;
    // 通过ID获取答卷
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 列出答卷所选的选项
    async fn list_submission_choices(&self, submission_id: i64) -> Result<Vec<Choice>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
