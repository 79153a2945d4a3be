//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod courses;
mod enrollments;
mod exams;
mod users;

use crate::config::AppConfig;
use crate::errors::{OnlineCourseError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置中的数据库 URL 创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::new_with_url(&config.database.url).await
    }

    /// 使用指定的数据库 URL 创建存储实例并执行迁移
    pub async fn new_with_url(url: &str) -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| OnlineCourseError::database_operation(format!("Migration failed: {e}")))?;

        info!("SeaORM storage initialized, database: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| {
                OnlineCourseError::database_config(format!("Invalid SQLite URL: {e}"))
            })?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| {
                OnlineCourseError::database_connection(format!("SQLite connection failed: {e}"))
            })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt).await.map_err(|e| {
            OnlineCourseError::database_connection(format!("Unable to connect to database: {e}"))
        })
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") || url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(OnlineCourseError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql://, or a .db/.sqlite file path"
            )))
        }
    }
}

/// 是否为唯一约束冲突
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;
use std::collections::{BTreeSet, HashSet};

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn bump_session_version(&self, id: i64, expected: i32) -> Result<bool> {
        self.bump_session_version_impl(id, expected).await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn list_top_courses(&self, limit: u64) -> Result<Vec<Course>> {
        self.list_top_courses_impl(limit).await
    }

    async fn count_courses(&self) -> Result<u64> {
        self.count_courses_impl().await
    }

    async fn create_lesson(&self, lesson: CreateLessonRequest) -> Result<Lesson> {
        self.create_lesson_impl(lesson).await
    }

    async fn list_lessons_by_course(&self, course_id: i64) -> Result<Vec<Lesson>> {
        self.list_lessons_by_course_impl(course_id).await
    }

    // 选课模块
    async fn count_enrollments(&self, user_id: i64, course_id: i64) -> Result<u64> {
        self.count_enrollments_impl(user_id, course_id).await
    }

    async fn list_enrolled_course_ids(
        &self,
        user_id: i64,
        course_ids: &[i64],
    ) -> Result<HashSet<i64>> {
        self.list_enrolled_course_ids_impl(user_id, course_ids).await
    }

    async fn get_enrollment(&self, user_id: i64, course_id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(user_id, course_id).await
    }

    async fn get_enrollment_by_id(&self, enrollment_id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_by_id_impl(enrollment_id).await
    }

    async fn create_enrollment(
        &self,
        user_id: i64,
        course_id: i64,
        mode: EnrollmentMode,
    ) -> Result<Option<Enrollment>> {
        self.create_enrollment_impl(user_id, course_id, mode).await
    }

    // 考试模块
    async fn create_question(&self, question: CreateQuestionRequest) -> Result<ExamQuestion> {
        self.create_question_impl(question).await
    }

    async fn list_exam_questions(&self, course_id: i64) -> Result<Vec<ExamQuestion>> {
        self.list_exam_questions_impl(course_id).await
    }

    async fn get_questions_by_ids(&self, question_ids: &[i64]) -> Result<Vec<Question>> {
        self.get_questions_by_ids_impl(question_ids).await
    }

    async fn create_submission(
        &self,
        enrollment_id: i64,
        choice_ids: &BTreeSet<i64>,
    ) -> Result<Submission> {
        self.create_submission_impl(enrollment_id, choice_ids).await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn list_submission_choices(&self, submission_id: i64) -> Result<Vec<Choice>> {
        self.list_submission_choices_impl(submission_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("onlinecourse.db").unwrap(),
            "sqlite://onlinecourse.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://localhost/course").unwrap(),
            "postgres://localhost/course"
        );
        assert!(SeaOrmStorage::build_database_url("redis://localhost").is_err());
    }
}
