use serde::Deserialize;

// 课程创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseRequest {
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub pub_date: Option<chrono::DateTime<chrono::Utc>>,
}

// 课时创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLessonRequest {
    pub course_id: i64,
    pub title: String,
    pub order: i32,
    pub content: String,
}
