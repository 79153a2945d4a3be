use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub pub_date: Option<chrono::DateTime<chrono::Utc>>,
    // 选课人数，由选课操作维护
    pub total_enrollment: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lesson {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub order: i32,
    pub content: String,
}

/// 课程列表项，附带当前访问者的选课状态
#[derive(Debug, Clone, Serialize)]
pub struct CourseListItem {
    #[serde(flatten)]
    pub course: Course,
    pub is_enrolled: bool,
}
