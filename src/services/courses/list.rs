use actix_web::HttpRequest;
use std::collections::HashSet;
use tera::Context;

use super::CourseService;
use crate::errors::Result;
use crate::models::courses::entities::CourseListItem;
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::views::ViewOutcome;

pub const TOP_COURSES_LIMIT: u64 = 10;

/// 按选课人数降序列出最多 10 门课程，并标注访问者是否已选
///
/// 匿名访问者不会触发选课记录查询。
pub async fn list_top_courses(
    storage: &dyn Storage,
    viewer: Option<&User>,
) -> Result<Vec<CourseListItem>> {
    let courses = storage.list_top_courses(TOP_COURSES_LIMIT).await?;

    let enrolled = match viewer {
        Some(user) if !courses.is_empty() => {
            let ids: Vec<i64> = courses.iter().map(|c| c.id).collect();
            storage.list_enrolled_course_ids(user.id, &ids).await?
        }
        _ => HashSet::new(),
    };

    Ok(courses
        .into_iter()
        .map(|course| CourseListItem {
            is_enrolled: enrolled.contains(&course.id),
            course,
        })
        .collect())
}

pub async fn handle_list_courses(
    service: &CourseService,
    viewer: Option<&User>,
    request: &HttpRequest,
) -> ViewOutcome {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return ViewOutcome::failed(e),
    };

    match list_top_courses(storage.as_ref(), viewer).await {
        Ok(items) => {
            let mut context = Context::new();
            context.insert("course_list", &items);
            ViewOutcome::render("course_list.html", context)
        }
        Err(e) => ViewOutcome::failed(e),
    }
}
