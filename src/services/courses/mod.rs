pub mod detail;
pub mod list;

use actix_web::HttpRequest;
use std::sync::Arc;

use crate::errors::Result;
use crate::middlewares::SessionUser;
use crate::storage::Storage;
use crate::views::ViewOutcome;

pub use detail::course_detail;
pub use list::{TOP_COURSES_LIMIT, list_top_courses};

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 热门课程列表
    pub async fn list_courses(&self, request: &HttpRequest) -> ViewOutcome {
        let viewer = SessionUser::current_user(request);
        list::handle_list_courses(self, viewer.as_ref(), request).await
    }

    // 课程详情
    pub async fn get_course(&self, request: &HttpRequest, course_id: i64) -> ViewOutcome {
        let viewer = SessionUser::current_user(request);
        detail::handle_course_detail(self, viewer.as_ref(), course_id, request).await
    }
}
