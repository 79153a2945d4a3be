pub mod result;
pub mod scoring;
pub mod submit;

use actix_web::HttpRequest;
use std::sync::Arc;

use crate::errors::Result;
use crate::middlewares::SessionUser;
use crate::storage::Storage;
use crate::views::ViewOutcome;

pub use result::get_result;
pub use submit::submit_exam;

pub struct ExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 提交答卷
    pub async fn submit(
        &self,
        request: &HttpRequest,
        course_id: i64,
        fields: Vec<(String, String)>,
    ) -> ViewOutcome {
        let viewer = SessionUser::current_user(request);
        submit::handle_submit(self, viewer.as_ref(), course_id, fields, request).await
    }

    // 查看考试结果
    pub async fn show_result(
        &self,
        request: &HttpRequest,
        course_id: i64,
        submission_id: i64,
    ) -> ViewOutcome {
        result::handle_show_result(self, course_id, submission_id, request).await
    }
}
