pub mod enroll;

use actix_web::HttpRequest;
use std::sync::Arc;

use crate::errors::Result;
use crate::middlewares::SessionUser;
use crate::storage::Storage;
use crate::views::ViewOutcome;

pub use enroll::{enroll, is_enrolled};

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 选课
    pub async fn enroll(&self, request: &HttpRequest, course_id: i64) -> ViewOutcome {
        let viewer = SessionUser::current_user(request);
        enroll::handle_enroll(self, viewer.as_ref(), course_id, request).await
    }
}
