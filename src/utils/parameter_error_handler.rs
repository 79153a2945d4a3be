use actix_web::{HttpRequest, error::InternalError, error::UrlencodedError};

use crate::errors::OnlineCourseError;
use crate::views::render_error_page;

/// 表单解析失败时返回 400 页面
pub fn form_error_handler(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Rejected form body for {}: {}", req.path(), err);
    let err = OnlineCourseError::malformed_input(format!("Invalid form data: {err}"));
    let response = render_error_page(req, &err);
    InternalError::from_response(err, response).into()
}
