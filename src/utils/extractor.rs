//! 安全的路径参数提取器
//!
//! 路径中的 ID 无法解析为整数时直接返回 404 页面。

use actix_web::{FromRequest, HttpRequest, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::errors::OnlineCourseError;
use crate::views::render_error_page;

macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                ready(parse_path_id(req, $param).map($name))
            }
        }
    };
}

define_safe_i64_extractor!(SafeCourseId, "course_id");
define_safe_i64_extractor!(SafeSubmissionId, "submission_id");

fn parse_path_id(req: &HttpRequest, param: &str) -> Result<i64, actix_web::Error> {
    req.match_info()
        .get(param)
        .and_then(|raw| raw.parse::<i64>().ok())
        .ok_or_else(|| {
            let err = OnlineCourseError::not_found("Page not found");
            let response = render_error_page(req, &err);
            InternalError::from_response(err, response).into()
        })
}
