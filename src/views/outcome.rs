//! 处理程序的统一返回值
//!
//! 服务层只决定“渲染哪个页面”“跳转到哪里”或“失败在哪里”，
//! 由 `Responder` 实现统一生成 HTTP 响应。

use actix_web::{
    HttpRequest, HttpResponse, Responder,
    body::BoxBody,
    cookie::Cookie,
    http::{StatusCode, header},
    web,
};
use tera::Context;

use super::{TemplateRenderer, base_context, render_error_page};
use crate::errors::OnlineCourseError;

#[derive(Debug)]
pub enum ViewOutcome {
    Rendered {
        template: &'static str,
        context: Context,
        status: StatusCode,
    },
    Redirected {
        location: String,
        cookies: Vec<Cookie<'static>>,
    },
    Failed(OnlineCourseError),
}

impl ViewOutcome {
    pub fn render(template: &'static str, context: Context) -> Self {
        ViewOutcome::Rendered {
            template,
            context,
            status: StatusCode::OK,
        }
    }

    pub fn redirect<L: Into<String>>(location: L) -> Self {
        ViewOutcome::Redirected {
            location: location.into(),
            cookies: Vec::new(),
        }
    }

    pub fn failed(err: OnlineCourseError) -> Self {
        ViewOutcome::Failed(err)
    }

    /// 为跳转响应附加 Cookie，其它分支忽略
    pub fn with_cookie(mut self, cookie: Cookie<'static>) -> Self {
        if let ViewOutcome::Redirected { cookies, .. } = &mut self {
            cookies.push(cookie);
        }
        self
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ViewOutcome::Rendered { status, .. } => *status,
            ViewOutcome::Redirected { .. } => StatusCode::SEE_OTHER,
            ViewOutcome::Failed(err) => err.status_code(),
        }
    }
}

impl From<OnlineCourseError> for ViewOutcome {
    fn from(err: OnlineCourseError) -> Self {
        ViewOutcome::Failed(err)
    }
}

impl Responder for ViewOutcome {
    type Body = BoxBody;

    fn respond_to(self, req: &HttpRequest) -> HttpResponse<Self::Body> {
        match self {
            ViewOutcome::Rendered {
                template,
                mut context,
                status,
            } => {
                base_context(req, &mut context);

                let rendered = req
                    .app_data::<web::Data<TemplateRenderer>>()
                    .ok_or_else(|| {
                        OnlineCourseError::template("Template renderer not found in app data")
                    })
                    .and_then(|renderer| renderer.render(template, &context));

                match rendered {
                    Ok(body) => HttpResponse::build(status)
                        .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
                        .body(body),
                    Err(err) => render_error_page(req, &err),
                }
            }
            ViewOutcome::Redirected { location, cookies } => {
                let mut response = HttpResponse::SeeOther();
                response.insert_header((header::LOCATION, location));
                for cookie in cookies {
                    response.cookie(cookie);
                }
                response.finish()
            }
            ViewOutcome::Failed(err) => render_error_page(req, &err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_of_each_outcome() {
        assert_eq!(
            ViewOutcome::render("course_list.html", Context::new()).status(),
            StatusCode::OK
        );
        assert_eq!(
            ViewOutcome::redirect("/onlinecourse/").status(),
            StatusCode::SEE_OTHER
        );
        assert_eq!(
            ViewOutcome::failed(OnlineCourseError::not_enrolled("x")).status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_cookies_only_attach_to_redirects() {
        let outcome = ViewOutcome::redirect("/onlinecourse/").with_cookie(Cookie::new("a", "b"));
        match outcome {
            ViewOutcome::Redirected { cookies, .. } => assert_eq!(cookies.len(), 1),
            other => panic!("unexpected outcome: {other:?}"),
        }

        let outcome =
            ViewOutcome::render("user_login.html", Context::new()).with_cookie(Cookie::new("a", "b"));
        assert!(matches!(outcome, ViewOutcome::Rendered { .. }));
    }
}
