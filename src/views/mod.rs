//! 页面渲染
//!
//! 模板在编译时通过 rust-embed 嵌入，启动时一次性注册到 Tera 中，
//! 因此模板之间可以使用 `{% extends "base.html" %}` 互相引用。

pub mod outcome;

pub use outcome::ViewOutcome;

use actix_web::{HttpRequest, HttpResponse, http::header::CONTENT_TYPE, web};
use rust_embed::Embed;
use tera::{Context, Tera};
use tracing::error;

use crate::config::AppConfig;
use crate::errors::{OnlineCourseError, Result};
use crate::middlewares::SessionUser;

#[derive(Embed)]
#[folder = "templates/"]
struct TemplateAssets;

pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self> {
        let mut templates = Vec::new();
        for name in TemplateAssets::iter() {
            let file = TemplateAssets::get(&name).ok_or_else(|| {
                OnlineCourseError::template(format!("Embedded template missing: {name}"))
            })?;
            let content = String::from_utf8(file.data.into_owned()).map_err(|e| {
                OnlineCourseError::template(format!("Template {name} is not valid UTF-8: {e}"))
            })?;
            templates.push((name.to_string(), content));
        }

        let mut tera = Tera::default();
        tera.add_raw_templates(templates)?;

        Ok(Self { tera })
    }

    pub fn render(&self, template: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template, context)?)
    }

    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }
}

/// 所有页面共享的上下文变量
pub(crate) fn base_context(req: &HttpRequest, context: &mut Context) {
    context.insert("system_name", &AppConfig::get().app.system_name);
    context.insert("user", &SessionUser::current_user(req));
}

/// 渲染错误页面，模板不可用时退回纯文本
pub fn render_error_page(req: &HttpRequest, err: &OnlineCourseError) -> HttpResponse {
    let status = err.status_code();
    if status.is_server_error() {
        error!("{} {} failed: {}", req.method(), req.path(), err.format_simple());
    }

    // 服务端错误不向页面暴露细节
    let message = if status.is_server_error() {
        "Something went wrong on our side. Please try again later.".to_string()
    } else {
        err.message().to_string()
    };

    let mut context = Context::new();
    base_context(req, &mut context);
    context.insert("status", &status.as_u16());
    context.insert("reason", status.canonical_reason().unwrap_or("Error"));
    context.insert("message", &message);
    context.insert("error_code", err.code());

    let rendered = req
        .app_data::<web::Data<TemplateRenderer>>()
        .ok_or_else(|| OnlineCourseError::template("Template renderer not found in app data"))
        .and_then(|renderer| renderer.render("error.html", &context));

    match rendered {
        Ok(body) => HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, "text/html; charset=utf-8"))
            .body(body),
        Err(render_err) => {
            error!("Failed to render error page: {}", render_err);
            HttpResponse::build(status)
                .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
                .body(format!("{} {}", status.as_u16(), message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_pages_are_registered() {
        let renderer = TemplateRenderer::new().unwrap();
        let names = renderer.template_names();
        for page in [
            "base.html",
            "course_detail.html",
            "course_list.html",
            "error.html",
            "exam_result.html",
            "user_login.html",
            "user_registration.html",
        ] {
            assert!(names.contains(&page), "missing template {page}");
        }
    }

    #[test]
    fn test_templates_escape_html() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert("system_name", "Online Course");
        context.insert("user", &Option::<crate::models::users::entities::User>::None);
        context.insert("status", &404u16);
        context.insert("reason", "Not Found");
        context.insert("message", "<script>alert(1)</script>");
        context.insert("error_code", "E003");

        let html = renderer.render("error.html", &context).unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert(1)</script>"));
    }
}
