//! 静态资源路由
//!
//! 样式表等资源在编译时通过 rust-embed 嵌入二进制。

use actix_web::{HttpRequest, HttpResponse, http::header, web};
use rust_embed::Embed;
use std::path::Path;

use crate::errors::OnlineCourseError;
use crate::views::render_error_page;

/// 编译时从 static/ 目录读取文件
#[derive(Embed)]
#[folder = "static/"]
struct StaticAssets;

/// 获取文件的 MIME 类型
fn get_mime_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    match ext {
        "html" => "text/html; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "webp" => "image/webp",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// 检查是否应该设置缓存
fn should_cache(path: &str) -> bool {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    matches!(
        ext,
        "js" | "css" | "woff" | "woff2" | "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" | "ico"
    )
}

/// 静态资源请求处理
pub async fn serve_asset(req: HttpRequest) -> HttpResponse {
    let path = req.match_info().query("tail").trim_start_matches('/');

    match StaticAssets::get(path) {
        Some(file) if !path.is_empty() => {
            let mut response = HttpResponse::Ok();
            response.content_type(get_mime_type(path));

            if should_cache(path) {
                response.insert_header((header::CACHE_CONTROL, "public, max-age=86400"));
            } else {
                response.insert_header((header::CACHE_CONTROL, "no-cache"));
            }

            response.body(file.data.into_owned())
        }
        _ => render_error_page(&req, &OnlineCourseError::not_found("Asset not found")),
    }
}

/// 配置静态资源路由
pub fn configure_asset_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/static/{tail:.*}", web::get().to(serve_asset));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_mime_type() {
        assert_eq!(get_mime_type("style.css"), "text/css; charset=utf-8");
        assert_eq!(get_mime_type("logo.png"), "image/png");
        assert_eq!(get_mime_type("unknown.xyz"), "application/octet-stream");
    }

    #[test]
    fn test_should_cache() {
        assert!(should_cache("style.css"));
        assert!(should_cache("logo.png"));
        assert!(!should_cache("robots.txt"));
    }

    #[test]
    fn test_stylesheet_is_embedded() {
        assert!(StaticAssets::get("style.css").is_some());
    }
}
