pub mod assets;
pub mod auth;
pub mod courses;
pub mod exams;
pub mod paths;

use actix_web::{HttpResponse, http::header, web};

pub use assets::configure_asset_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use exams::configure_exam_routes;

async fn redirect_home() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, paths::HOME))
        .finish()
}

/// 配置站点全部页面路由
///
/// 所有页面位于同一个 `/onlinecourse` scope 下，固定路径的路由先于带参数的路由注册。
pub fn configure_onlinecourse_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(redirect_home)).service(
        web::scope("/onlinecourse")
            .configure(configure_auth_routes)
            .configure(configure_exam_routes)
            .configure(configure_course_routes),
    );
}
