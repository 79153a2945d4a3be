use actix_web::{HttpRequest, web};
use once_cell::sync::Lazy;

use crate::models::users::requests::{LoginForm, RegistrationForm};
use crate::services::AuthService;
use crate::views::ViewOutcome;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn registration_form() -> ViewOutcome {
    AUTH_SERVICE.registration_form()
}

pub async fn register(req: HttpRequest, form: web::Form<RegistrationForm>) -> ViewOutcome {
    AUTH_SERVICE.register(form.into_inner(), &req).await
}

pub async fn login_form() -> ViewOutcome {
    AUTH_SERVICE.login_form()
}

pub async fn login(req: HttpRequest, form: web::Form<LoginForm>) -> ViewOutcome {
    AUTH_SERVICE.login(form.into_inner(), &req).await
}

pub async fn logout(req: HttpRequest) -> ViewOutcome {
    AUTH_SERVICE.logout(&req).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/registration")
            .route(web::get().to(registration_form))
            .route(web::post().to(register)),
    )
    .service(
        web::resource("/login")
            .route(web::get().to(login_form))
            .route(web::post().to(login)),
    )
    .service(
        web::resource("/logout")
            .route(web::get().to(logout))
            .route(web::post().to(logout)),
    );
}
