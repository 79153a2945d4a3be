pub mod login;
pub mod logout;
pub mod register;

use actix_web::{HttpRequest, cookie::Cookie};
use std::sync::Arc;
use tera::Context;

use crate::errors::{OnlineCourseError, Result};
use crate::models::users::{
    entities::User,
    requests::{LoginForm, RegistrationForm},
};
use crate::storage::Storage;
use crate::utils::jwt::SessionToken;
use crate::views::ViewOutcome;

pub use login::authenticate;
pub use logout::revoke_session;
pub use register::register_user;

pub const REGISTRATION_TEMPLATE: &str = "user_registration.html";
pub const LOGIN_TEMPLATE: &str = "user_login.html";

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 注册表单
    pub fn registration_form(&self) -> ViewOutcome {
        ViewOutcome::render(REGISTRATION_TEMPLATE, Context::new())
    }

    // 用户注册
    pub async fn register(&self, form: RegistrationForm, request: &HttpRequest) -> ViewOutcome {
        register::handle_register(self, form, request).await
    }

    // 登录表单
    pub fn login_form(&self) -> ViewOutcome {
        ViewOutcome::render(LOGIN_TEMPLATE, Context::new())
    }

    // 登录验证
    pub async fn login(&self, form: LoginForm, request: &HttpRequest) -> ViewOutcome {
        login::handle_login(self, form, request).await
    }

    // 注销
    pub async fn logout(&self, request: &HttpRequest) -> ViewOutcome {
        logout::handle_logout(self, request).await
    }
}

/// 为用户签发会话令牌并生成 Cookie
pub(crate) fn establish_session(user: &User) -> Result<Cookie<'static>> {
    let token = SessionToken::generate(user.id, user.session_version)
        .map_err(|e| OnlineCourseError::session(format!("Failed to issue session token: {e}")))?;
    Ok(SessionToken::create_session_cookie(&token))
}
