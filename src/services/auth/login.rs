use actix_web::HttpRequest;
use tera::Context;
use tracing::{info, warn};

use super::{AuthService, LOGIN_TEMPLATE, establish_session};
use crate::errors::{OnlineCourseError, Result};
use crate::models::users::{entities::User, requests::LoginForm};
use crate::routes::paths;
use crate::storage::Storage;
use crate::utils::password::verify_password;
use crate::views::ViewOutcome;

const INVALID_CREDENTIALS: &str = "Invalid username or password.";

/// 校验用户名和密码，成功时更新最后登录时间
///
/// 用户不存在和密码错误都返回同一个 `InvalidCredentials`。
pub async fn authenticate(storage: &dyn Storage, username: &str, password: &str) -> Result<User> {
    let mut user = storage
        .get_user_by_username(username.trim())
        .await?
        .ok_or_else(|| OnlineCourseError::invalid_credentials(INVALID_CREDENTIALS))?;

    if !verify_password(password, &user.password_hash) {
        return Err(OnlineCourseError::invalid_credentials(INVALID_CREDENTIALS));
    }

    match storage.update_last_login(user.id).await {
        Ok(_) => user.last_login = Some(chrono::Utc::now()),
        Err(e) => warn!("Failed to update last login for user {}: {}", user.id, e),
    }

    Ok(user)
}

pub async fn handle_login(
    service: &AuthService,
    form: LoginForm,
    request: &HttpRequest,
) -> ViewOutcome {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return ViewOutcome::failed(e),
    };

    let result = authenticate(storage.as_ref(), &form.username, &form.psw).await;
    match result.and_then(|user| {
        info!("User {} logged in successfully", user.username);
        establish_session(&user)
    }) {
        Ok(cookie) => ViewOutcome::redirect(paths::HOME).with_cookie(cookie),
        Err(e @ OnlineCourseError::InvalidCredentials(_)) => {
            info!("Failed login attempt for username: {}", form.username);
            let mut context = Context::new();
            context.insert("message", e.message());
            context.insert("username", &form.username);
            ViewOutcome::render(LOGIN_TEMPLATE, context)
        }
        Err(e) => ViewOutcome::failed(e),
    }
}
