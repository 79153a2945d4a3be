use actix_web::HttpRequest;
use tera::Context;
use tracing::info;

use super::{AuthService, REGISTRATION_TEMPLATE, establish_session};
use crate::errors::{OnlineCourseError, Result};
use crate::models::users::{
    entities::User,
    requests::{CreateUserRequest, RegistrationForm},
};
use crate::routes::paths;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_password, validate_username};
use crate::views::ViewOutcome;

/// 注册新用户
///
/// 用户名已存在时返回 `DuplicateUser`，不会创建第二个用户。
/// 并发注册同名用户时由唯一索引兜底，存储层同样返回 `DuplicateUser`。
pub async fn register_user(storage: &dyn Storage, form: &RegistrationForm) -> Result<User> {
    let username = form.username.trim();
    validate_username(username).map_err(OnlineCourseError::malformed_input)?;
    validate_password(&form.psw).map_err(OnlineCourseError::malformed_input)?;

    if storage.get_user_by_username(username).await?.is_some() {
        return Err(OnlineCourseError::duplicate_user("User already exists."));
    }

    let password_hash = hash_password(&form.psw)?;
    let user = storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            password_hash,
            first_name: form.firstname.trim().to_string(),
            last_name: form.lastname.trim().to_string(),
        })
        .await?;

    info!("New user registered: {} (ID: {})", user.username, user.id);
    Ok(user)
}

pub async fn handle_register(
    service: &AuthService,
    form: RegistrationForm,
    request: &HttpRequest,
) -> ViewOutcome {
    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return ViewOutcome::failed(e),
    };

    let result = register_user(storage.as_ref(), &form).await;
    match result.and_then(|user| establish_session(&user)) {
        Ok(cookie) => ViewOutcome::redirect(paths::HOME).with_cookie(cookie),
        Err(e @ (OnlineCourseError::DuplicateUser(_) | OnlineCourseError::MalformedInput(_))) => {
            let mut context = Context::new();
            context.insert("message", e.message());
            context.insert("username", &form.username);
            context.insert("firstname", &form.firstname);
            context.insert("lastname", &form.lastname);
            ViewOutcome::render(REGISTRATION_TEMPLATE, context)
        }
        Err(e) => ViewOutcome::failed(e),
    }
}
