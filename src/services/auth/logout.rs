use actix_web::{HttpRequest, web};
use std::sync::Arc;
use tracing::{debug, error};

use super::AuthService;
use crate::cache::ObjectCache;
use crate::errors::Result;
use crate::middlewares::session_user::session_user_cache_key;
use crate::routes::paths;
use crate::storage::Storage;
use crate::utils::jwt::SessionToken;
use crate::views::ViewOutcome;

/// 使令牌所属用户的会话失效
///
/// 递增用户的会话版本号，此前签发的令牌（包括当前令牌）都不再被接受。
/// 无效、过期或已被吊销的令牌直接忽略，返回是否真正吊销了会话。
pub async fn revoke_session(
    storage: &dyn Storage,
    cache: Option<&dyn ObjectCache>,
    token: &str,
) -> Result<bool> {
    let Some((user_id, version)) = SessionToken::verify(token)
        .ok()
        .and_then(|claims| claims.user_id().map(|id| (id, claims.ver)))
    else {
        debug!("Logout with an unusable session token, nothing to revoke");
        return Ok(false);
    };

    if !storage.bump_session_version(user_id, version).await? {
        debug!("Session of user ID {} was already revoked", user_id);
        return Ok(false);
    }

    if let Some(cache) = cache {
        cache.remove(&session_user_cache_key(user_id)).await;
    }

    debug!("Session revoked for user ID: {}", user_id);
    Ok(true)
}

/// 注销，无论当前是否登录都清除会话 Cookie
pub async fn handle_logout(service: &AuthService, request: &HttpRequest) -> ViewOutcome {
    if let Some(token) = SessionToken::extract_from_cookie(request) {
        let cache = request
            .app_data::<web::Data<Arc<dyn ObjectCache>>>()
            .map(|c| c.get_ref().clone());

        let revoked = match service.get_storage(request) {
            Ok(storage) => revoke_session(storage.as_ref(), cache.as_deref(), &token).await,
            Err(e) => Err(e),
        };
        if let Err(e) = revoked {
            error!("Failed to revoke session: {}", e.format_simple());
        }
    }

    ViewOutcome::redirect(paths::HOME).with_cookie(SessionToken::create_empty_session_cookie())
}
