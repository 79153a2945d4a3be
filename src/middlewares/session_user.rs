/*!
 * 会话用户中间件
 *
 * 每个请求都会尝试从会话 Cookie 中解析当前用户，解析成功时把 `User` 放入请求扩展。
 * 此中间件从不拒绝请求：缺失、过期、被篡改的令牌，注销后被吊销的令牌，
 * 以及不存在的用户，都按匿名访问处理。
 *
 * 令牌中的 `ver` 必须等于用户当前的会话版本号，注销会递增版本号。
 *
 * ```rust,ignore
 * App::new()
 *     .wrap(SessionUser)
 *     .configure(routes::configure_onlinecourse_routes)
 * ```
 *
 * 在处理程序中通过 `SessionUser::current_user(&req)` 读取当前用户。
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::jwt::SessionToken;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    dev::{ServiceRequest, ServiceResponse},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::debug;

#[derive(Clone)]
pub struct SessionUser;

/// 会话用户在缓存中的键
pub fn session_user_cache_key(user_id: i64) -> String {
    format!("session_user:{user_id}")
}

// 解析会话令牌对应的用户
async fn resolve_session_user(req: &ServiceRequest) -> Result<User, String> {
    let token = SessionToken::token_from_cookie(req.cookie(&AppConfig::get().session.cookie_name))
        .ok_or_else(|| "No session cookie".to_string())?;

    let claims = SessionToken::verify(&token).map_err(|err| {
        debug!("Session token validation failed: {}", err);
        "Invalid session token".to_string()
    })?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| "Invalid user ID in session token".to_string())?;

    let mut user = load_session_user(req, user_id, true).await?;

    // 缓存中的用户可能早于最近一次注销，回源确认
    if user.session_version != claims.ver {
        user = load_session_user(req, user_id, false).await?;
    }

    if user.session_version != claims.ver {
        return Err("Session has been revoked".to_string());
    }

    Ok(user)
}

// 先查缓存，未命中再查存储并写回缓存
async fn load_session_user(
    req: &ServiceRequest,
    user_id: i64,
    use_cache: bool,
) -> Result<User, String> {
    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone());
    let cache_key = session_user_cache_key(user_id);

    if use_cache
        && let Some(cache) = &cache
        && let CacheResult::Found(user) = cache.get_json::<User>(&cache_key).await
    {
        return Ok(user);
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .ok_or_else(|| "Storage not found in app data".to_string())?
        .get_ref()
        .clone();

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| format!("Failed to retrieve user from storage: {e}"))?
        .ok_or_else(|| "User not found".to_string())?;

    if let Some(cache) = &cache {
        cache
            .insert_json(cache_key, &user, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for SessionUser
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionUserMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionUserMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionUserMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionUserMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            match resolve_session_user(&req).await {
                Ok(user) => {
                    debug!("Session resolved for user ID: {}", user.id);
                    req.extensions_mut().insert(user);
                }
                Err(reason) => {
                    debug!("Anonymous request to {}: {}", req.path(), reason);
                }
            }
            srv.call(req).await
        })
    }
}

impl SessionUser {
    /// 从请求扩展中取出当前用户，匿名访问时为 None
    pub fn current_user(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }
}
