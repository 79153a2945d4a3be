use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

// 会话令牌 Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // 用户 ID
    pub exp: usize,  // 过期时间
    pub iat: usize,  // 签发时间
    #[serde(default)]
    pub ver: i32, // 签发时用户的会话版本号
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse::<i64>().ok()
    }
}

/// 会话令牌，以签名 JWT 的形式保存在 HttpOnly Cookie 中
pub struct SessionToken;

impl SessionToken {
    fn get_secret() -> String {
        AppConfig::get().session.secret.clone()
    }

    // 生成会话令牌
    pub fn generate(
        user_id: i64,
        session_version: i32,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::generate_with_expiry(
            user_id,
            session_version,
            chrono::Duration::hours(config.session.ttl_hours),
        )
    }

    pub fn generate_with_expiry(
        user_id: i64,
        session_version: i32,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
            ver: session_version,
        };

        let secret = Self::get_secret();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
    }

    // 验证会话令牌，签名错误或已过期都会失败
    pub fn verify(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let secret = Self::get_secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }

    /// 创建会话 Cookie
    pub fn create_session_cookie(token: &str) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(config.session.cookie_name.clone(), token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::hours(
                config.session.ttl_hours,
            ))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 创建空的会话 Cookie（用于注销）
    pub fn create_empty_session_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(config.session.cookie_name.clone(), "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 从请求中提取会话令牌
    pub fn extract_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        Self::token_from_cookie(req.cookie(&AppConfig::get().session.cookie_name))
    }

    pub fn token_from_cookie(cookie: Option<Cookie<'static>>) -> Option<String> {
        cookie
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_verify() {
        let token = SessionToken::generate(42, 5).unwrap();
        let claims = SessionToken::verify(&token).unwrap();
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.ver, 5);
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let token = SessionToken::generate(42, 0).unwrap();
        let mut tampered = token.clone();
        tampered.push('x');
        assert!(SessionToken::verify(&tampered).is_err());
        assert!(SessionToken::verify("not-a-token").is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = SessionToken::generate_with_expiry(7, 0, chrono::Duration::hours(-2)).unwrap();
        assert!(SessionToken::verify(&token).is_err());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = SessionToken::create_session_cookie("abc");
        assert_eq!(cookie.name(), "session");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));

        let empty = SessionToken::create_empty_session_cookie();
        assert_eq!(empty.value(), "");
        assert_eq!(
            empty.max_age(),
            Some(actix_web::cookie::time::Duration::seconds(0))
        );
    }
}
