use serde::{Deserialize, Serialize};

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing, default)] // 不序列化到页面和缓存中
    pub password_hash: String,
    pub session_version: i32, // 注销后递增，旧令牌随之失效
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            session_version: 3,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));

        let restored: User = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.username, "alice");
        assert_eq!(restored.session_version, 3);
        assert!(restored.password_hash.is_empty());
    }
}
