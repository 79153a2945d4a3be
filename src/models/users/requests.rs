use serde::Deserialize;

// 注册表单
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationForm {
    pub username: String,
    pub psw: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
}

// 登录表单
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub psw: String,
}

// 用户创建请求（用于存储层，密码已哈希）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}
