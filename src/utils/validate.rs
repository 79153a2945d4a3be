use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.@+-]+$").expect("Invalid username regex"));

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：3 <= x <= 30
    let len = username.chars().count();
    if !(3..=30).contains(&len) {
        return Err("Username length must be between 3 and 30 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username may contain only letters, digits and @/./+/-/_ characters");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        return Err("Password must not be empty");
    }
    Ok(())
}
