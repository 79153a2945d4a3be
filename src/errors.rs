//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称以及对应的 HTTP 状态码。

use actix_web::http::StatusCode;
use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_online_course_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum OnlineCourseError {
            $($variant(String),)*
        }

        impl OnlineCourseError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(OnlineCourseError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(OnlineCourseError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(OnlineCourseError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl OnlineCourseError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        OnlineCourseError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_online_course_errors! {
    // 业务错误
    DuplicateUser("E001", "Duplicate User"),
    InvalidCredentials("E002", "Invalid Credentials"),
    NotFound("E003", "Resource Not Found"),
    NotEnrolled("E004", "Not Enrolled"),
    MalformedInput("E005", "Malformed Input"),
    // 基础设施错误
    CacheConnection("E101", "Cache Connection Error"),
    CachePluginNotFound("E102", "Cache Plugin Not Found"),
    DatabaseConfig("E103", "Database Configuration Error"),
    DatabaseConnection("E104", "Database Connection Error"),
    DatabaseOperation("E105", "Database Operation Error"),
    Template("E108", "Template Error"),
    PasswordHash("E109", "Password Hash Error"),
    Session("E110", "Session Error"),
}

impl OnlineCourseError {
    /// 错误对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            OnlineCourseError::NotFound(_) => StatusCode::NOT_FOUND,
            OnlineCourseError::NotEnrolled(_) => StatusCode::FORBIDDEN,
            OnlineCourseError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            OnlineCourseError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            OnlineCourseError::DuplicateUser(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for OnlineCourseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for OnlineCourseError {}

// 为常见的错误类型实现 From trait
impl From<tera::Error> for OnlineCourseError {
    fn from(err: tera::Error) -> Self {
        OnlineCourseError::Template(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OnlineCourseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(OnlineCourseError::duplicate_user("test").code(), "E001");
        assert_eq!(OnlineCourseError::not_found("test").code(), "E003");
        assert_eq!(OnlineCourseError::malformed_input("test").code(), "E005");
        assert_eq!(OnlineCourseError::database_config("test").code(), "E103");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            OnlineCourseError::not_enrolled("test").error_type(),
            "Not Enrolled"
        );
        assert_eq!(
            OnlineCourseError::invalid_credentials("test").error_type(),
            "Invalid Credentials"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            OnlineCourseError::not_found("course").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            OnlineCourseError::not_enrolled("course").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            OnlineCourseError::malformed_input("choice").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            OnlineCourseError::database_operation("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_format_simple() {
        let err = OnlineCourseError::malformed_input("choice1 is not an integer");
        let formatted = err.format_simple();
        assert!(formatted.contains("Malformed Input"));
        assert!(formatted.contains("choice1 is not an integer"));
    }
}
