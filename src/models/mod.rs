//! 业务数据模型
//!
//! 与 `entity` 中的数据库实体分离，既用于服务层之间的传递，也作为模板上下文序列化。

pub mod courses;
pub mod enrollments;
pub mod exams;
pub mod users;
