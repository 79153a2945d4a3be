//! 对象缓存
//!
//! 缓存后端以插件形式注册，启动时按配置中的 `cache.type` 选择。

pub mod object_cache;
pub mod register;
mod traits;

pub use traits::{CacheResult, ObjectCache};
