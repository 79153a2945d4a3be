pub mod moka;

use std::sync::Arc;

use crate::cache::register::register_object_cache_plugin;

/// 注册内置的缓存插件
pub fn register_default_plugins() {
    register_object_cache_plugin(
        "moka",
        Arc::new(|| {
            Box::pin(async {
                let cache = moka::MokaCacheWrapper::from_config()?;
                Ok(Box::new(cache) as Box<dyn crate::cache::ObjectCache>)
            })
        }),
    );
}
