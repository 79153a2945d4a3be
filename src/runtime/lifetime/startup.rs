use crate::cache::{
    ObjectCache, object_cache::register_default_plugins, register::get_object_cache_plugin,
};
use crate::config::AppConfig;
use crate::errors::{OnlineCourseError, Result};
use crate::routes;
use crate::storage::Storage;
use crate::utils::form_error_handler;
use crate::views::TemplateRenderer;
use actix_web::web;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 服务器运行所需的共享状态
#[derive(Clone)]
pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub renderer: web::Data<TemplateRenderer>,
}

impl StartupContext {
    pub fn new(storage: Arc<dyn Storage>, cache: Arc<dyn ObjectCache>) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        debug!("Loaded templates: {:?}", renderer.template_names());

        Ok(Self {
            storage,
            cache,
            renderer: web::Data::new(renderer),
        })
    }

    /// 注册共享数据、表单解析配置与全部路由
    ///
    /// 调用方还需要在 App 上挂载 [`crate::middlewares::SessionUser`] 中间件。
    pub fn configure_app(&self, cfg: &mut web::ServiceConfig) {
        let config = AppConfig::get();
        cfg.app_data(
            web::FormConfig::default()
                .limit(config.server.limits.max_payload_size)
                .error_handler(form_error_handler),
        )
        .app_data(web::Data::new(self.storage.clone()))
        .app_data(web::Data::new(self.cache.clone()))
        .app_data(self.renderer.clone())
        .configure(routes::configure_asset_routes)
        .configure(routes::configure_onlinecourse_routes);
    }
}

/// 创建缓存实例，配置的后端不可用时回退到内存缓存
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let config = AppConfig::get();
    let cache_type = &config.cache.cache_type;

    debug!("Attempting to create {} cache backend", cache_type);

    match get_object_cache_plugin(cache_type) {
        Some(constructor) => match constructor().await {
            Ok(cache) => {
                info!("Successfully created {} cache backend", cache_type);
                return Ok(Arc::from(cache));
            }
            Err(e) => warn!("Failed to create {} cache: {}", cache_type, e),
        },
        None => warn!("Cache backend '{}' not found in registry", cache_type),
    }

    if cache_type != "moka" {
        warn!("Falling back to default memory cache");
        if let Some(fallback_constructor) = get_object_cache_plugin("moka") {
            let cache = fallback_constructor().await?;
            warn!("Successfully created fallback Moka (in-memory) cache backend");
            return Ok(Arc::from(cache));
        }
    }

    Err(OnlineCourseError::cache_plugin_not_found(format!(
        "No cache backend available (tried: {cache_type})"
    )))
}

/// 准备服务器启动的上下文
/// 包括存储、缓存、模板与演示数据
pub async fn prepare_server_startup() -> Result<StartupContext> {
    register_default_plugins();
    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
    }

    let storage = crate::storage::create_storage().await?;
    info!("Storage backend initialized and migrations completed");

    if AppConfig::get().app.seed_demo_data {
        match super::seed::seed_demo_catalogue(storage.as_ref()).await {
            Ok(0) => debug!("Course catalogue already populated, skipping demo seed"),
            Ok(count) => info!("Seeded {} demo course(s)", count),
            Err(e) => warn!("Failed to seed demo catalogue: {}", e),
        }
    }

    let cache = create_cache().await?;
    info!("Cache backend initialized");

    StartupContext::new(storage, cache)
}
