//! Online Course - 在线课程选课与考试系统
//!
//! 基于 Actix Web 构建的服务端渲染网站：注册登录、浏览课程、选课、参加考试并查看成绩。
//!
//! # 架构
//! - `cache`: 缓存层（Moka）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 会话用户解析中间件
//! - `models`: 数据模型定义
//! - `routes`: 页面路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数
//! - `views`: 模板渲染与统一响应

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
pub mod views;
