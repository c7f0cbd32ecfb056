//! VClass - 课堂工作流核心
//!
//! 用户注册与审批、活动发布、文件提交、评分与进度统计。
//!
//! # 架构
//! - `archive`: 提交文件归档
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层，表现层的唯一入口
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod archive;
pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod test_utils;
