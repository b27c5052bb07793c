//! API 路由模块
//!
//! # 结构
//!
//! - [`index`] - 前端页面
//! - [`health`] - 健康检查
//! - [`tables`] - 桌台标签
//! - [`menu`] - 菜单接口
//! - [`bills`] - 账单接口
//! - [`download`] - 表文件下载

pub mod bills;
pub mod download;
pub mod health;
pub mod index;
pub mod menu;
pub mod tables;

pub use crate::utils::AppResult;
