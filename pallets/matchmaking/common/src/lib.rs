//! # 婚恋模块 - 共享类型和接口
//!
//! 本模块提供合婚系统的共享类型定义和 Trait 接口。
//!
//! ## 功能概述
//!
//! - **类型定义**：合婚等级、各维度分析、合婚结果、推荐候选人
//! - **Trait 接口**：合婚评分器、候选年份策略
//!
//! ## 模块结构
//!
//! ```text
//! matchmaking-common
//! ├── types.rs    # 共享类型定义
//! └── traits.rs   # Trait 接口定义
//! ```

pub mod traits;
pub mod types;

pub use traits::*;
pub use types::*;
