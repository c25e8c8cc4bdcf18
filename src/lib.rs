//! # Question Generator
//!
//! 出题服务客户端：上传教材文档，按主题设置题目数量，生成题目并导出为 Word 文档
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 与出题服务的 HTTP 交互
//! - `QuestionBackend` - 服务能力抽象（上传 / 获取题目）
//! - `QuestionClient` - 基于 reqwest 的实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不持有会话状态
//! - `DocxExporter` - 写 Generated_Questions.docx
//! - `render_listing` - 按主题分组的文本展示
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 会话状态与四个操作
//! - `SessionState` - 会话状态快照
//! - `QuestionGenerator` - 流程控制（上传 → 设置数量 → 生成 → 导出）
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{QuestionBackend, QuestionClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{GeneratedQuestion, GeneratedQuestionList, TopicQuestionCounts, TopicSet, UploadedFile};
pub use services::{DocxExporter, EXPORT_FILE_NAME};
pub use workflow::{Operation, QuestionGenerator, SessionState};
