//! # Audio Score Submit
//!
//! 一个批量提交音频、按参考答案评分的客户端
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 出口层（Clients）
//! - `clients/` - 唯一的网络出口
//! - `ScoringClient` - multipart POST 到评分服务，解析 JSON 结果
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `IntakeValidator` - 过滤非音频文件
//! - `BatchRegistry` - 有序持有条目和展示行
//! - `ScoreRenderer` - 把结果按位置写到行上
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 提交状态机
//! - `AppEvent` / `Effect` - 离散消息与副作用
//! - `AppState` - 唯一的状态更新函数（IDLE → SUBMITTING → SUCCESS/FAILURE → IDLE）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/event_loop` - 事件循环，单飞请求，发布快照
//! - `orchestrator/notifier` - 用户提示
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{ScoringBackend, ScoringClient};
pub use config::Config;
pub use error::{AppError, AppResult, TransportError};
pub use models::{AudioFile, Band, RenderedScore, Row, RowId, ScoreResult, SubmissionRequest};
pub use orchestrator::{App, AppHandle, CollectingNotifier, LogNotifier, Notifier};
pub use services::{IntakeSource, IntakeValidator};
pub use workflow::{AppEvent, AppState, Effect, SubmitPhase, View};
