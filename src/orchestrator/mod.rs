//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 把用户操作和网络回调串成一个单线程事件循环，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `event_loop` - 事件循环
//! - 持有 `AppState`、评分后端和提示能力
//! - 接收 `AppHandle` 发来的事件，交给 `AppState::update`
//! - 执行副作用：发出请求、弹出提示
//! - 发布 `View` 快照
//!
//! ### `notifier` - 用户提示
//! - 失败时唯一的用户可见出口
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (事件循环)
//!     ↓
//! workflow::AppState (状态机)
//!     ↓
//! services (能力层：intake / registry / renderer)
//!     ↓
//! clients (HTTP 出口：ScoringClient)
//! ```

pub mod event_loop;
pub mod notifier;

pub use event_loop::{App, AppHandle};
pub use notifier::{CollectingNotifier, LogNotifier, Notifier};
