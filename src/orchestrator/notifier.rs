//! 用户提示
//!
//! 失败时给用户的唯一一条提示走这里

use std::sync::Mutex;
use tracing::error;

/// 用户提示能力
///
/// 调用是同步的，相当于界面上的阻塞式弹窗。
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// 输出到日志的提示
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        error!("🔔 {}", message);
    }
}

/// 收集提示内容，便于检查
#[derive(Default)]
pub struct CollectingNotifier {
    messages: Mutex<Vec<String>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已收到的全部提示
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
