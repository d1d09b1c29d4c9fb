//! 评分结果与分档

use serde::Deserialize;
use std::fmt::Display;

/// 服务返回的单条评分结果
///
/// 只是过路数据：收到后立即渲染到对应行上，不单独保存。
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoreResult {
    /// [0, 1] 之间的相似度分数
    pub score: f64,
    /// 转录文本
    pub transcript: String,
    /// 服务回显的文件名（可选）
    #[serde(default)]
    pub filename: Option<String>,
}

/// 分数档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    /// >= 80
    High,
    /// >= 50 且 < 80
    Medium,
    /// < 50
    Low,
}

impl Band {
    /// 按百分比分档，每档下界包含在内
    pub fn classify(percent: f64) -> Self {
        if percent >= 80.0 {
            Band::High
        } else if percent >= 50.0 {
            Band::Medium
        } else {
            Band::Low
        }
    }

    /// 档位的样式类名
    pub fn class_name(self) -> &'static str {
        match self {
            Band::High => "high",
            Band::Medium => "medium",
            Band::Low => "low",
        }
    }
}

impl Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.class_name())
    }
}

/// 渲染后的分数
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedScore {
    /// 百分比 = score × 100
    pub percent: f64,
    /// 保留两位小数的文本，例如 `95.00%`
    pub text: String,
    pub band: Band,
}

impl RenderedScore {
    pub fn from_score(score: f64) -> Self {
        let percent = score * 100.0;
        // 两位小数，恰好在中间时向上进位
        let shown = (percent * 100.0).round() / 100.0;
        Self {
            percent,
            text: format!("{:.2}%", shown),
            band: Band::classify(percent),
        }
    }
}
