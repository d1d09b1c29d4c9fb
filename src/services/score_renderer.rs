//! 分数渲染 - 业务能力层
//!
//! 把评分结果按位置写到展示行上

use crate::models::{RenderedScore, Row, ScoreResult};
use tracing::{debug, warn};

/// 分数渲染
///
/// 第 i 条结果写到第 i 行。结果比行少时，多出的行保持原样；
/// 结果比行多时，多出的结果忽略。两种情况都不算错误。
pub struct ScoreRenderer;

impl ScoreRenderer {
    /// 渲染结果，返回被更新的行数
    pub fn render(results: &[ScoreResult], rows: &mut [Row]) -> usize {
        if results.len() != rows.len() {
            debug!("结果数 {} 与行数 {} 不一致，按位置截断", results.len(), rows.len());
        }

        let mut updated = 0;
        for (row, result) in rows.iter_mut().zip(results) {
            if let Some(echoed) = result.filename.as_deref() {
                if echoed != row.file_name {
                    warn!(
                        "⚠️ {} 的结果回显文件名为 {}，仍按位置对应",
                        row.file_name, echoed
                    );
                }
            }

            row.score = Some(RenderedScore::from_score(result.score));
            row.transcript = Some(result.transcript.clone());
            updated += 1;
        }

        updated
    }
}
