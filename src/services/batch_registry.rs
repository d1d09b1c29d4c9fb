//! 批次登记 - 业务能力层
//!
//! 只负责"有序地持有条目和展示行"，不关心提交流程

use crate::models::{AudioFile, FileEntry, Row, RowId};
use tracing::debug;

/// 批次登记
///
/// 职责：
/// - 按插入顺序持有 `FileEntry`，插入顺序就是提交顺序
/// - 每个条目对应恰好一行，增删总是成对进行
/// - 行标识只用于定位，位置由剩余顺序隐式决定
#[derive(Debug, Default)]
pub struct BatchRegistry {
    entries: Vec<FileEntry>,
    rows: Vec<Row>,
    next_row_id: u64,
}

impl BatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个文件，总是成功
    pub fn append(&mut self, handle: AudioFile) -> FileEntry {
        self.next_row_id += 1;
        let row_id = RowId(self.next_row_id);

        let entry = FileEntry {
            handle,
            row_id,
        };
        self.rows.push(Row::new(row_id, entry.handle.name.clone()));
        self.entries.push(entry.clone());

        debug!("追加 {} -> {} (当前 {} 个)", entry.handle.name, row_id, self.entries.len());

        entry
    }

    /// 按行标识删除条目和行
    ///
    /// 通过在当前行中查找标识来确定位置，行创建之后批次被改动过也能正确删除。
    /// 找不到时什么也不做。
    pub fn remove_at(&mut self, row_id: RowId) -> Option<FileEntry> {
        let position = self.rows.iter().position(|row| row.id == row_id)?;

        self.rows.remove(position);
        let entry = self.entries.remove(position);
        debug_assert_eq!(entry.row_id, row_id);

        debug!("删除 {} ({}), 剩余 {} 个", entry.handle.name, row_id, self.entries.len());

        Some(entry)
    }

    /// 批次非空且去除首尾空白后的参考答案非空
    pub fn is_submission_allowed(&self, reference_answer: &str) -> bool {
        is_submission_allowed(self.entries.len(), reference_answer)
    }

    /// 当前所有文件句柄（按批次顺序），提交时作为快照
    pub fn snapshot(&self) -> Vec<AudioFile> {
        self.entries.iter().map(|entry| entry.handle.clone()).collect()
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 提交资格判定，纯函数
pub fn is_submission_allowed(batch_len: usize, reference_answer: &str) -> bool {
    batch_len > 0 && !reference_answer.trim().is_empty()
}
