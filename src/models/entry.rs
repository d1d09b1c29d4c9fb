//! 批次条目与展示行

use std::fmt::Display;

use crate::models::audio_file::AudioFile;
use crate::models::score::RenderedScore;

/// 展示行的标识
///
/// 只用于删除和更新时定位行，从不参与排序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

impl Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row#{}", self.0)
    }
}

/// 批次中的一个文件条目
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub handle: AudioFile,
    pub row_id: RowId,
}

/// 一行展示状态
///
/// 行上渲染出来的分数和转录文本就是评分结果的唯一存储。
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: RowId,
    pub file_name: String,
    pub score: Option<RenderedScore>,
    pub transcript: Option<String>,
}

impl Row {
    pub fn new(id: RowId, file_name: impl Into<String>) -> Self {
        Self {
            id,
            file_name: file_name.into(),
            score: None,
            transcript: None,
        }
    }

    /// 是否已经渲染过评分结果
    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "文件名：{}", self.file_name)?;
        if let Some(score) = &self.score {
            write!(f, " | {} [{}]", score.text, score.band)?;
        }
        write!(f, " | 转录结果：{}", self.transcript.as_deref().unwrap_or(""))
    }
}
