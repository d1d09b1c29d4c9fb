//! 入口校验 - 业务能力层
//!
//! 只负责"决定哪些文件进入批次"

use crate::config::Config;
use crate::models::{AudioFile, FileEntry};
use crate::services::batch_registry::BatchRegistry;
use std::fmt::Display;
use tracing::{debug, trace};

/// 文件来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeSource {
    /// 拖放
    DragDrop,
    /// 文件选择对话框
    Picker,
}

impl Display for IntakeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntakeSource::DragDrop => write!(f, "拖放"),
            IntakeSource::Picker => write!(f, "文件选择"),
        }
    }
}

/// 入口校验
///
/// 声明类型等于支持的音频类型，或者文件名以支持的扩展名结尾（区分大小写），
/// 满足其一即接受。这只是宽松的提示性检查，不读取文件内容。
/// 不满足的文件静默丢弃，不提示、不记录。
#[derive(Debug, Clone)]
pub struct IntakeValidator {
    accepted_mime: String,
    accepted_extension: String,
}

impl IntakeValidator {
    pub fn new(config: &Config) -> Self {
        Self {
            accepted_mime: config.accepted_mime.clone(),
            accepted_extension: config.accepted_extension.clone(),
        }
    }

    /// 判断单个文件是否可以接受
    ///
    /// 配置为空的类型或扩展名不参与匹配。
    pub fn accepts(&self, file: &AudioFile) -> bool {
        let type_matches = !self.accepted_mime.is_empty() && file.media_type == self.accepted_mime;
        let extension_matches =
            !self.accepted_extension.is_empty() && file.name.ends_with(&self.accepted_extension);
        type_matches || extension_matches
    }

    /// 把一组文件中可接受的部分追加到批次
    ///
    /// 不去重：同一个文件传两次就会有两个条目。
    /// 返回新追加的条目。
    pub fn intake(
        &self,
        source: IntakeSource,
        files: Vec<AudioFile>,
        registry: &mut BatchRegistry,
    ) -> Vec<FileEntry> {
        let offered = files.len();

        let accepted: Vec<FileEntry> = files
            .into_iter()
            .filter(|file| {
                let ok = self.accepts(file);
                if !ok {
                    trace!("忽略 {} ({})", file.name, file.media_type);
                }
                ok
            })
            .map(|file| registry.append(file))
            .collect();

        debug!("{}: 收到 {} 个文件，接受 {} 个", source, offered, accepted.len());

        accepted
    }
}

impl Default for IntakeValidator {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
