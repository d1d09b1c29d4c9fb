//! 音频文件句柄
//!
//! 客户端不解析音频内容，只把它当作带名字和类型的二进制块

use std::fmt;
use std::sync::Arc;

/// 一个待评分的音频文件
///
/// 字节内容用 `Arc` 共享：提交时拍下的快照和批次里的条目指向同一份数据，
/// 克隆句柄不会复制音频内容。构造请求体时会按文件复制一次。
#[derive(Clone, PartialEq, Eq)]
pub struct AudioFile {
    /// 文件名（含扩展名）
    pub name: String,
    /// 声明的媒体类型，例如 `audio/mp3`
    pub media_type: String,
    bytes: Arc<[u8]>,
}

impl AudioFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// 文件内容
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 文件大小（字节）
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for AudioFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_bytes() {
        let file = AudioFile::new("a.mp3", "audio/mp3", vec![1u8, 2, 3]);
        let copy = file.clone();
        assert!(std::ptr::eq(file.bytes(), copy.bytes()));
        assert_eq!(copy.len(), 3);
    }

    #[test]
    fn test_debug_omits_content() {
        let file = AudioFile::new("a.mp3", "audio/mp3", vec![0u8; 4096]);
        let text = format!("{:?}", file);
        assert!(text.contains("len: 4096"));
        assert!(!text.contains("0, 0, 0"));
    }
}
