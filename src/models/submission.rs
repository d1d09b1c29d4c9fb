use crate::models::audio_file::AudioFile;

/// 一次提交的内容快照
///
/// 发出请求时拍下，之后批次再怎么增删都不会影响这次请求。
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    /// 按批次顺序排列的文件
    pub files: Vec<AudioFile>,
    /// 已去除首尾空白的参考答案
    pub reference_answer: String,
}

impl SubmissionRequest {
    pub fn new(files: Vec<AudioFile>, reference_answer: &str) -> Self {
        Self {
            files,
            reference_answer: reference_answer.trim().to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
