//! 事件与副作用
//!
//! 所有用户操作和网络回调都建模成离散的消息，交给唯一的状态更新函数处理

use crate::error::TransportError;
use crate::models::{AudioFile, RowId, ScoreResult, SubmissionRequest};
use crate::services::IntakeSource;

/// 输入事件
#[derive(Debug)]
pub enum AppEvent {
    /// 用户拖入或选择了一组文件
    FilesOffered {
        source: IntakeSource,
        files: Vec<AudioFile>,
    },
    /// 点击某一行的删除按钮
    RemoveRow(RowId),
    /// 参考答案被编辑（完整的新文本）
    ReferenceAnswerEdited(String),
    /// 点击提交按钮
    SubmitClicked,
    /// 进行中的提交有了结果
    SubmissionCompleted(Result<Vec<ScoreResult>, TransportError>),
}

/// 状态更新后需要外部执行的副作用
#[derive(Debug)]
pub enum Effect {
    /// 发出唯一的一次评分请求
    Dispatch(SubmissionRequest),
    /// 给用户一条（阻塞式）提示
    Notify(String),
}
