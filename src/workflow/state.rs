//! 界面状态 - 流程层
//!
//! 核心职责：持有批次、参考答案、展示行和提交按钮，
//! 并用唯一的 `update` 函数推进提交状态机
//!
//! 状态机：
//! 1. IDLE --提交(资格满足)--> SUBMITTING
//! 2. SUBMITTING --成功--> SUCCESS --> IDLE
//! 3. SUBMITTING --失败--> FAILURE --> IDLE

use std::fmt::Display;

use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::TransportError;
use crate::models::{AudioFile, Row, RowId, ScoreResult, SubmissionRequest};
use crate::services::{BatchRegistry, IntakeSource, IntakeValidator, ScoreRenderer};
use crate::utils::logging;
use crate::workflow::event::{AppEvent, Effect};

/// 提交状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Submitting,
    Success,
    Failure,
}

impl Display for SubmitPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SubmitPhase::Idle => "IDLE",
            SubmitPhase::Submitting => "SUBMITTING",
            SubmitPhase::Success => "SUCCESS",
            SubmitPhase::Failure => "FAILURE",
        };
        write!(f, "{}", name)
    }
}

/// 提交按钮的展示状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub enabled: bool,
    pub label: String,
    /// 提交中的样式（原界面上是浅蓝背景）
    pub busy: bool,
}

/// 对外发布的只读快照
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub rows: Vec<Row>,
    pub reference_answer: String,
    pub button: SubmitButton,
    pub phase: SubmitPhase,
    /// 最近一次提交的结局（SUCCESS / FAILURE）
    pub last_outcome: Option<SubmitPhase>,
    /// 已经结束的提交次数
    pub completed_submissions: usize,
}

/// 界面状态
///
/// 所有共享状态只由这一个对象持有，所有变化只经过 `update`。
pub struct AppState {
    intake: IntakeValidator,
    registry: BatchRegistry,
    reference_answer: String,
    phase: SubmitPhase,
    button: SubmitButton,
    submit_label: String,
    busy_label: String,
    last_outcome: Option<SubmitPhase>,
    completed_submissions: usize,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            intake: IntakeValidator::new(config),
            registry: BatchRegistry::new(),
            reference_answer: String::new(),
            phase: SubmitPhase::Idle,
            button: SubmitButton {
                enabled: false,
                label: config.submit_label.clone(),
                busy: false,
            },
            submit_label: config.submit_label.clone(),
            busy_label: config.busy_label.clone(),
            last_outcome: None,
            completed_submissions: 0,
        }
    }

    /// 处理一个事件，返回需要外部执行的副作用
    pub fn update(&mut self, event: AppEvent) -> Vec<Effect> {
        match event {
            AppEvent::FilesOffered { source, files } => {
                self.on_files_offered(source, files);
                Vec::new()
            }
            AppEvent::RemoveRow(row_id) => {
                self.on_remove_row(row_id);
                Vec::new()
            }
            AppEvent::ReferenceAnswerEdited(text) => {
                self.reference_answer = text;
                self.refresh_submit_button();
                Vec::new()
            }
            AppEvent::SubmitClicked => self.on_submit_clicked(),
            AppEvent::SubmissionCompleted(outcome) => self.on_submission_completed(outcome),
        }
    }

    fn on_files_offered(&mut self, source: IntakeSource, files: Vec<AudioFile>) {
        let accepted = self.intake.intake(source, files, &mut self.registry);
        if !accepted.is_empty() {
            info!("📥 {}添加 {} 个音频，批次共 {} 个", source, accepted.len(), self.registry.len());
        }
        self.refresh_submit_button();
    }

    fn on_remove_row(&mut self, row_id: RowId) {
        match self.registry.remove_at(row_id) {
            Some(entry) => info!("🗑️ 已移除 {}", entry.handle.name),
            None => debug!("{} 不存在，忽略删除", row_id),
        }
        self.refresh_submit_button();
    }

    fn on_submit_clicked(&mut self) -> Vec<Effect> {
        if self.phase != SubmitPhase::Idle {
            debug!("当前状态 {}，忽略提交", self.phase);
            return Vec::new();
        }
        if !self.is_submission_allowed() {
            debug!("批次为空或参考答案为空，忽略提交");
            return Vec::new();
        }

        self.phase = SubmitPhase::Submitting;
        self.button = SubmitButton {
            enabled: false,
            label: self.busy_label.clone(),
            busy: true,
        };

        let request = SubmissionRequest::new(self.registry.snapshot(), &self.reference_answer);
        logging::log_submission_start(request.len(), &request.reference_answer);

        vec![Effect::Dispatch(request)]
    }

    fn on_submission_completed(
        &mut self,
        outcome: Result<Vec<ScoreResult>, TransportError>,
    ) -> Vec<Effect> {
        if self.phase != SubmitPhase::Submitting {
            warn!("⚠️ 状态 {} 下收到提交结果，忽略", self.phase);
            return Vec::new();
        }

        let effects = match outcome {
            Ok(results) => {
                let updated = ScoreRenderer::render(&results, self.registry.rows_mut());
                self.phase = SubmitPhase::Success;
                logging::log_submission_success(results.len(), updated);
                Vec::new()
            }
            Err(e) => {
                self.phase = SubmitPhase::Failure;
                error!("❌ 评分失败: {}", e);
                vec![Effect::Notify(format!("评分失败：{}", e))]
            }
        };

        self.exit_submission();
        effects
    }

    /// 离开 SUCCESS / FAILURE 时无条件执行：恢复按钮文案和样式，回到 IDLE
    fn exit_submission(&mut self) {
        self.last_outcome = Some(self.phase);
        self.completed_submissions += 1;
        self.phase = SubmitPhase::Idle;
        self.button.label = self.submit_label.clone();
        self.button.busy = false;
        self.refresh_submit_button();
    }

    /// 按钮是否可用完全由当前状态推导，不单独保存
    fn refresh_submit_button(&mut self) {
        self.button.enabled = self.phase == SubmitPhase::Idle && self.is_submission_allowed();
    }

    /// 批次非空且参考答案去除首尾空白后非空
    pub fn is_submission_allowed(&self) -> bool {
        self.registry.is_submission_allowed(&self.reference_answer)
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn button(&self) -> &SubmitButton {
        &self.button
    }

    pub fn registry(&self) -> &BatchRegistry {
        &self.registry
    }

    pub fn rows(&self) -> &[Row] {
        self.registry.rows()
    }

    pub fn reference_answer(&self) -> &str {
        &self.reference_answer
    }

    /// 当前状态的快照
    pub fn view(&self) -> View {
        View {
            rows: self.registry.rows().to_vec(),
            reference_answer: self.reference_answer.clone(),
            button: self.button.clone(),
            phase: self.phase,
            last_outcome: self.last_outcome,
            completed_submissions: self.completed_submissions,
        }
    }
}
