//! 事件循环 - 编排层
//!
//! ## 职责
//!
//! 1. **接收事件**：`AppHandle` 把用户操作作为消息送进通道
//! 2. **推进状态**：每个事件交给 `AppState::update`
//! 3. **执行副作用**：发出评分请求、弹出提示
//! 4. **发布快照**：每处理完一个事件就通过 watch 通道发布 `View`
//!
//! ## 设计特点
//!
//! - **单线程协作**：所有状态变化都在这一个循环里发生
//! - **唯一挂起点**：进行中的评分请求和事件接收用 `select!` 并行等待，
//!   请求未返回时仍然可以增删文件、编辑参考答案
//! - **单飞**：同一时间最多一个请求；不支持取消，请求总会跑完

use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::{BoxFuture, OptionFuture};
use futures::FutureExt;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::clients::{ScoringBackend, ScoringClient};
use crate::config::Config;
use crate::error::TransportError;
use crate::models::{AudioFile, RowId, ScoreResult};
use crate::orchestrator::notifier::{LogNotifier, Notifier};
use crate::services::IntakeSource;
use crate::workflow::{AppEvent, AppState, Effect, View};

type InFlight = BoxFuture<'static, Result<Vec<ScoreResult>, TransportError>>;

/// 应用主结构
pub struct App {
    state: AppState,
    backend: Arc<dyn ScoringBackend>,
    notifier: Arc<dyn Notifier>,
    events: mpsc::UnboundedReceiver<AppEvent>,
    view_tx: watch::Sender<View>,
}

/// 向事件循环发送用户操作的句柄
#[derive(Clone)]
pub struct AppHandle {
    events: mpsc::UnboundedSender<AppEvent>,
    view: watch::Receiver<View>,
}

impl App {
    /// 创建事件循环和配套的句柄
    pub fn new(
        config: &Config,
        backend: Arc<dyn ScoringBackend>,
        notifier: Arc<dyn Notifier>,
    ) -> (Self, AppHandle) {
        let state = AppState::new(config);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(state.view());

        let app = Self {
            state,
            backend,
            notifier,
            events: events_rx,
            view_tx,
        };
        let handle = AppHandle {
            events: events_tx,
            view: view_rx,
        };

        (app, handle)
    }

    /// 使用 HTTP 评分客户端和日志提示创建
    pub fn with_config(config: &Config) -> (Self, AppHandle) {
        Self::new(
            config,
            Arc::new(ScoringClient::new(config)),
            Arc::new(LogNotifier),
        )
    }

    /// 运行事件循环
    ///
    /// 所有句柄都被丢弃、且没有进行中的请求时结束，返回最终状态。
    pub async fn run(mut self) -> AppState {
        let mut in_flight: Option<InFlight> = None;
        let mut events_open = true;

        loop {
            if !events_open && in_flight.is_none() {
                break;
            }

            tokio::select! {
                outcome = OptionFuture::from(in_flight.as_mut()), if in_flight.is_some() => {
                    in_flight = None;
                    if let Some(outcome) = outcome {
                        self.handle_event(AppEvent::SubmissionCompleted(outcome), &mut in_flight);
                    }
                }
                event = self.events.recv(), if events_open => match event {
                    Some(event) => self.handle_event(event, &mut in_flight),
                    None => {
                        debug!("所有句柄已关闭");
                        events_open = false;
                    }
                },
            }
        }

        info!("事件循环结束，批次共 {} 个文件", self.state.registry().len());
        self.state
    }

    /// 处理单个事件并执行它产生的副作用
    fn handle_event(&mut self, event: AppEvent, in_flight: &mut Option<InFlight>) {
        for effect in self.state.update(event) {
            match effect {
                Effect::Dispatch(request) => {
                    if in_flight.is_some() {
                        warn!("⚠️ 已有进行中的请求，丢弃新的提交");
                        continue;
                    }
                    let backend = Arc::clone(&self.backend);
                    *in_flight = Some(async move { backend.score(request).await }.boxed());
                }
                Effect::Notify(message) => self.notifier.notify(&message),
            }
        }

        self.view_tx.send_replace(self.state.view());
    }
}

impl AppHandle {
    /// 拖入或选择了一组文件
    pub fn offer_files(&self, source: IntakeSource, files: Vec<AudioFile>) -> Result<()> {
        self.send(AppEvent::FilesOffered { source, files })
    }

    /// 删除一行
    pub fn remove_row(&self, row_id: RowId) -> Result<()> {
        self.send(AppEvent::RemoveRow(row_id))
    }

    /// 参考答案被编辑为新的完整文本
    pub fn edit_reference_answer(&self, text: impl Into<String>) -> Result<()> {
        self.send(AppEvent::ReferenceAnswerEdited(text.into()))
    }

    /// 点击提交
    pub fn click_submit(&self) -> Result<()> {
        self.send(AppEvent::SubmitClicked)
    }

    /// 最新快照
    pub fn view(&self) -> View {
        self.view.borrow().clone()
    }

    /// 等到快照满足条件
    pub async fn wait_for(&mut self, predicate: impl FnMut(&View) -> bool) -> Result<View> {
        let view = self
            .view
            .wait_for(predicate)
            .await
            .context("事件循环已结束")?;
        Ok(View::clone(&view))
    }

    fn send(&self, event: AppEvent) -> Result<()> {
        self.events
            .send(event)
            .map_err(|_| anyhow::anyhow!("事件循环已结束"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Band, SubmissionRequest};
    use crate::orchestrator::notifier::CollectingNotifier;
    use crate::workflow::SubmitPhase;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::{oneshot, Mutex};

    fn mp3(name: &str) -> AudioFile {
        AudioFile::new(name, "audio/mp3", vec![7u8; 16])
    }

    /// 固定返回结果的后端
    struct FixedBackend {
        calls: AtomicUsize,
        outcome: fn(&SubmissionRequest) -> Result<Vec<ScoreResult>, TransportError>,
    }

    #[async_trait]
    impl ScoringBackend for FixedBackend {
        async fn score(&self, request: SubmissionRequest) -> Result<Vec<ScoreResult>, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)(&request)
        }
    }

    /// 等待测试放行后才返回的后端
    struct GatedBackend {
        calls: AtomicUsize,
        seen: Mutex<Vec<SubmissionRequest>>,
        gate: Mutex<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait]
    impl ScoringBackend for GatedBackend {
        async fn score(&self, request: SubmissionRequest) -> Result<Vec<ScoreResult>, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let count = request.len();
            self.seen.lock().await.push(request);
            if let Some(gate) = self.gate.lock().await.take() {
                let _ = gate.await;
            }
            Ok((0..count)
                .map(|i| ScoreResult {
                    score: 0.5,
                    transcript: format!("t{}", i),
                    filename: None,
                })
                .collect())
        }
    }

    fn scores(request: &SubmissionRequest) -> Result<Vec<ScoreResult>, TransportError> {
        Ok(request
            .files
            .iter()
            .zip([0.95, 0.3])
            .map(|(file, score)| ScoreResult {
                score,
                transcript: format!("transcript of {}", file.name),
                filename: Some(file.name.clone()),
            })
            .collect())
    }

    #[tokio::test]
    async fn test_submit_renders_scores() {
        let backend = Arc::new(FixedBackend {
            calls: AtomicUsize::new(0),
            outcome: scores,
        });
        let notifier = Arc::new(CollectingNotifier::new());
        let (app, mut handle) = App::new(&Config::default(), backend.clone(), notifier.clone());
        let task = tokio::spawn(app.run());

        handle
            .offer_files(IntakeSource::DragDrop, vec![mp3("a.mp3"), mp3("b.mp3")])
            .unwrap();
        handle.edit_reference_answer("water boils at 100C").unwrap();
        handle.click_submit().unwrap();

        let view = handle.wait_for(|v| v.completed_submissions == 1).await.unwrap();
        drop(handle);
        let state = task.await.unwrap();

        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
        assert!(notifier.messages().is_empty());
        assert_eq!(view.phase, SubmitPhase::Idle);
        assert!(view.button.enabled);
        assert_eq!(view.rows[0].score.as_ref().unwrap().text, "95.00%");
        assert_eq!(view.rows[0].score.as_ref().unwrap().band, Band::High);
        assert_eq!(view.rows[1].score.as_ref().unwrap().text, "30.00%");
        assert_eq!(view.rows[1].score.as_ref().unwrap().band, Band::Low);
        assert_eq!(state.rows().len(), 2);
    }

    #[tokio::test]
    async fn test_failure_notifies_once_and_restores() {
        let backend = Arc::new(FixedBackend {
            calls: AtomicUsize::new(0),
            outcome: |_| Err(TransportError::bad_status("/api/process", 502)),
        });
        let notifier = Arc::new(CollectingNotifier::new());
        let (app, mut handle) = App::new(&Config::default(), backend.clone(), notifier.clone());
        let task = tokio::spawn(app.run());

        handle.offer_files(IntakeSource::Picker, vec![mp3("a.mp3")]).unwrap();
        handle.edit_reference_answer("answer").unwrap();
        handle.click_submit().unwrap();

        let view = handle.wait_for(|v| v.completed_submissions == 1).await.unwrap();
        drop(handle);
        task.await.unwrap();

        assert_eq!(notifier.messages(), vec!["评分失败：评分请求失败 (HTTP 502)"]);
        assert_eq!(view.last_outcome, Some(SubmitPhase::Failure));
        assert!(view.button.enabled);
        assert_eq!(view.button.label, "提交评分");
        assert_eq!(view.rows.len(), 1);
        assert!(!view.rows[0].is_scored());
        assert_eq!(view.reference_answer, "answer");
    }

    #[tokio::test]
    async fn test_ui_stays_responsive_while_submitting() {
        let (release, gate) = oneshot::channel();
        let backend = Arc::new(GatedBackend {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            gate: Mutex::new(Some(gate)),
        });
        let (app, mut handle) = App::new(
            &Config::default(),
            backend.clone(),
            Arc::new(CollectingNotifier::new()),
        );
        let task = tokio::spawn(app.run());

        handle
            .offer_files(IntakeSource::Picker, vec![mp3("a.mp3"), mp3("b.mp3")])
            .unwrap();
        handle.edit_reference_answer("answer").unwrap();
        handle.click_submit().unwrap();
        handle.wait_for(|v| v.phase == SubmitPhase::Submitting).await.unwrap();

        // 请求挂起期间：再次提交无效，增删文件仍然生效
        handle.click_submit().unwrap();
        handle.offer_files(IntakeSource::Picker, vec![mp3("c.mp3")]).unwrap();
        let view = handle.wait_for(|v| v.rows.len() == 3).await.unwrap();
        assert!(!view.button.enabled);
        assert_eq!(view.button.label, "评分中...");

        release.send(()).unwrap();
        let view = handle.wait_for(|v| v.completed_submissions == 1).await.unwrap();
        drop(handle);
        task.await.unwrap();

        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
        assert_eq!(backend.seen.lock().await[0].len(), 2);
        // 两条结果写到当前的前两行，第三行保持原样
        assert!(view.rows[0].is_scored());
        assert!(view.rows[1].is_scored());
        assert!(!view.rows[2].is_scored());
        assert!(view.button.enabled);
    }

    #[tokio::test]
    async fn test_run_ends_when_handles_dropped() {
        let (app, handle) = App::new(
            &Config::default(),
            Arc::new(FixedBackend {
                calls: AtomicUsize::new(0),
                outcome: scores,
            }),
            Arc::new(CollectingNotifier::new()),
        );
        handle.offer_files(IntakeSource::Picker, vec![mp3("a.mp3")]).unwrap();
        drop(handle);

        let state = app.run().await;
        assert_eq!(state.rows().len(), 1);
    }
}
