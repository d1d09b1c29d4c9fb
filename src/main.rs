use anyhow::{bail, Result};
use audio_score_submit::models::load_audio_files;
use audio_score_submit::utils::logging;
use audio_score_submit::{App, Config, IntakeSource, SubmitPhase};
use tracing::warn;

const USAGE: &str = "用法: audio_score_submit <参考答案> <音频文件>...";

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);
    logging::log_startup(&config);

    let mut args = std::env::args().skip(1);
    let Some(reference_answer) = args.next() else {
        bail!(USAGE);
    };
    let paths: Vec<String> = args.collect();
    if paths.is_empty() {
        bail!(USAGE);
    }

    let files = load_audio_files(&paths).await;

    // 启动事件循环
    let (app, mut handle) = App::with_config(&config);
    let task = tokio::spawn(app.run());

    handle.offer_files(IntakeSource::Picker, files)?;
    handle.edit_reference_answer(reference_answer.clone())?;
    let view = handle
        .wait_for(|v| v.reference_answer == reference_answer)
        .await?;

    if view.button.enabled {
        handle.click_submit()?;
        handle.wait_for(|v| v.completed_submissions > 0).await?;
    } else {
        warn!("⚠️ 没有可提交的音频，或参考答案为空");
    }

    drop(handle);
    let state = task.await?;

    logging::print_final_rows(state.rows());

    if state.view().last_outcome == Some(SubmitPhase::Failure) {
        bail!("评分失败");
    }

    Ok(())
}
