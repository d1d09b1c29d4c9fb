/// 评分服务客户端
///
/// 整个系统唯一的网络出口：一次 multipart POST，换回一个 JSON 数组
use crate::config::Config;
use crate::error::TransportError;
use crate::models::{ScoreResult, SubmissionRequest};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::debug;

/// 评分后端
///
/// 控制器只依赖这个能力，测试时可以换成不走网络的实现。
#[async_trait]
pub trait ScoringBackend: Send + Sync {
    /// 提交一批文件和参考答案，返回与提交顺序一一对应的结果
    async fn score(&self, request: SubmissionRequest) -> Result<Vec<ScoreResult>, TransportError>;
}

/// 评分服务 HTTP 客户端
///
/// 不设置超时，也不重试：超时交给传输层，失败只报告一次。
pub struct ScoringClient {
    http: reqwest::Client,
    endpoint: String,
    files_field: String,
    answer_field: String,
}

impl ScoringClient {
    /// 创建新的评分客户端
    pub fn new(config: &Config) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// 使用已有的 reqwest 客户端
    pub fn with_http_client(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            endpoint: config.endpoint_url(),
            files_field: config.files_field.clone(),
            answer_field: config.answer_field.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 构建 multipart 表单
    ///
    /// 每个文件一个 part，字段名相同，按批次顺序排列；
    /// 参考答案作为最后一个文本 part。
    fn build_form(&self, request: &SubmissionRequest) -> Result<Form, TransportError> {
        let mut form = Form::new();

        for file in &request.files {
            // multipart part 需要持有自己的字节
            let mut part = Part::bytes(file.bytes().to_vec()).file_name(file.name.clone());
            if !file.media_type.is_empty() {
                part = part
                    .mime_str(&file.media_type)
                    .map_err(|e| TransportError::InvalidPart {
                        file_name: file.name.clone(),
                        source: e,
                    })?;
            }
            form = form.part(self.files_field.clone(), part);
        }

        Ok(form.text(self.answer_field.clone(), request.reference_answer.clone()))
    }

    /// 解析响应体
    fn parse_body(&self, body: &str) -> Result<Vec<ScoreResult>, TransportError> {
        serde_json::from_str(body).map_err(|e| TransportError::invalid_body(&self.endpoint, e))
    }
}

#[async_trait]
impl ScoringBackend for ScoringClient {
    async fn score(&self, request: SubmissionRequest) -> Result<Vec<ScoreResult>, TransportError> {
        debug!("POST {} ({} 个文件)", self.endpoint, request.len());

        let form = self.build_form(&request)?;

        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransportError::request_failed(&self.endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::bad_status(&self.endpoint, status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::request_failed(&self.endpoint, e))?;

        debug!("评分响应: {} 字节", body.len());

        self.parse_body(&body)
    }
}
