/// 出题服务 API 客户端
///
/// 封装上传文档和获取题目两个接口
use crate::config::Config;
use crate::error::{AppError, AppResult, ApiError};
use crate::models::response::{QUESTIONS_ENDPOINT, UPLOAD_ENDPOINT};
use crate::models::{QuestionsResponse, UploadResponse, UploadedFile};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// 出题服务能力
#[async_trait]
pub trait QuestionBackend: Send + Sync {
    /// 上传文档，返回服务端识别出的主题
    async fn upload(&self, file: &UploadedFile) -> AppResult<UploadResponse>;

    /// 按 `topics` 参数获取题目，参数为未编码的 `名称:数量,...`
    async fn fetch_questions(&self, topics_param: &str) -> AppResult<QuestionsResponse>;
}

#[async_trait]
impl<T: QuestionBackend + ?Sized> QuestionBackend for Arc<T> {
    async fn upload(&self, file: &UploadedFile) -> AppResult<UploadResponse> {
        (**self).upload(file).await
    }

    async fn fetch_questions(&self, topics_param: &str) -> AppResult<QuestionsResponse> {
        (**self).fetch_questions(topics_param).await
    }
}

/// 基于 reqwest 的出题服务客户端
pub struct QuestionClient {
    client: Client,
    base_url: String,
    upload_timeout: Duration,
    generate_timeout: Duration,
}

impl QuestionClient {
    /// 创建新的出题服务客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| AppError::api_request_failed(config.service_base_url.clone(), e))?;

        Ok(Self {
            client,
            base_url: config.service_base_url.trim_end_matches('/').to_string(),
            upload_timeout: config.upload_timeout(),
            generate_timeout: config.generate_timeout(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// 检查状态码并解析 JSON
    async fn read_json(endpoint: &str, response: Response) -> AppResult<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api(ApiError::BadResponse {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            }));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl QuestionBackend for QuestionClient {
    async fn upload(&self, file: &UploadedFile) -> AppResult<UploadResponse> {
        let url = self.url(UPLOAD_ENDPOINT);
        debug!("POST {} ({} 字节)", url, file.content.len());

        let part = Part::bytes(file.content.clone())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)
            .map_err(|e| AppError::api_request_failed(UPLOAD_ENDPOINT, e))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .timeout(self.upload_timeout)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(UPLOAD_ENDPOINT, e))?;

        let value = Self::read_json(UPLOAD_ENDPOINT, response).await?;
        debug!("上传响应: {}", value);
        UploadResponse::from_value(value)
    }

    async fn fetch_questions(&self, topics_param: &str) -> AppResult<QuestionsResponse> {
        let url = self.url(QUESTIONS_ENDPOINT);
        debug!("GET {} topics={}", url, topics_param);

        let response = self
            .client
            .get(&url)
            .query(&[("topics", topics_param)])
            .timeout(self.generate_timeout)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(QUESTIONS_ENDPOINT, e))?;

        let value = Self::read_json(QUESTIONS_ENDPOINT, response).await?;
        debug!("题目响应: {}", value);
        QuestionsResponse::from_value(value)
    }
}
