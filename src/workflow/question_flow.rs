//! 出题流程 - 流程层
//!
//! 核心职责：持有会话状态，定义"上传 → 设置数量 → 生成 → 导出"四个操作
//!
//! - 状态只在操作完全成功后提交，失败时保持原状态
//! - 每种网络操作同时最多一个在进行中
//! - 状态锁不会跨越 `.await`

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, error, info, warn};

use crate::clients::QuestionBackend;
use crate::config::Config;
use crate::error::{AppResult, BusinessError, ValidationError};
use crate::models::{
    build_topics_param, GeneratedQuestionList, TopicQuestionCounts, TopicSet, UploadedFile,
};
use crate::services::DocxExporter;
use crate::utils::logging;
use crate::workflow::session::{InFlight, Operation, SessionState};

/// 出题流程控制器
pub struct QuestionGenerator<B> {
    backend: B,
    exporter: DocxExporter,
    state: Mutex<SessionState>,
    in_flight: InFlight,
    default_count: u32,
    pin_topic_order: bool,
}

impl<B: QuestionBackend> QuestionGenerator<B> {
    /// 创建新的出题流程
    pub fn new(backend: B, config: &Config) -> Self {
        Self {
            backend,
            exporter: DocxExporter::new(),
            state: Mutex::new(SessionState::default()),
            in_flight: InFlight::new(),
            default_count: config.default_question_count,
            pin_topic_order: config.pin_topic_order,
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// 当前会话状态快照
    pub fn snapshot(&self) -> SessionState {
        let mut snapshot = self.state().clone();
        snapshot.is_uploading = self.in_flight.is_active(Operation::Upload);
        snapshot.is_generating = self.in_flight.is_active(Operation::Generate);
        snapshot
    }

    pub fn topics(&self) -> TopicSet {
        self.state().topics.clone()
    }

    pub fn counts(&self) -> TopicQuestionCounts {
        self.state().counts.clone()
    }

    pub fn questions(&self) -> GeneratedQuestionList {
        self.state().questions.clone()
    }

    /// 上传文档并获取主题
    ///
    /// 成功后每个主题的数量初始化为默认值；失败时主题和数量保持不变
    pub async fn submit_file(&self, file: UploadedFile) -> AppResult<TopicSet> {
        let _guard = self.in_flight.acquire(Operation::Upload)?;

        {
            let mut state = self.state();
            state.file = Some(file.info());
            state.is_uploaded = false;
        }

        info!("📤 正在上传 {}，服务端处理可能需要数分钟...", file.name);

        let response = match self.backend.upload(&file).await {
            Ok(response) => response,
            Err(e) => {
                error!("❌ 上传文件失败 ({}): {}", file.name, e);
                return Err(e);
            }
        };

        let topics = response.topics;
        let counts = TopicQuestionCounts::initialized(&topics, self.default_count);
        {
            let mut state = self.state();
            state.topics = topics.clone();
            state.counts = counts;
            state.is_uploaded = true;
        }

        logging::log_upload_complete(&file.name, topics.as_slice());
        Ok(topics)
    }

    /// 设置某个主题的题目数量
    pub fn set_count(&self, topic: &str, value: i64) -> AppResult<()> {
        let mut state = self.state();

        if !state.topics.contains(topic) {
            return Err(ValidationError::UnknownTopic {
                topic: topic.to_string(),
            }
            .into());
        }

        let count = u32::try_from(value)
            .ok()
            .filter(|&n| n >= 1)
            .ok_or_else(|| ValidationError::InvalidCount {
                topic: topic.to_string(),
                value,
            })?;

        state.counts.set(topic, count);
        debug!("主题 {} 的题目数量设置为 {}", topic, count);
        Ok(())
    }

    /// 按当前主题和数量生成题目
    ///
    /// 主题为空时不发送请求，直接返回当前列表；成功时整体替换列表。
    /// 上传进行中时拒绝生成；生成期间主题被新上传替换时丢弃结果
    pub async fn generate(&self) -> AppResult<GeneratedQuestionList> {
        let (topics, counts) = {
            let state = self.state();
            (state.topics.clone(), state.counts.clone())
        };

        if topics.is_empty() {
            debug!("没有主题，跳过生成");
            return Ok(self.questions());
        }

        let _guard = self.in_flight.acquire(Operation::Generate)?;
        if self.in_flight.is_active(Operation::Upload) {
            return Err(BusinessError::OperationInFlight(Operation::Upload).into());
        }

        let param = build_topics_param(&topics, &counts);
        info!("🧠 正在生成题目: {}", logging::truncate_text(&param, 120));

        let response = match self.backend.fetch_questions(&param).await {
            Ok(response) => response,
            Err(e) => {
                error!("❌ 获取题目失败: {}", e);
                return Err(e);
            }
        };

        let topic_count = response.entries.len();
        let pinned = self.pin_topic_order.then_some(&topics);
        let questions = response.into_question_list(pinned);

        {
            let mut state = self.state();
            if state.topics != topics {
                warn!("⚠️ 生成期间主题已被新的上传替换，丢弃本批 {} 道题目", questions.len());
                return Err(BusinessError::TopicsChanged.into());
            }
            state.questions = questions.clone();
        }

        logging::log_generation_complete(topic_count, questions.len());
        Ok(questions)
    }

    /// 导出当前题目列表为 `dir/Generated_Questions.docx`
    pub async fn export_document(&self, dir: &Path) -> AppResult<PathBuf> {
        let questions = self.questions();
        self.exporter
            .write_to(dir, &questions)
            .await
            .inspect_err(|e| error!("❌ 导出文档失败: {}", e))
    }
}
