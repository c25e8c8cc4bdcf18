use serde::{Deserialize, Serialize};

/// 生成的单道题目
///
/// `id` 形如 `<topic>-<index>`，只在同一批次内唯一，重新生成会覆盖整张列表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub id: String,
    pub topic: String,
    pub question: String,
}

impl GeneratedQuestion {
    pub fn new(topic: impl Into<String>, index: usize, question: impl Into<String>) -> Self {
        let topic = topic.into();
        Self {
            id: format!("{}-{}", topic, index),
            topic,
            question: question.into(),
        }
    }

    /// 导出到文档时的段落文本
    pub fn export_line(&self) -> String {
        format!("{}: {}", self.topic, self.question)
    }
}

impl std::fmt::Display for GeneratedQuestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.id, self.question)
    }
}

/// 当前批次的题目列表
pub type GeneratedQuestionList = Vec<GeneratedQuestion>;
