use std::collections::HashMap;

/// 默认每个主题的题目数量
pub const DEFAULT_QUESTION_COUNT: u32 = 5;

/// 上传响应中得到的主题，保持响应中的顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicSet {
    topics: Vec<String>,
}

impl TopicSet {
    pub fn new(topics: Vec<String>) -> Self {
        Self { topics }
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(String::as_str)
    }

    /// 主题在集合中的位置
    pub fn position(&self, topic: &str) -> Option<usize> {
        self.topics.iter().position(|t| t == topic)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.topics
    }
}

impl FromIterator<String> for TopicSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            topics: iter.into_iter().collect(),
        }
    }
}

/// 每个主题要生成的题目数量
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicQuestionCounts {
    counts: HashMap<String, u32>,
    default_count: u32,
}

impl Default for TopicQuestionCounts {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
            default_count: DEFAULT_QUESTION_COUNT,
        }
    }
}

impl TopicQuestionCounts {
    /// 为每个主题初始化为默认数量
    pub fn initialized(topics: &TopicSet, default_count: u32) -> Self {
        Self {
            counts: topics
                .iter()
                .map(|t| (t.to_string(), default_count))
                .collect(),
            default_count,
        }
    }

    /// 缺失的主题返回默认数量
    pub fn get(&self, topic: &str) -> u32 {
        self.counts.get(topic).copied().unwrap_or(self.default_count)
    }

    pub fn set(&mut self, topic: impl Into<String>, count: u32) {
        self.counts.insert(topic.into(), count);
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.counts.contains_key(topic)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }
}

/// 构建 `topics` 查询参数：`名称:数量` 以逗号连接，按主题集合顺序
///
/// 返回未编码的原始值，URL 编码由 HTTP 客户端完成
pub fn build_topics_param(topics: &TopicSet, counts: &TopicQuestionCounts) -> String {
    topics
        .iter()
        .map(|topic| format!("{}:{}", topic, counts.get(topic)))
        .collect::<Vec<_>>()
        .join(",")
}
