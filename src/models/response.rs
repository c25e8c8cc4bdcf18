//! 出题服务响应解析
//!
//! 服务端返回的 JSON 对象键顺序即主题顺序，依赖 serde_json 的 `preserve_order`

use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::models::question::{GeneratedQuestion, GeneratedQuestionList};
use crate::models::topic::TopicSet;

pub const UPLOAD_ENDPOINT: &str = "/upload/";
pub const QUESTIONS_ENDPOINT: &str = "/get_questions/";

/// 上传接口响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResponse {
    pub message: Option<String>,
    pub topics: TopicSet,
}

impl UploadResponse {
    /// 解析上传响应
    ///
    /// 服务端实际返回 `{"message": ..., "questions": {主题: ...}}`，
    /// 也接受顶层直接以主题为键的对象。只使用键，不使用值。
    pub fn from_value(value: Value) -> AppResult<Self> {
        let Value::Object(root) = value else {
            return Err(AppError::malformed_response(
                UPLOAD_ENDPOINT,
                "响应不是 JSON 对象",
            ));
        };

        let message = root
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);

        // 只有缺少 "questions" 键时才把顶层键当作主题，"message" 属于信封字段
        let topics: TopicSet = match root.get("questions") {
            Some(Value::Object(questions)) => questions.keys().cloned().collect(),
            Some(other) => {
                return Err(AppError::malformed_response(
                    UPLOAD_ENDPOINT,
                    format!("questions 字段不是对象: {}", other),
                ));
            }
            None => root
                .keys()
                .filter(|k| k.as_str() != "message")
                .cloned()
                .collect(),
        };

        Ok(Self { message, topics })
    }
}

/// 获取题目接口响应：主题 → 题目列表，保持响应顺序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionsResponse {
    pub entries: Vec<(String, Vec<String>)>,
}

impl QuestionsResponse {
    /// 解析获取题目响应
    ///
    /// 任一主题的值不是字符串数组（包括服务端对未匹配主题返回的 `{"error": ...}`）
    /// 都视为响应格式错误，整批不提交
    pub fn from_value(value: Value) -> AppResult<Self> {
        let Value::Object(root) = value else {
            return Err(AppError::malformed_response(
                QUESTIONS_ENDPOINT,
                "响应不是 JSON 对象",
            ));
        };
        Self::from_map(root)
    }

    fn from_map(root: Map<String, Value>) -> AppResult<Self> {
        let mut entries = Vec::with_capacity(root.len());
        for (topic, value) in root {
            let items = match value {
                Value::Array(items) => items,
                other => {
                    return Err(AppError::malformed_response(
                        QUESTIONS_ENDPOINT,
                        format!("主题 {} 未返回题目列表: {}", topic, other),
                    ));
                }
            };
            let questions = items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(AppError::malformed_response(
                        QUESTIONS_ENDPOINT,
                        format!("主题 {} 中存在非文本题目: {}", topic, other),
                    )),
                })
                .collect::<AppResult<Vec<_>>>()?;
            entries.push((topic, questions));
        }
        Ok(Self { entries })
    }

    pub fn total_questions(&self) -> usize {
        self.entries.iter().map(|(_, qs)| qs.len()).sum()
    }

    /// 展开为题目列表
    ///
    /// `pinned` 为 `Some` 时按该主题集合排序，集合外的主题排在最后并保持响应顺序；
    /// 为 `None` 时按响应顺序。
    pub fn into_question_list(self, pinned: Option<&TopicSet>) -> GeneratedQuestionList {
        let mut entries = self.entries;
        if let Some(order) = pinned {
            entries.sort_by_key(|(topic, _)| order.position(topic).unwrap_or(usize::MAX));
        }

        entries
            .into_iter()
            .flat_map(|(topic, questions)| {
                questions
                    .into_iter()
                    .enumerate()
                    .map(move |(i, q)| GeneratedQuestion::new(topic.clone(), i, q))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upload_topics_from_nested_questions() {
        let value = json!({
            "message": "Questions generated and refined successfully.",
            "questions": {
                "Photosynthesis": {"refined": ["a"]},
                "Cell Division": {"refined": []}
            }
        });
        let resp = UploadResponse::from_value(value).unwrap();
        assert_eq!(
            resp.topics.as_slice(),
            &["Photosynthesis".to_string(), "Cell Division".to_string()]
        );
        assert!(resp.message.unwrap().starts_with("Questions generated"));
    }

    #[test]
    fn upload_topics_from_top_level_keys() {
        let value = json!({"Math": ["x"], "History": ["y"]});
        let resp = UploadResponse::from_value(value).unwrap();
        assert_eq!(
            resp.topics.as_slice(),
            &["Math".to_string(), "History".to_string()]
        );
    }

    #[test]
    fn upload_rejects_non_object() {
        let err = UploadResponse::from_value(json!(["Math"])).unwrap_err();
        assert!(matches!(
            err,
            AppError::Api(crate::error::ApiError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn questions_keep_response_order_and_positional_ids() {
        let value = json!({
            "Zoology": ["Z1", "Z2"],
            "Algebra": ["A1"]
        });
        let list = QuestionsResponse::from_value(value)
            .unwrap()
            .into_question_list(None);
        let ids: Vec<&str> = list.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["Zoology-0", "Zoology-1", "Algebra-0"]);
    }

    #[test]
    fn pinned_order_follows_topic_set() {
        let value = json!({
            "Extra": ["E1"],
            "History": ["H1"],
            "Math": ["M1", "M2"]
        });
        let pinned: TopicSet = vec!["Math".to_string(), "History".to_string()]
            .into_iter()
            .collect();
        let list = QuestionsResponse::from_value(value)
            .unwrap()
            .into_question_list(Some(&pinned));
        let ids: Vec<&str> = list.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["Math-0", "Math-1", "History-0", "Extra-0"]);
    }

    #[test]
    fn topic_error_entry_rejects_whole_batch() {
        let value = json!({
            "Math": ["M1"],
            "Astrology": {"error": "Topic not found."}
        });
        let err = QuestionsResponse::from_value(value).unwrap_err();
        assert!(matches!(
            err,
            AppError::Api(crate::error::ApiError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn non_text_question_rejects_whole_batch() {
        let value = json!({"History": ["H1", 42, "H2"]});
        assert!(QuestionsResponse::from_value(value).is_err());
    }

    #[test]
    fn total_questions_sums_every_topic() {
        let value = json!({"Math": ["M1", "M2"], "History": ["H1"]});
        assert_eq!(QuestionsResponse::from_value(value).unwrap().total_questions(), 3);
    }

    #[test]
    fn upload_rejects_non_object_questions_field() {
        for questions in [json!(null), json!(["Math"]), json!("Math")] {
            let value = json!({"message": "ok", "questions": questions});
            let err = UploadResponse::from_value(value).unwrap_err();
            assert!(matches!(
                err,
                AppError::Api(crate::error::ApiError::MalformedResponse { .. })
            ));
        }
    }

    #[test]
    fn upload_top_level_fallback_skips_message() {
        let value = json!({"message": "ok", "Math": [], "History": []});
        let resp = UploadResponse::from_value(value).unwrap();
        assert_eq!(
            resp.topics.as_slice(),
            &["Math".to_string(), "History".to_string()]
        );
        assert_eq!(resp.message.as_deref(), Some("ok"));
    }

    #[test]
    fn questions_reject_non_object() {
        assert!(QuestionsResponse::from_value(json!("oops")).is_err());
    }
}
