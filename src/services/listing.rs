//! 题目列表的文本展示
//!
//! 按主题分组（首次出现顺序），组内从 1 开始编号

use crate::models::GeneratedQuestion;

/// 按主题分组
pub fn group_by_topic(questions: &[GeneratedQuestion]) -> Vec<(&str, Vec<&GeneratedQuestion>)> {
    let mut groups: Vec<(&str, Vec<&GeneratedQuestion>)> = Vec::new();
    for q in questions {
        match groups.iter_mut().find(|(topic, _)| *topic == q.topic) {
            Some((_, items)) => items.push(q),
            None => groups.push((q.topic.as_str(), vec![q])),
        }
    }
    groups
}

/// 渲染为终端展示文本
pub fn render_listing(questions: &[GeneratedQuestion]) -> String {
    let mut out = String::new();
    for (topic, items) in group_by_topic(questions) {
        out.push_str(&format!("== {} ==\n", topic));
        for (i, q) in items.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, q.question));
        }
        out.push('\n');
    }
    out
}
