//! 会话状态
//!
//! 一次会话内的全部可观察状态，只能通过 `QuestionGenerator` 的四个操作改变

use std::collections::HashSet;
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{AppResult, BusinessError};
use crate::models::{FileInfo, GeneratedQuestionList, TopicQuestionCounts, TopicSet};

/// 可能挂起等待网络的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Upload,
    Generate,
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Upload => write!(f, "上传文档"),
            Operation::Generate => write!(f, "生成题目"),
        }
    }
}

/// 会话状态快照
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// 最近一次选择的文件
    pub file: Option<FileInfo>,
    pub is_uploading: bool,
    pub is_uploaded: bool,
    pub topics: TopicSet,
    pub counts: TopicQuestionCounts,
    pub is_generating: bool,
    pub questions: GeneratedQuestionList,
}

/// 进行中操作登记表，每种操作最多一个
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    slots: Arc<Mutex<HashSet<Operation>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashSet<Operation>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// 占用一个操作槽位，已被占用时返回错误
    ///
    /// 返回的守卫在 drop 时释放槽位，future 被取消时同样会释放
    pub fn acquire(&self, op: Operation) -> AppResult<InFlightGuard> {
        if !self.slots().insert(op) {
            return Err(BusinessError::OperationInFlight(op).into());
        }
        Ok(InFlightGuard {
            slots: Arc::clone(&self.slots),
            op,
        })
    }

    pub fn is_active(&self, op: Operation) -> bool {
        self.slots().contains(&op)
    }
}

/// 操作槽位守卫
#[derive(Debug)]
pub struct InFlightGuard {
    slots: Arc<Mutex<HashSet<Operation>>>,
    op: Operation,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.slots
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.op);
    }
}
