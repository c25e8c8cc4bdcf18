//! Word 文档导出服务 - 业务能力层
//!
//! 只负责把题目列表写成 docx，不关心列表从哪里来

use std::io::Cursor;
use std::path::{Path, PathBuf};

use docx_rs::{Docx, Paragraph, Run};
use tracing::{debug, info};

use crate::error::{AppError, AppResult, ExportError};
use crate::models::GeneratedQuestion;

/// 导出文件名
pub const EXPORT_FILE_NAME: &str = "Generated_Questions.docx";

/// docx 导出服务
///
/// 每道题一个段落，内容为加粗的 `主题: 题目`，顺序与列表一致，全部放在同一节中
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxExporter;

impl DocxExporter {
    pub fn new() -> Self {
        Self
    }

    /// 构建文档对象
    fn build(&self, questions: &[GeneratedQuestion]) -> Docx {
        questions.iter().fold(Docx::new(), |docx, q| {
            docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(q.export_line()).bold()))
        })
    }

    /// 序列化为 docx 字节
    pub fn render(&self, questions: &[GeneratedQuestion]) -> AppResult<Vec<u8>> {
        if questions.is_empty() {
            return Err(AppError::Export(ExportError::NothingToExport));
        }

        let mut buf = Cursor::new(Vec::new());
        self.build(questions)
            .build()
            .pack(&mut buf)
            .map_err(AppError::export_serialization_failed)?;

        debug!("docx 序列化完成: {} 段, {} 字节", questions.len(), buf.get_ref().len());
        Ok(buf.into_inner())
    }

    /// 写入 `dir/Generated_Questions.docx`，返回文件路径
    pub async fn write_to(&self, dir: &Path, questions: &[GeneratedQuestion]) -> AppResult<PathBuf> {
        let bytes = self.render(questions)?;
        let path = dir.join(EXPORT_FILE_NAME);

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::export_write_failed(dir.display().to_string(), e))?;
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| AppError::export_write_failed(path.display().to_string(), e))?;

        info!("📄 已导出 {} 道题目到 {}", questions.len(), path.display());
        Ok(path)
    }
}
