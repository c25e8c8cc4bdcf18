use crate::error::{AppError, AppResult, FileError};
use crate::models::upload::UploadedFile;
use std::path::Path;
use tokio::fs;

/// 从磁盘读取待上传文件
pub async fn load_uploaded_file(path: &Path) -> AppResult<UploadedFile> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        return Err(AppError::File(FileError::NotFound {
            path: path.display().to_string(),
        }));
    }

    let content = fs::read(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let file = UploadedFile::new(name, content);

    if !file.is_supported_hint() {
        tracing::warn!(
            "⚠️ 文件 {} 不在 PDF/DOCX/TXT 范围内，仍会上传，由服务端决定是否接受",
            file.name
        );
    }

    tracing::info!(
        "已读取文件: {} ({} 字节, {})",
        file.name,
        file.content.len(),
        file.media_type
    );

    Ok(file)
}
