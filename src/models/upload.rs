use std::path::Path;

/// 浏览器端文件选择器提示支持的扩展名
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["pdf", "docx", "txt"];

/// 用户选择的待上传文件
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub content: Vec<u8>,
    pub media_type: String,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        let name = name.into();
        let media_type = media_type_for(&name).to_string();
        Self {
            name,
            content,
            media_type,
        }
    }

    /// 扩展名是否在 PDF / DOCX / TXT 范围内（仅提示，不做拒绝）
    pub fn is_supported_hint(&self) -> bool {
        extension_of(&self.name)
            .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    pub fn info(&self) -> FileInfo {
        FileInfo {
            name: self.name.clone(),
            media_type: self.media_type.clone(),
            size: self.content.len(),
        }
    }
}

impl std::fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("size", &self.content.len())
            .finish()
    }
}

/// 会话中保留的文件元信息，不持有文件内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub media_type: String,
    pub size: usize,
}

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}

/// 根据文件名推断 MIME 类型
pub fn media_type_for(name: &str) -> &'static str {
    match extension_of(name).as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
