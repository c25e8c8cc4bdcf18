use crate::clients::QuestionClient;
use crate::config::Config;
use crate::models::load_uploaded_file;
use crate::services::render_listing;
use crate::utils::logging;
use crate::workflow::QuestionGenerator;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

/// 单次运行的参数
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// 待上传的文档
    pub file: PathBuf,
    /// 主题数量覆盖（主题, 数量）
    pub count_overrides: Vec<(String, i64)>,
    /// 是否导出 docx
    pub export: bool,
}

/// 应用主结构
pub struct App {
    config: Config,
    generator: QuestionGenerator<QuestionClient>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        let client = QuestionClient::new(&config).context("无法创建出题服务客户端")?;
        let generator = QuestionGenerator::new(client, &config);

        Ok(Self { config, generator })
    }

    /// 运行应用主逻辑：上传 → 设置数量 → 生成 → 导出
    pub async fn run(&self, options: &RunOptions) -> Result<()> {
        let file = load_uploaded_file(&options.file).await?;
        let topics = self
            .generator
            .submit_file(file)
            .await
            .context("上传文档失败，可重新运行重试")?;

        if topics.is_empty() {
            warn!("⚠️ 服务端没有识别出任何主题，程序结束");
            return Ok(());
        }

        self.apply_overrides(&options.count_overrides);

        let questions = self
            .generator
            .generate()
            .await
            .context("生成题目失败，可重新运行重试")?;

        if questions.is_empty() {
            warn!("⚠️ 服务端没有返回任何题目");
        } else {
            println!("{}", render_listing(&questions));
        }

        let export_path = if options.export && !questions.is_empty() {
            let path = self
                .generator
                .export_document(&self.config.output_dir)
                .await
                .context("导出 Word 文档失败")?;
            Some(path.display().to_string())
        } else {
            if options.export {
                warn!("⚠️ 没有可导出的题目，跳过导出");
            }
            None
        };

        logging::print_final_stats(topics.len(), questions.len(), export_path.as_deref());
        Ok(())
    }

    /// 应用命令行中的数量覆盖，无效的覆盖记录警告后跳过
    fn apply_overrides(&self, overrides: &[(String, i64)]) {
        for (topic, value) in overrides {
            match self.generator.set_count(topic, *value) {
                Ok(()) => info!("✓ 主题 {} 的题目数量: {}", topic, value),
                Err(e) => warn!("⚠️ 忽略数量设置 {}={}: {}", topic, value, e),
            }
        }
    }
}
