use anyhow::Result;
use clap::Parser;
use question_generator::app::{App, RunOptions};
use question_generator::config::Config;
use question_generator::utils::logging;
use std::path::PathBuf;

/// 上传教材文档，按主题生成题目并导出 Word 文档
#[derive(Debug, Parser)]
#[command(name = "question-generator", version)]
struct Cli {
    /// 待上传的文档（PDF / DOCX / TXT）
    file: PathBuf,

    /// 设置某个主题的题目数量，格式 `主题=数量`，可重复
    #[arg(short, long = "count", value_name = "TOPIC=N", value_parser = parse_count_override)]
    counts: Vec<(String, i64)>,

    /// 导出 Generated_Questions.docx
    #[arg(short, long)]
    export: bool,

    /// 导出目录
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// TOML 配置文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// 按上传得到的主题顺序展示题目
    #[arg(long)]
    pin_topic_order: bool,

    /// 显示详细日志
    #[arg(short, long)]
    verbose: bool,
}

fn parse_count_override(s: &str) -> Result<(String, i64), String> {
    let (topic, count) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("格式应为 主题=数量: {}", s))?;
    let count = count
        .trim()
        .parse()
        .map_err(|_| format!("数量不是整数: {}", count))?;
    Ok((topic.trim().to_string(), count))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env(),
    };
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    config.pin_topic_order |= cli.pin_topic_order;
    config.verbose_logging |= cli.verbose;

    // 初始化日志
    logging::init(config.verbose_logging);

    let options = RunOptions {
        file: cli.file,
        count_overrides: cli.counts,
        export: cli.export,
    };

    App::initialize(config)?.run(&options).await?;

    Ok(())
}
