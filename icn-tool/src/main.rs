//! ICN 命令行工具

mod commands;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, warn};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{ToolConfig, DEFAULT_LOG_FILTER};

#[derive(Parser, Debug)]
#[command(name = "icn-tool", version, about = "无限象棋记谱法（ICN）编解码工具")]
struct Args {
    /// 配置文件路径，默认使用配置目录下的 icn-tool/config.json
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 生成时钟嵌入命令
    Clock {
        /// 剩余毫秒数
        #[arg(allow_negative_numbers = true)]
        millis: i64,
    },
    /// 解析并重新编码局面
    Position {
        /// 输入文件，`-` 表示标准输入
        input: PathBuf,
        /// 按配置的规则重新推导特殊权利
        #[arg(long)]
        infer: bool,
    },
    /// 解析走法列表
    Moves {
        /// 输入文件，`-` 表示标准输入
        input: PathBuf,
        /// 起始局面文件，提供时按配置的样式输出
        #[arg(long)]
        position: Option<PathBuf>,
    },
    /// 查询棋子代码
    Code {
        code: String,
    },
}

fn main() -> ExitCode {
    if let Err(e) = run() {
        error!("{:#}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run() -> Result<()> {
    let args = Args::parse();
    let loaded = ToolConfig::load(args.config.as_deref());

    // 配置加载失败时也要先初始化日志，错误才能输出
    let log_filter = match &loaded {
        Ok((config, _)) => config.log_filter.as_str(),
        Err(_) => DEFAULT_LOG_FILTER,
    };
    let (filter, invalid_directive) = build_filter(log_filter);

    // 输出到 stderr 以免混入结果
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Some(e) = invalid_directive {
        warn!("无效的日志指令 {}: {}，已忽略", log_filter, e);
    }

    let (config, source) = loaded?;
    source.report();

    let output = match args.command {
        Command::Clock { millis } => commands::clock(millis),
        Command::Position { input, infer } => {
            let text = commands::read_input(&input)?;
            commands::position(&text, infer.then_some(&config.rules))?
        }
        Command::Moves { input, position } => {
            let text = commands::read_input(&input)?;
            let start = position
                .as_deref()
                .map(commands::read_input)
                .transpose()?;
            commands::moves(&text, start.as_deref(), &config)?
        }
        Command::Code { code } => commands::code(&code)?,
    };

    println!("{}", output);
    Ok(())
}

/// RUST_LOG 加上配置中的默认指令；指令无效时只使用 RUST_LOG，并返回解析错误
fn build_filter(log_filter: &str) -> (EnvFilter, Option<String>) {
    let filter = EnvFilter::from_default_env();
    match log_filter.parse::<Directive>() {
        Ok(directive) => (filter.add_directive(directive), None),
        Err(e) => (filter, Some(e.to_string())),
    }
}
