//! 子命令实现

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use icn::{
    clk_tag, generate_special_rights, parse_short_form_moves, registry, short_form_moves, Move,
    MoveFlags, PositionCodec, SpecialRightsRules,
};
use tracing::{debug, info};

use crate::config::ToolConfig;

/// 读取输入，`-` 表示标准输入
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("读取标准输入失败")?;
        return Ok(buffer);
    }
    fs::read_to_string(path).with_context(|| format!("读取文件失败: {:?}", path))
}

/// `clock <millis>`
pub fn clock(millis: i64) -> String {
    clk_tag(millis)
}

/// `position <input> [--infer]`
pub fn position(text: &str, infer: Option<&SpecialRightsRules>) -> Result<String> {
    let (position, mut special_rights) =
        PositionCodec::parse(text).context("解析局面失败")?;

    if let Some(rules) = infer {
        special_rights = generate_special_rights(&position, rules).context("推导特殊权利失败")?;
        info!("推导出 {} 个特殊权利", special_rights.len());
    }

    Ok(PositionCodec::to_string(&position, &special_rights))
}

/// `moves <input> [--position <file>]`
///
/// 没有起始局面时只能输出最紧凑形式；有起始局面时重放走法以恢复走子的棋子，
/// 再按配置的样式输出。
pub fn moves(text: &str, start: Option<&str>, config: &ToolConfig) -> Result<String> {
    let parsed = parse_short_form_moves(text).context("解析走法列表失败")?;

    let Some(start) = start else {
        return Ok(parsed
            .iter()
            .map(|mv| mv.draft.to_compact())
            .collect::<Vec<_>>()
            .join("|"));
    };

    let (mut position, _) = PositionCodec::parse(start).context("解析起始局面失败")?;
    let mut replayed = Vec::with_capacity(parsed.len());

    for (i, parsed_move) in parsed.into_iter().enumerate() {
        let draft = parsed_move.draft;
        let Some(piece) = position.remove(&draft.start) else {
            bail!("第 {} 步的起点 {} 没有棋子", i + 1, draft.start);
        };
        let capture = position.contains(&draft.end);
        position.insert(draft.end.clone(), draft.promotion.unwrap_or(piece));

        let mut mv = Move::new(piece, draft).with_flags(MoveFlags {
            capture,
            ..MoveFlags::default()
        });
        if let Some(comment) = parsed_move.comment {
            mv = mv.with_comment(comment);
        }
        replayed.push(mv);
    }

    debug!("重放了 {} 步", replayed.len());
    Ok(short_form_moves(&replayed, &config.style))
}

/// `code <code>`
pub fn code(code: &str) -> Result<String> {
    let piece = registry::decode(code)?;
    Ok(format!(
        "{} {} {}",
        piece.raw(),
        piece.player(),
        registry::encode(piece)
    ))
}
