//! 走法定义与单步走法的简写编码

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clock::clk_tag;
use crate::coords::Coordinate;
use crate::piece::PieceType;
use crate::registry;

/// 重放一步走法所需的最少信息
///
/// 不包含走子的棋子类型，它可以从起点处的局面恢复。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveDraft {
    /// 起点
    pub start: Coordinate,
    /// 终点
    pub end: Coordinate,
    /// 升变后的棋子类型
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceType>,
}

impl MoveDraft {
    /// 创建普通走法
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        Self {
            start,
            end,
            promotion: None,
        }
    }

    /// 创建升变走法
    pub fn with_promotion(start: Coordinate, end: Coordinate, promotion: PieceType) -> Self {
        Self {
            start,
            end,
            promotion: Some(promotion),
        }
    }

    /// 最紧凑的文本形式：`1,7>2,8=Q`
    ///
    /// 升变前的 `=` 不可省略：多人对局中升变代码可能以玩家编号开头（如 `=3Q`），
    /// 没有 `=` 就无法与终点的 y 坐标区分。
    pub fn to_compact(&self) -> String {
        let mut compact = format!("{}>{}", self.start, self.end);
        if let Some(promotion) = self.promotion {
            compact.push('=');
            compact.push_str(&registry::encode(promotion));
        }
        compact
    }
}

impl std::fmt::Display for MoveDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_compact())
    }
}

/// 走法标记
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveFlags {
    /// 吃子
    pub capture: bool,
    /// 将军
    pub check: bool,
    /// 将死
    pub mate: bool,
}

/// 完整的走法记录
///
/// 反序列化时重新计算缓存的最紧凑形式，不信任输入中的值。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MoveRepr")]
pub struct Move {
    draft: MoveDraft,
    /// 走子的棋子类型
    pub piece: PieceType,
    pub flags: MoveFlags,
    /// 注释（不能包含 `}`）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// 走棋方走完这步后的剩余时间（毫秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_ms: Option<i64>,
    /// 缓存的最紧凑形式
    #[serde(skip)]
    compact: String,
}

/// `Move` 的序列化形式，不含缓存
#[derive(Deserialize)]
struct MoveRepr {
    draft: MoveDraft,
    piece: PieceType,
    #[serde(default)]
    flags: MoveFlags,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    clock_ms: Option<i64>,
}

impl From<MoveRepr> for Move {
    fn from(repr: MoveRepr) -> Self {
        let mut mv = Move::new(repr.piece, repr.draft).with_flags(repr.flags);
        mv.comment = repr.comment;
        mv.clock_ms = repr.clock_ms;
        mv
    }
}

impl Move {
    /// 创建新走法
    pub fn new(piece: PieceType, draft: MoveDraft) -> Self {
        let compact = draft.to_compact();
        Self {
            draft,
            piece,
            flags: MoveFlags::default(),
            comment: None,
            clock_ms: None,
            compact,
        }
    }

    /// 设置走法标记
    pub fn with_flags(mut self, flags: MoveFlags) -> Self {
        self.flags = flags;
        self
    }

    /// 设置注释
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// 设置剩余时间
    pub fn with_clock(mut self, clock_ms: i64) -> Self {
        self.clock_ms = Some(clock_ms);
        self
    }

    pub fn draft(&self) -> &MoveDraft {
        &self.draft
    }

    pub fn start(&self) -> &Coordinate {
        &self.draft.start
    }

    pub fn end(&self) -> &Coordinate {
        &self.draft.end
    }

    pub fn promotion(&self) -> Option<PieceType> {
        self.draft.promotion
    }

    /// 预先计算好的最紧凑形式
    pub fn compact(&self) -> &str {
        &self.compact
    }
}

/// 单步走法的简写样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortFormOptions {
    /// 省略棋子代码、`x`、`+`、`#`
    pub compact: bool,
    /// 各段之间加空格
    pub spaces: bool,
    /// 输出注释与时钟命令
    pub comments: bool,
}

impl ShortFormOptions {
    /// 最紧凑的样式
    pub const MOST_COMPACT: ShortFormOptions = ShortFormOptions {
        compact: true,
        spaces: false,
        comments: false,
    };

    /// 是否可以直接使用缓存的最紧凑形式
    pub fn is_most_compact(&self) -> bool {
        *self == Self::MOST_COMPACT
    }
}

impl Default for ShortFormOptions {
    fn default() -> Self {
        Self {
            compact: false,
            spaces: false,
            comments: true,
        }
    }
}

/// 按样式生成单步走法的简写
///
/// ```text
/// compact  => 1,7>2,8=Q
/// spaces   => P1,7 x 2,8 =Q +
/// comments => P1,7x2,8=Q+{[%clk 0:09:56.7] Capture, promotion, and a check!}
/// ```
pub fn short_form_move(mv: &Move, options: &ShortFormOptions) -> String {
    if options.is_most_compact() {
        warn!("最紧凑样式应直接使用 Move::compact()，无需重新编码");
    }

    let mut segments: Vec<String> = Vec::with_capacity(6);

    if options.compact {
        segments.push(mv.start().key());
        segments.push(">".to_string());
    } else {
        segments.push(format!("{}{}", registry::encode(mv.piece), mv.start()));
        let separator = if mv.flags.capture { "x" } else { ">" };
        segments.push(separator.to_string());
    }

    segments.push(mv.end().key());

    if let Some(promotion) = mv.promotion() {
        segments.push(format!("={}", registry::encode(promotion)));
    }

    if !options.compact && (mv.flags.mate || mv.flags.check) {
        let marker = if mv.flags.mate { "#" } else { "+" };
        segments.push(marker.to_string());
    }

    if options.comments {
        let comment = mv.comment.as_deref().filter(|c| !c.is_empty());
        if comment.is_some() || mv.clock_ms.is_some() {
            // 嵌入命令在前，注释文本在后
            let mut parts = Vec::with_capacity(2);
            if let Some(clock_ms) = mv.clock_ms {
                parts.push(clk_tag(clock_ms));
            }
            if let Some(comment) = comment {
                parts.push(comment.to_string());
            }
            segments.push(format!("{{{}}}", parts.join(" ")));
        }
    }

    let delimiter = if options.spaces { " " } else { "" };
    segments.join(delimiter)
}
