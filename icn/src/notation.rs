//! 走法简写的解析
//!
//! 两套语法：
//! - 最紧凑语法 `<起点>><终点>[=<升变代码>]`，必须完整匹配，使用预编译正则；
//! - 宽松语法，允许可选的棋子代码、各段之间的空格、`>` 或 `x` 分隔符、
//!   升变、`+`/`#` 标记、`!?` 之类的符号以及 `{...}` 注释。
//!
//! 宽松语法的可选段较多，用手写扫描器实现。扫描器对每个可选段都是
//! 「整段匹配成功才前进」，与回溯正则的贪婪语义一致。

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::coords::{Coordinate, COORD_SOURCE};
use crate::error::{IcnError, Result};
use crate::moves::MoveDraft;
use crate::registry::{self, PIECE_CODE_SOURCE};

lazy_static! {
    static ref COMPACT_MOVE_RE: Regex = Regex::new(&format!(
        "^(?P<start>{c},{c})>(?P<end>{c},{c})(?:=(?P<promotion>{p}))?$",
        c = COORD_SOURCE,
        p = PIECE_CODE_SOURCE,
    ))
    .unwrap();
}

/// 从任意简写形式中解析出的走法
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMove {
    pub draft: MoveDraft,
    /// 原样保留的注释内容（不含花括号），可能包含嵌入命令
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// 解析最紧凑形式的走法 `1,7>2,8=Q`
pub fn parse_compact_move(text: &str) -> Result<MoveDraft> {
    let captures = COMPACT_MOVE_RE
        .captures(text)
        .ok_or_else(|| IcnError::move_text(text))?;
    let matched = MoveMatch {
        start: captures.name("start").map_or("", |m| m.as_str()),
        end: captures.name("end").map_or("", |m| m.as_str()),
        promotion: captures.name("promotion").map(|m| m.as_str()),
        comment: None,
    };
    Ok(matched.into_parsed(text)?.draft)
}

/// 解析任意样式的单步走法，整个字符串必须恰好是一步走法
pub fn parse_short_form_move(text: &str) -> Result<ParsedMove> {
    match scan_move(text, 0) {
        Some((matched, end)) if end == text.len() => matched.into_parsed(text),
        _ => Err(IcnError::move_text(text)),
    }
}

/// 在整个字符串中依次查找互不重叠的走法
///
/// 不按分隔符拆分：每步走法的格式是自描述的，各种样式之间没有统一可靠的分隔符。
pub(crate) fn scan_moves(text: &str) -> Result<Vec<ParsedMove>> {
    let mut moves = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        match scan_move(text, pos) {
            Some((matched, end)) => {
                moves.push(matched.into_parsed(&text[pos..end])?);
                pos = end;
            }
            None => pos += 1,
        }
    }
    Ok(moves)
}

/// 一次语法匹配中各命名段对应的子串
struct MoveMatch<'a> {
    start: &'a str,
    end: &'a str,
    promotion: Option<&'a str>,
    comment: Option<&'a str>,
}

impl MoveMatch<'_> {
    /// 转换为走法，检查坐标是否有限、升变代码是否存在
    fn into_parsed(self, source: &str) -> Result<ParsedMove> {
        let start = Coordinate::from_key(self.start)?;
        let end = Coordinate::from_key(self.end)?;

        if !start.is_finite() || !end.is_finite() {
            return Err(IcnError::InfiniteCoordinate {
                text: source.to_string(),
            });
        }

        let promotion = self.promotion.map(registry::decode).transpose()?;

        Ok(ParsedMove {
            draft: MoveDraft {
                start,
                end,
                promotion,
            },
            comment: self.comment.map(str::to_string),
        })
    }
}

/// 从 `from` 处尝试匹配一步宽松语法的走法，返回匹配结果与结束位置
fn scan_move(text: &str, from: usize) -> Option<(MoveMatch<'_>, usize)> {
    let mut cursor = Cursor::new(text, from);

    // 可选的棋子代码，解析但不使用：走子的棋子由调用方从局面中恢复
    let start = {
        let save = cursor.pos;
        match cursor.piece_code().and_then(|_| cursor.coords_key()) {
            Some(span) => span,
            None => {
                cursor.pos = save;
                cursor.coords_key()?
            }
        }
    };

    cursor.space();
    if !cursor.eat(b'>') && !cursor.eat(b'x') {
        return None;
    }
    cursor.space();
    let end = cursor.coords_key()?;
    cursor.space();

    let promotion = {
        let save = cursor.pos;
        let code = if cursor.eat(b'=') {
            cursor.piece_code()
        } else {
            None
        };
        if code.is_none() {
            cursor.pos = save;
        }
        code
    };
    cursor.space();

    if !cursor.eat(b'+') {
        cursor.eat(b'#');
    }
    cursor.space();

    // 符号 !?、?!、!!、!、?，不做解释
    if cursor.eat_any(b"!?") {
        cursor.eat_any(b"!?");
    }
    cursor.space();

    let comment = cursor.comment();

    let matched = MoveMatch {
        start: cursor.slice(start),
        end: cursor.slice(end),
        promotion: promotion.map(|span| cursor.slice(span)),
        comment: comment.map(|span| cursor.slice(span)),
    };
    Some((matched, cursor.pos))
}

/// 子串范围 `[start, end)`
type Span = (usize, usize);

/// 字节游标，每个方法失败时不移动位置
struct Cursor<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str, pos: usize) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn slice(&self, (start, end): Span) -> &'a str {
        &self.text[start..end]
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_any(&mut self, set: &[u8]) -> bool {
        match self.peek() {
            Some(byte) if set.contains(&byte) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// 可选的单个空格
    fn space(&mut self) {
        self.eat(b' ');
    }

    /// `0|[1-9][0-9]*`
    fn natural(&mut self) -> bool {
        if self.eat(b'0') {
            return true;
        }
        if self.peek().is_some_and(|b| (b'1'..=b'9').contains(&b)) {
            self.eat_while(|b| b.is_ascii_digit());
            return true;
        }
        false
    }

    /// `0|-?[1-9][0-9]*`
    fn integer(&mut self) -> bool {
        if self.eat(b'0') {
            return true;
        }
        let save = self.pos;
        self.eat(b'-');
        if self.peek().is_some_and(|b| (b'1'..=b'9').contains(&b)) {
            self.eat_while(|b| b.is_ascii_digit());
            true
        } else {
            self.pos = save;
            false
        }
    }

    /// 坐标键 `x,y`
    fn coords_key(&mut self) -> Option<Span> {
        let start = self.pos;
        if self.integer() && self.eat(b',') && self.integer() {
            Some((start, self.pos))
        } else {
            self.pos = start;
            None
        }
    }

    /// 棋子代码：可选的玩家编号 + 至少一个字母
    fn piece_code(&mut self) -> Option<Span> {
        let start = self.pos;
        self.natural();
        if self.eat_while(|b| b.is_ascii_alphabetic()) > 0 {
            Some((start, self.pos))
        } else {
            self.pos = start;
            None
        }
    }

    /// `{...}` 注释，内容非空且不含 `}`，返回花括号内的范围
    fn comment(&mut self) -> Option<Span> {
        let save = self.pos;
        if !self.eat(b'{') {
            return None;
        }
        let start = self.pos;
        let len = self.eat_while(|b| b != b'}');
        if len > 0 && self.eat(b'}') {
            Some((start, start + len))
        } else {
            self.pos = save;
            None
        }
    }
}
