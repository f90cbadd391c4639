//! 局面简写的编码与解析
//!
//! 格式：以 `|` 连接的棋子条目 `<棋子代码><坐标键>[+]`，`+` 表示该棋子仍有特殊权利。
//!
//! 示例：`P5,6+|k15,-56|Q5000,1`

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coords::{Coordinate, COORD_SOURCE};
use crate::error::{IcnError, Result};
use crate::piece::PieceType;
use crate::registry::{self, PIECE_CODE_SOURCE};

lazy_static! {
    static ref PIECE_ENTRY_RE: Regex = Regex::new(&format!(
        r"(?P<piece>{p})(?P<coords>{c},{c})(?P<special>\+)?",
        p = PIECE_CODE_SOURCE,
        c = COORD_SOURCE,
    ))
    .unwrap();
}

/// 局面：坐标 → 棋子类型，保留插入顺序以便重新编码时结果确定
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<(Coordinate, PieceType)>", into = "Vec<(Coordinate, PieceType)>")]
pub struct Position {
    entries: Vec<(Coordinate, PieceType)>,
    index: HashMap<Coordinate, usize>,
}

impl Position {
    /// 创建空局面
    pub fn new() -> Self {
        Self::default()
    }

    /// 放置棋子，返回该格原有的棋子
    pub fn insert(&mut self, coords: Coordinate, piece: PieceType) -> Option<PieceType> {
        match self.index.get(&coords) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, piece)),
            None => {
                self.index.insert(coords.clone(), self.entries.len());
                self.entries.push((coords, piece));
                None
            }
        }
    }

    /// 获取指定格子的棋子
    pub fn get(&self, coords: &Coordinate) -> Option<PieceType> {
        self.index.get(coords).map(|&i| self.entries[i].1)
    }

    /// 移除指定格子的棋子，其余棋子保持原有顺序
    pub fn remove(&mut self, coords: &Coordinate) -> Option<PieceType> {
        let removed = self.index.remove(coords)?;
        let (_, piece) = self.entries.remove(removed);
        for (i, (coords, _)) in self.entries.iter().enumerate().skip(removed) {
            self.index.insert(coords.clone(), i);
        }
        Some(piece)
    }

    pub fn contains(&self, coords: &Coordinate) -> bool {
        self.index.contains_key(coords)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按插入顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&Coordinate, PieceType)> {
        self.entries.iter().map(|(coords, piece)| (coords, *piece))
    }
}

/// 作为集合比较，不考虑插入顺序
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(coords, piece)| other.get(coords) == Some(piece))
    }
}

impl Eq for Position {}

impl FromIterator<(Coordinate, PieceType)> for Position {
    fn from_iter<I: IntoIterator<Item = (Coordinate, PieceType)>>(iter: I) -> Self {
        let mut position = Position::new();
        for (coords, piece) in iter {
            position.insert(coords, piece);
        }
        position
    }
}

/// 与文本解析一致，重复的格子视为错误
impl TryFrom<Vec<(Coordinate, PieceType)>> for Position {
    type Error = IcnError;

    fn try_from(entries: Vec<(Coordinate, PieceType)>) -> Result<Self> {
        let mut position = Position::new();
        for (coords, piece) in entries {
            let key = coords.key();
            if position.insert(coords, piece).is_some() {
                return Err(IcnError::MalformedPositionText {
                    text: key,
                    reason: "duplicate square".to_string(),
                });
            }
        }
        Ok(position)
    }
}

impl From<Position> for Vec<(Coordinate, PieceType)> {
    fn from(position: Position) -> Self {
        position.entries
    }
}

/// 仍保有特殊权利（兵的双步、易位）的格子集合
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialRights(HashSet<Coordinate>);

impl SpecialRights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, coords: Coordinate) -> bool {
        self.0.insert(coords)
    }

    pub fn contains(&self, coords: &Coordinate) -> bool {
        self.0.contains(coords)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coordinate> {
        self.0.iter()
    }
}

impl FromIterator<Coordinate> for SpecialRights {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// 局面编码
pub struct PositionCodec;

impl PositionCodec {
    /// 将局面与特殊权利编码为简写
    pub fn to_string(position: &Position, special_rights: &SpecialRights) -> String {
        position
            .iter()
            .map(|(coords, piece)| {
                let marker = if special_rights.contains(coords) { "+" } else { "" };
                format!("{}{}{}", registry::encode(piece), coords, marker)
            })
            .collect::<Vec<_>>()
            .join("|")
    }

    /// 解析局面简写
    ///
    /// 在整个字符串中查找棋子条目而不是按 `|` 拆分，条目之间的分隔符可以是任意字符。
    pub fn parse(text: &str) -> Result<(Position, SpecialRights)> {
        let mut position = Position::new();
        let mut special_rights = SpecialRights::new();

        for captures in PIECE_ENTRY_RE.captures_iter(text) {
            let entry = captures.get(0).map_or("", |m| m.as_str());
            let piece = registry::decode(&captures["piece"])?;
            let coords = Coordinate::from_key(&captures["coords"])?;

            if !coords.is_finite() {
                return Err(IcnError::InfiniteCoordinate {
                    text: entry.to_string(),
                });
            }

            if captures.name("special").is_some() {
                special_rights.insert(coords.clone());
            }

            if position.insert(coords, piece).is_some() {
                return Err(IcnError::MalformedPositionText {
                    text: entry.to_string(),
                    reason: "duplicate square".to_string(),
                });
            }
        }

        debug!(
            "解析局面: {} 个棋子，{} 个特殊权利",
            position.len(),
            special_rights.len()
        );
        Ok((position, special_rights))
    }
}
