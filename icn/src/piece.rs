//! 棋子定义
//!
//! 棋子类型由「原始种类」与「所属玩家」组合而成，内部可打包为一个整数：
//! `raw * Player::COUNT + player`，并可无损拆分回两部分。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{IcnError, Result};

/// 玩家（阵营）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// 中立（障碍物、虚空）
    Neutral = 0,
    /// 白方
    White = 1,
    /// 黑方
    Black = 2,
    /// 红方（多人对局）
    Red = 3,
    /// 蓝方（多人对局）
    Blue = 4,
    /// 黄方（多人对局）
    Yellow = 5,
    /// 绿方（多人对局）
    Green = 6,
}

impl Player {
    /// 玩家总数
    pub const COUNT: u16 = 7;

    /// 所有玩家，按编号排列
    pub const ALL: [Player; 7] = [
        Player::Neutral,
        Player::White,
        Player::Black,
        Player::Red,
        Player::Blue,
        Player::Yellow,
        Player::Green,
    ];

    /// 玩家编号（出现在多人棋子代码的前缀中，如 `3k`）
    pub fn number(self) -> u32 {
        self as u32
    }

    /// 从玩家编号解析
    pub fn from_number(number: u32) -> Option<Player> {
        Self::ALL.get(number as usize).copied()
    }

    /// 1-2 个字母的玩家代码，用于描述行棋顺序
    pub fn code(self) -> &'static str {
        match self {
            Player::Neutral => "n",
            Player::White => "w",
            Player::Black => "b",
            Player::Red => "r",
            Player::Blue => "bu",
            Player::Yellow => "y",
            Player::Green => "g",
        }
    }

    /// 从玩家代码解析
    pub fn from_code(code: &str) -> Option<Player> {
        Self::ALL.iter().copied().find(|player| player.code() == code)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Player::Neutral => "neutral",
            Player::White => "white",
            Player::Black => "black",
            Player::Red => "red",
            Player::Blue => "blue",
            Player::Yellow => "yellow",
            Player::Green => "green",
        };
        f.write_str(name)
    }
}

/// 原始棋子种类（不含所属玩家）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawType {
    King,
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    Amazon,
    Hawk,
    Chancellor,
    Archbishop,
    Guard,
    Camel,
    Giraffe,
    Zebra,
    Centaur,
    RoyalQueen,
    RoyalCentaur,
    Knightrider,
    Huygen,
    Rose,
    /// 障碍物，只属于中立方
    Obstacle,
    /// 虚空，只属于中立方
    Void,
}

impl RawType {
    /// 种类总数
    pub const COUNT: u16 = 22;

    /// 所有种类，按内部编号排列
    pub const ALL: [RawType; 22] = [
        RawType::King,
        RawType::Pawn,
        RawType::Knight,
        RawType::Bishop,
        RawType::Rook,
        RawType::Queen,
        RawType::Amazon,
        RawType::Hawk,
        RawType::Chancellor,
        RawType::Archbishop,
        RawType::Guard,
        RawType::Camel,
        RawType::Giraffe,
        RawType::Zebra,
        RawType::Centaur,
        RawType::RoyalQueen,
        RawType::RoyalCentaur,
        RawType::Knightrider,
        RawType::Huygen,
        RawType::Rose,
        RawType::Obstacle,
        RawType::Void,
    ];

    /// 不带玩家信息的小写代码
    pub fn code(self) -> &'static str {
        match self {
            RawType::King => "k",
            RawType::Pawn => "p",
            RawType::Knight => "n",
            RawType::Bishop => "b",
            RawType::Rook => "r",
            RawType::Queen => "q",
            RawType::Amazon => "am",
            RawType::Hawk => "ha",
            RawType::Chancellor => "ch",
            RawType::Archbishop => "ar",
            RawType::Guard => "gu",
            RawType::Camel => "ca",
            RawType::Giraffe => "gi",
            RawType::Zebra => "ze",
            RawType::Centaur => "ce",
            RawType::RoyalQueen => "rq",
            RawType::RoyalCentaur => "rc",
            RawType::Knightrider => "nr",
            RawType::Huygen => "hu",
            RawType::Rose => "ro",
            RawType::Obstacle => "ob",
            RawType::Void => "vo",
        }
    }

    /// 是否只能属于中立方
    pub fn is_neutral_only(self) -> bool {
        matches!(self, RawType::Obstacle | RawType::Void)
    }

    /// 是否为可发起易位的「跳跃王」
    pub fn is_jumping_royal(self) -> bool {
        matches!(self, RawType::King | RawType::RoyalCentaur)
    }

    /// 是否可以作为易位伙伴
    pub fn can_castle_with(self) -> bool {
        matches!(self, RawType::Rook | RawType::Guard)
    }

    fn from_index(index: u16) -> Option<RawType> {
        Self::ALL.get(index as usize).copied()
    }
}

impl fmt::Display for RawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // serde 的小写名与调试输出保持一致
        let name = format!("{:?}", self).to_lowercase();
        f.write_str(&name)
    }
}

/// 棋子类型：原始种类 + 所属玩家
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct PieceType {
    raw: RawType,
    player: Player,
}

impl PieceType {
    /// 创建棋子类型，中立专属种类只能属于中立方
    pub fn new(raw: RawType, player: Player) -> Result<Self> {
        if raw.is_neutral_only() && player != Player::Neutral {
            return Err(IcnError::piece_code(format!(
                "{}{}",
                player.number(),
                raw.code()
            )));
        }
        Ok(Self { raw, player })
    }

    pub fn raw(&self) -> RawType {
        self.raw
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// 拆分为原始种类与玩家
    pub fn split(&self) -> (RawType, Player) {
        (self.raw, self.player)
    }

    /// 打包为整数
    pub fn to_int(&self) -> u16 {
        self.raw as u16 * Player::COUNT + self.player as u16
    }

    /// 从整数解包
    pub fn from_int(value: u16) -> Result<Self> {
        let raw = RawType::from_index(value / Player::COUNT);
        let player = Player::from_number(u32::from(value % Player::COUNT));
        match (raw, player) {
            (Some(raw), Some(player)) => Self::new(raw, player),
            _ => Err(IcnError::piece_code(value.to_string())),
        }
    }

    /// 所有合法的棋子类型
    pub fn all() -> impl Iterator<Item = PieceType> {
        RawType::ALL.into_iter().flat_map(|raw| {
            Player::ALL
                .into_iter()
                .filter_map(move |player| PieceType::new(raw, player).ok())
        })
    }
}

impl TryFrom<u16> for PieceType {
    type Error = IcnError;

    fn try_from(value: u16) -> Result<Self> {
        Self::from_int(value)
    }
}

impl From<PieceType> for u16 {
    fn from(piece: PieceType) -> u16 {
        piece.to_int()
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.raw, self.player)
    }
}
