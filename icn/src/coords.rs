//! 坐标定义
//!
//! 无限棋盘上的坐标是一对任意精度整数。规范文本形式（坐标键）为 `x,y`，
//! 不允许 `-0`，非零数值不允许前导零。

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::error::{IcnError, Result};

/// 单个坐标分量的正则片段
pub(crate) const COORD_SOURCE: &str = r"(?:0|-?[1-9][0-9]*)";

/// 棋盘坐标
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Coordinate {
    pub x: BigInt,
    pub y: BigInt,
}

impl Coordinate {
    /// 创建新坐标
    pub fn new(x: impl Into<BigInt>, y: impl Into<BigInt>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    /// 规范坐标键 `x,y`
    pub fn key(&self) -> String {
        format!("{},{}", self.x, self.y)
    }

    /// 从规范坐标键解析
    pub fn from_key(key: &str) -> Result<Self> {
        let malformed = || IcnError::MalformedCoordinate {
            text: key.to_string(),
        };
        let (x, y) = key.split_once(',').ok_or_else(malformed)?;
        let x = parse_component(x).ok_or_else(malformed)?;
        let y = parse_component(y).ok_or_else(malformed)?;
        Ok(Self { x, y })
    }

    /// 两个分量是否都能以有限的双精度浮点数表示
    ///
    /// 渲染与联机等协作方以浮点数交换坐标，超出范围的值在那里会变成无穷大。
    pub fn is_finite(&self) -> bool {
        is_finite_component(&self.x) && is_finite_component(&self.y)
    }

    /// 与另一坐标的横向距离
    pub fn x_distance(&self, other: &Coordinate) -> BigInt {
        (&self.x - &other.x).abs()
    }
}

fn is_finite_component(value: &BigInt) -> bool {
    value.to_f64().map_or(false, f64::is_finite)
}

/// 解析单个分量：`0` 或 `-?[1-9][0-9]*`
fn parse_component(text: &str) -> Option<BigInt> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let canonical = match digits.as_bytes() {
        [b'0'] => digits.len() == text.len(),
        [first, rest @ ..] => {
            (b'1'..=b'9').contains(first) && rest.iter().all(u8::is_ascii_digit)
        }
        [] => false,
    };
    if !canonical {
        return None;
    }
    text.parse().ok()
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Coordinate {
    type Err = IcnError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_key(s)
    }
}

impl From<Coordinate> for String {
    fn from(coords: Coordinate) -> String {
        coords.key()
    }
}

impl TryFrom<String> for Coordinate {
    type Error = IcnError;

    fn try_from(key: String) -> Result<Self> {
        Self::from_key(&key)
    }
}
