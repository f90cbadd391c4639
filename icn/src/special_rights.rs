//! 由初始局面推导特殊权利

use std::collections::HashMap;

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::coords::Coordinate;
use crate::error::{IcnError, Result};
use crate::piece::{Player, RawType};
use crate::position::{Position, SpecialRights};

/// 易位要求王与伙伴之间的最小横向距离
pub const MIN_CASTLE_DISTANCE: u32 = 3;

/// 特殊权利规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialRightsRules {
    /// 兵可以走两步
    pub pawn_double_push: bool,
    /// 易位伙伴的棋子种类，`None` 表示不允许易位
    #[serde(skip_serializing_if = "Option::is_none")]
    pub castle_with: Option<RawType>,
}

impl Default for SpecialRightsRules {
    fn default() -> Self {
        Self {
            pawn_double_push: true,
            castle_with: Some(RawType::Rook),
        }
    }
}

/// 推导初始局面中所有仍有特殊权利的格子
///
/// 所有兵获得双步权利；所有跳跃王获得易位权利；易位伙伴只有在同一行、
/// 同一方、且与某个王相距至少 3 格时才获得权利，按发现顺序找到第一个满足条件的王即停止。
pub fn generate_special_rights(
    position: &Position,
    rules: &SpecialRightsRules,
) -> Result<SpecialRights> {
    if let Some(raw) = rules.castle_with {
        if !raw.can_castle_with() {
            return Err(IcnError::InvalidCastlePartner {
                raw: raw.to_string(),
            });
        }
    }

    let mut special_rights = SpecialRights::new();
    if !rules.pawn_double_push && rules.castle_with.is_none() {
        return Ok(special_rights);
    }

    let mut royals: Vec<(Player, &Coordinate)> = Vec::new();
    let mut partners: HashMap<Player, Vec<&Coordinate>> = HashMap::new();

    for (coords, piece) in position.iter() {
        let (raw, player) = piece.split();
        if raw == RawType::Pawn {
            if rules.pawn_double_push {
                special_rights.insert(coords.clone());
            }
        } else if rules.castle_with.is_some() && raw.is_jumping_royal() {
            special_rights.insert(coords.clone());
            royals.push((player, coords));
        } else if rules.castle_with == Some(raw) {
            partners.entry(player).or_default().push(coords);
        }
    }

    if royals.is_empty() {
        return Ok(special_rights);
    }

    let min_distance = BigInt::from(MIN_CASTLE_DISTANCE);
    for (player, candidates) in &partners {
        for coords in candidates {
            let qualified = royals.iter().any(|(royal_player, royal)| {
                royal_player == player
                    && royal.y == coords.y
                    && royal.x_distance(coords) >= min_distance
            });
            if qualified {
                special_rights.insert((*coords).clone());
            }
        }
    }

    Ok(special_rights)
}
