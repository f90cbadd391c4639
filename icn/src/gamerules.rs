//! 游戏规则相关的词汇：行棋顺序、默认升变、默认胜利条件

use std::collections::BTreeMap;

use crate::constants::{
    DEFAULT_PROMOTIONS, DEFAULT_WIN_CONDITION, EXCLUDED_GAMERULES, TURN_ORDER_DELIMITER,
};
use crate::error::{IcnError, Result};
use crate::piece::{Player, RawType};

/// 行棋顺序编码为 `w:b`
pub fn turn_order_to_string(turn_order: &[Player]) -> String {
    turn_order
        .iter()
        .map(|player| player.code())
        .collect::<Vec<_>>()
        .join(&TURN_ORDER_DELIMITER.to_string())
}

/// 解析行棋顺序
pub fn parse_turn_order(text: &str) -> Result<Vec<Player>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(TURN_ORDER_DELIMITER)
        .map(|code| {
            Player::from_code(code).ok_or_else(|| IcnError::InvalidPlayerCode {
                code: code.to_string(),
            })
        })
        .collect()
}

/// 升变列表是否正好是默认的那几种（不计顺序）
pub fn is_default_promotion_list(promotions: &[RawType]) -> bool {
    promotions.len() == DEFAULT_PROMOTIONS.len()
        && DEFAULT_PROMOTIONS
            .iter()
            .all(|raw| promotions.contains(raw))
}

/// 默认胜利条件：双方都以将死取胜
pub fn default_win_conditions() -> BTreeMap<Player, Vec<String>> {
    [Player::White, Player::Black]
        .into_iter()
        .map(|player| (player, vec![DEFAULT_WIN_CONDITION.to_string()]))
        .collect()
}

/// 该键是否有专门的编码，不能作为通用元数据输出
pub fn is_excluded_gamerule(key: &str) -> bool {
    EXCLUDED_GAMERULES.contains(&key)
}
