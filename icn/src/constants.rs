//! ICN 常量定义

use crate::piece::RawType;

/// 元数据标签的规范顺序，未列出的键排在这些键之后
pub const METADATA_KEY_ORDERING: [&str; 13] = [
    "Event",
    "Site",
    "Variant",
    "Round",
    "UTCDate",
    "UTCTime",
    "TimeControl",
    "White",
    "Black",
    "WhiteID",
    "BlackID",
    "Result",
    "Termination",
];

/// 不走通用元数据路径的游戏规则键（各有专门的编码）
pub const EXCLUDED_GAMERULES: [&str; 5] = [
    "promotionRanks",
    "promotionsAllowed",
    "winConditions",
    "turnOrder",
    "moveRule",
];

/// 未指定时默认允许的升变种类
pub const DEFAULT_PROMOTIONS: [RawType; 4] = [
    RawType::Queen,
    RawType::Rook,
    RawType::Bishop,
    RawType::Knight,
];

/// 默认胜利条件
pub const DEFAULT_WIN_CONDITION: &str = "checkmate";

/// 行棋顺序中玩家代码之间的分隔符
pub const TURN_ORDER_DELIMITER: char = ':';
