//! 无限象棋记谱法（ICN）编解码库
//!
//! 包含:
//! - 棋子类型与棋子代码 (PieceType, registry)
//! - 任意精度坐标 (Coordinate)
//! - 单步走法与走法列表的简写 (Move, MoveListStyle)
//! - 局面简写与特殊权利推导 (PositionCodec, generate_special_rights)
//! - 时钟嵌入命令 (clk_tag)
//! - 对局元数据与游戏规则词汇 (GameMetadata, gamerules)

mod clock;
mod constants;
mod coords;
mod error;
pub mod gamerules;
mod metadata;
mod movelist;
mod moves;
mod notation;
mod piece;
mod position;
pub mod registry;
mod special_rights;

pub use clock::{clk_tag, ZERO_CLOCK_TAG};
pub use constants::*;
pub use coords::Coordinate;
pub use error::{IcnError, Result};
pub use metadata::GameMetadata;
pub use movelist::{parse_short_form_moves, short_form_moves, MoveListStyle};
pub use moves::{short_form_move, Move, MoveDraft, MoveFlags, ShortFormOptions};
pub use notation::{parse_compact_move, parse_short_form_move, ParsedMove};
pub use piece::{PieceType, Player, RawType};
pub use position::{Position, PositionCodec, SpecialRights};
pub use special_rights::{generate_special_rights, SpecialRightsRules, MIN_CASTLE_DISTANCE};
