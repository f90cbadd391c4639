//! 棋子代码表
//!
//! 白方与黑方的标准棋子使用固定的 1-2 个字母代码（白方大写，黑方小写），
//! 中立专属种类使用不带前缀的小写代码，其余组合编码为 `<玩家编号><小写代码>`，
//! 例如红方（3 号玩家）的王为 `3k`。
//!
//! 两个方向的映射都从 [`RawType::code`] 一张表机械生成，构建时检查冲突。

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{IcnError, Result};
use crate::piece::{PieceType, Player, RawType};

/// 棋子代码的正则片段：可选的玩家编号（不允许负数与前导零）+ 字母
pub(crate) const PIECE_CODE_SOURCE: &str = r"(?:0|[1-9][0-9]*)?[A-Za-z]+";

lazy_static! {
    static ref REGISTRY: TypeRegistry = TypeRegistry::build();
    static ref PIECE_CODE_RE: Regex =
        Regex::new(r"^(?P<player>0|[1-9][0-9]*)?(?P<abbrev>[A-Za-z]+)$").unwrap();
}

/// 双向代码表
struct TypeRegistry {
    standard_codes: HashMap<PieceType, String>,
    standard_types: HashMap<String, PieceType>,
    raw_types: HashMap<&'static str, RawType>,
}

impl TypeRegistry {
    fn build() -> Self {
        let mut registry = TypeRegistry {
            standard_codes: HashMap::new(),
            standard_types: HashMap::new(),
            raw_types: HashMap::new(),
        };

        for raw in RawType::ALL {
            if registry.raw_types.insert(raw.code(), raw).is_some() {
                panic!("Duplicate raw piece code: {}", raw.code());
            }

            if raw.is_neutral_only() {
                registry.register(raw, Player::Neutral, raw.code().to_string());
            } else {
                registry.register(raw, Player::White, raw.code().to_ascii_uppercase());
                registry.register(raw, Player::Black, raw.code().to_string());
            }
        }

        registry
    }

    fn register(&mut self, raw: RawType, player: Player, code: String) {
        let piece = match PieceType::new(raw, player) {
            Ok(piece) => piece,
            Err(e) => panic!("Invalid standard piece type: {}", e),
        };
        if let Some(existing) = self.standard_types.insert(code.clone(), piece) {
            panic!("Piece code {} assigned to both {} and {}", code, existing, piece);
        }
        if self.standard_codes.insert(piece, code).is_some() {
            panic!("Piece type {} registered twice", piece);
        }
    }
}

/// 获取棋子类型的代码
///
/// ```text
/// pawn(white) => "P"
/// queen(black) => "q"
/// king(red) => "3k"
/// ```
pub fn encode(piece: PieceType) -> String {
    match REGISTRY.standard_codes.get(&piece) {
        Some(code) => code.clone(),
        None => format!("{}{}", piece.player().number(), piece.raw().code()),
    }
}

/// 从代码解析棋子类型
///
/// 没有玩家编号前缀时查标准表；有前缀时按原始种类代码（不区分大小写）解析，
/// 前缀覆盖颜色。
pub fn decode(code: &str) -> Result<PieceType> {
    let captures = PIECE_CODE_RE
        .captures(code)
        .ok_or_else(|| IcnError::piece_code(code))?;
    let abbrev = &captures["abbrev"];

    match captures.name("player") {
        None => REGISTRY
            .standard_types
            .get(abbrev)
            .copied()
            .ok_or_else(|| IcnError::piece_code(code)),
        Some(player) => {
            let raw = decode_raw(&abbrev.to_ascii_lowercase())
                .map_err(|_| IcnError::piece_code(code))?;
            let player = player
                .as_str()
                .parse::<u32>()
                .ok()
                .and_then(Player::from_number)
                .ok_or_else(|| IcnError::piece_code(code))?;
            PieceType::new(raw, player).map_err(|_| IcnError::piece_code(code))
        }
    }
}

/// 从原始种类代码解析（如 `r`、`gu`）
pub fn decode_raw(code: &str) -> Result<RawType> {
    REGISTRY
        .raw_types
        .get(code)
        .copied()
        .ok_or_else(|| IcnError::piece_code(code))
}
