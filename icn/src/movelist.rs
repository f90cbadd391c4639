//! 走法列表的编码与解析
//!
//! 带回合编号的示例（compact = false, spaces = true, comments = true, fullmove = 1）：
//!
//! ```text
//! 1. P4,2 > 4,4 | p4,7 > 4,6
//! 2. P4,4 > 4,5 | p3,7 > 3,5
//! 3. P4,5 x 3,6 {White captures en passant} | b6,8 > 3,11
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::moves::{short_form_move, Move, ShortFormOptions};
use crate::notation::{self, ParsedMove};
use crate::piece::Player;

/// 走法列表样式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveListStyle {
    /// 不带回合编号
    Plain {
        options: ShortFormOptions,
    },
    /// 带回合编号
    Numbered {
        options: ShortFormOptions,
        /// 行棋顺序，走完一轮回合编号加一
        turn_order: Vec<Player>,
        /// 起始回合编号
        fullmove: u32,
        /// 回合之间换行（否则用一个空格）
        make_new_lines: bool,
    },
}

impl MoveListStyle {
    /// 最紧凑、不带编号的样式：`1,2>3,4|5,6>7,8=N`
    pub fn most_compact() -> Self {
        MoveListStyle::Plain {
            options: ShortFormOptions::MOST_COMPACT,
        }
    }

    /// 标准双人对局的带编号样式
    pub fn numbered(options: ShortFormOptions, fullmove: u32, make_new_lines: bool) -> Self {
        MoveListStyle::Numbered {
            options,
            turn_order: vec![Player::White, Player::Black],
            fullmove,
            make_new_lines,
        }
    }
}

impl Default for MoveListStyle {
    fn default() -> Self {
        Self::numbered(
            ShortFormOptions {
                compact: false,
                spaces: true,
                comments: true,
            },
            1,
            true,
        )
    }
}

/// 将走法列表编码为一个字符串
pub fn short_form_moves(moves: &[Move], style: &MoveListStyle) -> String {
    match style {
        MoveListStyle::Plain { options } if options.is_most_compact() => {
            // 直接使用缓存的最紧凑形式
            moves.iter().map(Move::compact).collect::<Vec<_>>().join("|")
        }
        MoveListStyle::Plain { options } => {
            let delimiter = if options.spaces { " | " } else { "|" };
            moves
                .iter()
                .map(|mv| short_form_move(mv, options))
                .collect::<Vec<_>>()
                .join(delimiter)
        }
        MoveListStyle::Numbered {
            options,
            turn_order,
            fullmove,
            make_new_lines,
        } => numbered_moves(moves, options, turn_order, *fullmove, *make_new_lines),
    }
}

fn numbered_moves(
    moves: &[Move],
    options: &ShortFormOptions,
    turn_order: &[Player],
    fullmove: u32,
    make_new_lines: bool,
) -> String {
    // 空的行棋顺序按单人轮转处理
    let cycle = turn_order.len().max(1);
    let most_compact = options.is_most_compact();

    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();

    for (i, mv) in moves.iter().enumerate() {
        let turn_index = i % cycle;

        if turn_index == 0 {
            let number = (i / cycle) as u64 + u64::from(fullmove);
            line.push_str(&format!("{}. ", number));
        } else {
            line.push_str(" | ");
        }

        if most_compact {
            line.push_str(mv.compact());
        } else {
            line.push_str(&short_form_move(mv, options));
        }

        if turn_index == cycle - 1 {
            lines.push(std::mem::take(&mut line));
        }
    }

    // 最后一轮未走完也要输出
    if !line.is_empty() {
        lines.push(line);
    }

    let delimiter = if make_new_lines { "\n" } else { " " };
    lines.join(delimiter)
}

/// 解析任意样式的走法列表
///
/// 任何一步解析失败都会让整个列表失败，不返回部分结果。
pub fn parse_short_form_moves(text: &str) -> Result<Vec<ParsedMove>> {
    let moves = notation::scan_moves(text)?;
    debug!("解析走法列表: {} 步，{} 字节", moves.len(), text.len());
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Coordinate;
    use crate::moves::{MoveDraft, MoveFlags};
    use crate::piece::{PieceType, RawType};

    fn piece(raw: RawType, player: Player) -> PieceType {
        PieceType::new(raw, player).unwrap()
    }

    fn simple(raw: RawType, player: Player, from: (i64, i64), to: (i64, i64)) -> Move {
        Move::new(
            piece(raw, player),
            MoveDraft::new(Coordinate::new(from.0, from.1), Coordinate::new(to.0, to.1)),
        )
    }

    fn sample_game() -> Vec<Move> {
        vec![
            simple(RawType::Pawn, Player::White, (4, 2), (4, 4)),
            simple(RawType::Pawn, Player::Black, (4, 7), (4, 6)),
            simple(RawType::Pawn, Player::White, (4, 4), (4, 5)),
            simple(RawType::Pawn, Player::Black, (3, 7), (3, 5)),
            simple(RawType::Pawn, Player::White, (4, 5), (3, 6))
                .with_flags(MoveFlags {
                    capture: true,
                    ..MoveFlags::default()
                })
                .with_comment("White captures en passant"),
        ]
    }

    /// 多人对局：带玩家编号的棋子、升变、吃子、将死与时钟
    fn promotion_game() -> Vec<Move> {
        let red_promotion = MoveDraft::with_promotion(
            Coordinate::new(2, 7),
            Coordinate::new(3, 8),
            piece(RawType::Queen, Player::Red),
        );
        let neutral_amazon = MoveDraft::with_promotion(
            Coordinate::new(1, 7),
            Coordinate::new(1, 8),
            piece(RawType::Amazon, Player::Neutral),
        );
        vec![
            Move::new(piece(RawType::Pawn, Player::Red), red_promotion)
                .with_flags(MoveFlags {
                    capture: true,
                    check: true,
                    mate: true,
                })
                .with_clock(596_650)
                .with_comment("Mate by promotion"),
            Move::new(piece(RawType::Pawn, Player::White), neutral_amazon)
                .with_flags(MoveFlags {
                    check: true,
                    ..MoveFlags::default()
                })
                .with_clock(100),
            simple(RawType::Knightrider, Player::Green, (-4, -4), (100, 100)),
            simple(RawType::King, Player::Black, (5, 8), (-7, 8)).with_comment("Castling"),
        ]
    }

    #[test]
    fn test_most_compact_list() {
        let moves = sample_game();
        assert_eq!(
            short_form_moves(&moves, &MoveListStyle::most_compact()),
            "4,2>4,4|4,7>4,6|4,4>4,5|3,7>3,5|4,5>3,6"
        );
    }

    #[test]
    fn test_plain_styled_list() {
        let moves = sample_game();
        let style = MoveListStyle::Plain {
            options: ShortFormOptions {
                compact: false,
                spaces: true,
                comments: false,
            },
        };
        assert_eq!(
            short_form_moves(&moves[..2], &style),
            "P4,2 > 4,4 | p4,7 > 4,6"
        );

        let unspaced = MoveListStyle::Plain {
            options: ShortFormOptions {
                compact: false,
                spaces: false,
                comments: false,
            },
        };
        assert_eq!(short_form_moves(&moves[..2], &unspaced), "P4,2>4,4|p4,7>4,6");
    }

    #[test]
    fn test_numbered_with_new_lines() {
        let moves = sample_game();
        let style = MoveListStyle::default();
        assert_eq!(
            short_form_moves(&moves, &style),
            "1. P4,2 > 4,4 | p4,7 > 4,6\n\
             2. P4,4 > 4,5 | p3,7 > 3,5\n\
             3. P4,5 x 3,6 {White captures en passant}"
        );
    }

    #[test]
    fn test_numbered_single_line_offset() {
        let moves = sample_game();
        let style = MoveListStyle::numbered(ShortFormOptions::MOST_COMPACT, 12, false);
        assert_eq!(
            short_form_moves(&moves, &style),
            "12. 4,2>4,4 | 4,7>4,6 13. 4,4>4,5 | 3,7>3,5 14. 4,5>3,6"
        );
    }

    #[test]
    fn test_numbered_multiplayer_cycle() {
        let moves = sample_game();
        let style = MoveListStyle::Numbered {
            options: ShortFormOptions::MOST_COMPACT,
            turn_order: vec![Player::White, Player::Black, Player::Red],
            fullmove: 1,
            make_new_lines: true,
        };
        assert_eq!(
            short_form_moves(&moves, &style),
            "1. 4,2>4,4 | 4,7>4,6 | 4,4>4,5\n2. 3,7>3,5 | 4,5>3,6"
        );
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(short_form_moves(&[], &MoveListStyle::default()), "");
        assert!(parse_short_form_moves("").unwrap().is_empty());
    }

    #[test]
    fn test_roundtrip_every_style() {
        let mut styles = vec![MoveListStyle::most_compact()];
        for compact in [false, true] {
            for spaces in [false, true] {
                for comments in [false, true] {
                    let options = ShortFormOptions {
                        compact,
                        spaces,
                        comments,
                    };
                    styles.push(MoveListStyle::Plain { options });
                    styles.push(MoveListStyle::numbered(options, 1, true));
                    styles.push(MoveListStyle::numbered(options, 7, false));
                }
            }
        }

        for moves in [sample_game(), promotion_game()] {
            for style in &styles {
                let text = short_form_moves(&moves, style);
                let parsed = parse_short_form_moves(&text).unwrap();
                let drafts: Vec<&MoveDraft> = parsed.iter().map(|p| &p.draft).collect();
                let expected: Vec<&MoveDraft> = moves.iter().map(Move::draft).collect();
                assert_eq!(drafts, expected, "{:?} => {}", style, text);
            }
        }
    }

    #[test]
    fn test_promotion_game_styled() {
        let moves = promotion_game();
        assert_eq!(
            short_form_moves(&moves, &MoveListStyle::most_compact()),
            "2,7>3,8=3q|1,7>1,8=0am|-4,-4>100,100|5,8>-7,8"
        );

        let style = MoveListStyle::Numbered {
            options: ShortFormOptions {
                compact: false,
                spaces: true,
                comments: true,
            },
            turn_order: vec![Player::Red, Player::White, Player::Green, Player::Black],
            fullmove: 1,
            make_new_lines: true,
        };
        assert_eq!(
            short_form_moves(&moves, &style),
            "1. 3p2,7 x 3,8 =3q # {[%clk 0:09:56.7] Mate by promotion} | \
             P1,7 > 1,8 =0am + {[%clk 0:00:00.2]} | \
             6nr-4,-4 > 100,100 | \
             k5,8 > -7,8 {Castling}"
        );
    }

    #[test]
    fn test_stale_cache_from_json() {
        let mv = simple(RawType::Pawn, Player::White, (1, 2), (3, 4));
        let mut json = serde_json::to_string(&mv).unwrap();
        json.pop();
        json.push_str(r#","compact":"9,9>9,9"}"#);
        let parsed: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(
            short_form_moves(&[parsed], &MoveListStyle::most_compact()),
            "1,2>3,4"
        );
    }

    #[test]
    fn test_parse_keeps_comments() {
        let parsed =
            parse_short_form_moves("1. P4,5 x 3,6 {[%clk 0:09:56.7] en passant} | k5,8 > 7,8 {Castling}")
                .unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].comment.as_deref(), Some("[%clk 0:09:56.7] en passant"));
        assert_eq!(parsed[1].comment.as_deref(), Some("Castling"));
    }

    #[test]
    fn test_style_serde() {
        let style = MoveListStyle::default();
        let json = serde_json::to_string(&style).unwrap();
        let parsed: MoveListStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, style);

        let plain: MoveListStyle =
            serde_json::from_str(r#"{"kind":"plain","options":{"compact":true,"spaces":false,"comments":false}}"#)
                .unwrap();
        assert_eq!(plain, MoveListStyle::most_compact());
    }
}
