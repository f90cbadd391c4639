//! 错误类型定义

use thiserror::Error;

/// ICN 编解码错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IcnError {
    /// 未知的棋子代码，或无法编码的棋子类型
    #[error("Invalid piece code: {code}")]
    InvalidPieceCode { code: String },

    /// 无法参与易位的棋子种类
    #[error("Cannot allow castling with {raw}")]
    InvalidCastlePartner { raw: String },

    /// 走法文本不符合语法
    #[error("Malformed move text: {text}")]
    MalformedMoveText { text: String },

    /// 局面文本不符合语法
    #[error("Malformed position text: {text} ({reason})")]
    MalformedPositionText { text: String, reason: String },

    /// 坐标键语法错误
    #[error("Malformed coordinate: {text}")]
    MalformedCoordinate { text: String },

    /// 坐标超出有限数值范围
    #[error("Coordinate must not be infinite: {text}")]
    InfiniteCoordinate { text: String },

    /// 未知的玩家代码
    #[error("Invalid player code: {code}")]
    InvalidPlayerCode { code: String },
}

impl IcnError {
    pub(crate) fn piece_code(code: impl Into<String>) -> Self {
        IcnError::InvalidPieceCode { code: code.into() }
    }

    pub(crate) fn move_text(text: impl Into<String>) -> Self {
        IcnError::MalformedMoveText { text: text.into() }
    }
}

/// 编解码操作结果类型
pub type Result<T> = std::result::Result<T, IcnError>;
