//! 时钟嵌入命令
//!
//! 走法注释中记录走棋方剩余时间，格式为 `[%clk H:MM:SS.D]`，D 为十分之一秒。

/// 时间耗尽时使用的固定标签
pub const ZERO_CLOCK_TAG: &str = "[%clk 0:00:00.0]";

/// 将剩余毫秒数转换为时钟嵌入命令
///
/// 先进位到下一个 100 毫秒边界（恰好落在边界上的值也会进位），
/// 再拆分为时、分、秒和十分之一秒。
pub fn clk_tag(millis_remaining: i64) -> String {
    if millis_remaining <= 0 {
        return ZERO_CLOCK_TAG.to_string();
    }

    let rounded = (millis_remaining / 100 + 1).saturating_mul(100);

    let total_seconds = rounded / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    let tenths = (rounded % 1000) / 100;

    format!("[%clk {}:{:02}:{:02}.{}]", hours, minutes, seconds, tenths)
}
