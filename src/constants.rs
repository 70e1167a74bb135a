/// 文本结束标记 (ETX, ASCII 3)。
/// 嵌入时追加在文本末尾，提取时遇到即停止。
pub const END_MARKER: u8 = 3;

/// 每个像素参与隐写的颜色通道数 (R, G, B)。
/// Alpha 通道永远不会被修改。
pub const CHANNELS_PER_PIXEL: u64 = 3;

/// 每个字符按 `u8` 处理，占 8 bits。
pub const BITS_PER_BYTE: usize = 8;

/// 每个通道可嵌入的最小位数。
pub const MIN_BITS: u8 = 1;

/// 每个通道可嵌入的最大位数。
pub const MAX_BITS: u8 = 8;
