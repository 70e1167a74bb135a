//! # 位打包模块
//!
//! 把文本转换为按 MSB 优先排列的比特流，并定义经过校验的每通道位宽 `BitWidth`。

use crate::constants::{BITS_PER_BYTE, END_MARKER, MAX_BITS, MIN_BITS};
use crate::error::{Result, StegoError};

/// 每个颜色通道使用的低位数，取值范围为 [1, 8]。
///
/// 嵌入和提取必须使用相同的位宽，否则解码结果会是乱码或找不到结束标记。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitWidth(u8);

impl BitWidth {
    /// 校验并创建位宽。
    ///
    /// # Errors
    ///
    /// `bits` 不在 [1, 8] 范围内时返回 `StegoError::InvalidBitWidth`。
    pub fn new(bits: u8) -> Result<Self> {
        if (MIN_BITS..=MAX_BITS).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(StegoError::InvalidBitWidth(bits))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// 低 `bits` 位全为 1 的掩码。
    pub fn mask(self) -> u8 {
        u8::MAX >> (MAX_BITS - self.0)
    }
}

impl TryFrom<u8> for BitWidth {
    type Error = StegoError;

    fn try_from(bits: u8) -> Result<Self> {
        Self::new(bits)
    }
}

/// 把每个字符的码点截断为一个字节。
///
/// 码点大于 255 的字符会丢失高位，无法往返。
pub fn text_to_bytes(text: &str) -> Vec<u8> {
    text.chars().map(|c| c as u32 as u8).collect()
}

/// 文本字节加上末尾的结束标记。
pub fn payload_bytes(text: &str) -> Vec<u8> {
    let mut payload = text_to_bytes(text);
    payload.push(END_MARKER);
    payload
}

/// 把字节序列展开为比特流，每个字节 MSB 优先。
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|&byte| (0..BITS_PER_BYTE).rev().map(move |i| (byte >> i) & 1 == 1))
        .collect()
}

/// 文本转比特流。不追加结束标记，空文本得到空比特流。
pub fn text_to_bits(text: &str) -> Vec<bool> {
    bytes_to_bits(&text_to_bytes(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bit_string(bits: &[bool]) -> String {
        bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }

    #[test]
    fn test_text_to_bits_msb_first() {
        assert_eq!(bit_string(&text_to_bits("Hi")), "0100100001101001");
    }

    #[test]
    fn test_empty_text_yields_empty_bits() {
        assert!(text_to_bits("").is_empty());
        assert_eq!(payload_bytes(""), vec![END_MARKER]);
    }

    #[test]
    fn test_wide_characters_are_truncated() {
        // U+4E2D -> 0x2D
        assert_eq!(text_to_bytes("中"), vec![0x2D]);
        assert_eq!(text_to_bytes("é"), vec![0xE9]);
    }

    #[test]
    fn test_payload_ends_with_marker() {
        let payload = payload_bytes("Hi");
        assert_eq!(payload, vec![b'H', b'i', END_MARKER]);
        assert_eq!(bit_string(&bytes_to_bits(&payload[2..])), "00000011");
    }

    #[test]
    fn test_bit_width_bounds() {
        assert!(matches!(BitWidth::new(0), Err(StegoError::InvalidBitWidth(0))));
        assert!(matches!(BitWidth::new(9), Err(StegoError::InvalidBitWidth(9))));
        assert_eq!(BitWidth::new(1).unwrap().mask(), 0b0000_0001);
        assert_eq!(BitWidth::new(3).unwrap().mask(), 0b0000_0111);
        assert_eq!(BitWidth::try_from(8).unwrap().mask(), 0xFF);
    }
}
