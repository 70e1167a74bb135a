//! # 隐写核心算法模块
//!
//! 按光栅顺序 (从上到下、从左到右) 遍历像素，在每个像素的 R、G、B 通道低位中
//! 写入或读取比特流。Alpha 通道始终保持不变。

use image::{ImageBuffer, Pixel, Rgb, Rgba};

use crate::bits::{BitWidth, bytes_to_bits, payload_bytes};
use crate::capacity::check_capacity;
use crate::constants::{BITS_PER_BYTE, END_MARKER};
use crate::error::{Result, StegoError};

/// 可参与隐写的 8 位彩色像素，前三个通道为 R、G、B。
pub trait ColorPixel: Pixel<Subpixel = u8> {
    fn rgb(&self) -> &[u8] {
        &self.channels()[..3]
    }

    fn rgb_mut(&mut self) -> &mut [u8] {
        &mut self.channels_mut()[..3]
    }
}

impl ColorPixel for Rgb<u8> {}
impl ColorPixel for Rgba<u8> {}

/// 比特流上的游标，每次嵌入调用各自持有一个。
struct BitCursor<'a> {
    bits: &'a [bool],
    index: usize,
}

impl<'a> BitCursor<'a> {
    fn new(bits: &'a [bool]) -> Self {
        Self { bits, index: 0 }
    }

    fn is_exhausted(&self) -> bool {
        self.index >= self.bits.len()
    }

    /// 取出下一组最多 `width` 个比特，不足时右侧补 0。
    /// 游标只前进实际取出的比特数。
    fn next_group(&mut self, width: BitWidth) -> Option<u8> {
        if self.is_exhausted() {
            return None;
        }

        let width = usize::from(width.get());
        let end = (self.index + width).min(self.bits.len());
        let taken = &self.bits[self.index..end];
        let group = taken
            .iter()
            .fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit));
        self.index = end;

        Some(group << (width - taken.len()))
    }
}

/// 读取方向的比特累加器，最多暂存 15 个比特。
#[derive(Default)]
struct BitAccumulator {
    value: u16,
    len: u8,
}

impl BitAccumulator {
    fn push(&mut self, group: u8, width: BitWidth) {
        self.value = (self.value << width.get()) | u16::from(group & width.mask());
        self.len += width.get();
    }

    fn pop_byte(&mut self) -> Option<u8> {
        if usize::from(self.len) < BITS_PER_BYTE {
            return None;
        }

        let rest = self.len - BITS_PER_BYTE as u8;
        let byte = (self.value >> rest) as u8;
        self.value &= (1u16 << rest) - 1;
        self.len = rest;

        Some(byte)
    }
}

/// 用 `group` 替换通道值的低 `width` 位，高位保持不变。
pub fn substitute_bits(channel: u8, group: u8, width: BitWidth) -> u8 {
    let mask = width.mask();
    (channel & !mask) | (group & mask)
}

/// 把文本 (加上结束标记) 嵌入图像，原地修改像素。
///
/// 比特流耗尽后不再访问后续像素；最后一个被访问像素中剩余的通道保持原值。
///
/// # Arguments
///
/// * `grid` - RGB 或 RGBA 像素缓冲区。
/// * `text` - 要隐藏的文本，每个字符截断为一个字节。
/// * `bits` - 每个通道使用的低位数。
///
/// # Returns
///
/// 写入的比特数 (含结束标记)。
///
/// # Errors
///
/// 比特流长度超过图像容量时返回 `StegoError::PayloadTooLarge`，此时图像不会被修改。
pub fn embed<P: ColorPixel>(
    grid: &mut ImageBuffer<P, Vec<u8>>,
    text: &str,
    bits: BitWidth,
) -> Result<usize> {
    let stream = bytes_to_bits(&payload_bytes(text));
    let (width, height) = grid.dimensions();
    check_capacity(stream.len() as u64, width, height, bits)?;

    let mut cursor = BitCursor::new(&stream);
    let mut touched = 0usize;

    for pixel in grid.pixels_mut() {
        if cursor.is_exhausted() {
            break;
        }

        for channel in pixel.rgb_mut() {
            if let Some(group) = cursor.next_group(bits) {
                *channel = substitute_bits(*channel, group, bits);
            }
        }
        touched += 1;
    }

    log::debug!(
        "embedded {} bits into {touched} pixels at {} bits per channel",
        stream.len(),
        bits.get()
    );

    Ok(stream.len())
}

/// 从图像中提取结束标记之前的原始字节。
///
/// # Errors
///
/// 遍历完所有像素仍未遇到结束标记时返回 `StegoError::NoMarkerFound`，
/// 已读取的部分内容会被丢弃。
pub fn extract_bytes<P: ColorPixel>(
    grid: &ImageBuffer<P, Vec<u8>>,
    bits: BitWidth,
) -> Result<Vec<u8>> {
    let mut accumulator = BitAccumulator::default();
    let mut recovered = Vec::new();

    for pixel in grid.pixels() {
        for &channel in pixel.rgb() {
            accumulator.push(channel, bits);

            while let Some(byte) = accumulator.pop_byte() {
                if byte == END_MARKER {
                    log::debug!("end marker found after {} bytes", recovered.len());
                    return Ok(recovered);
                }
                recovered.push(byte);
            }
        }
    }

    Err(StegoError::NoMarkerFound)
}

/// 从图像中提取文本，每个字节映射为码点相同的字符。
pub fn extract<P: ColorPixel>(grid: &ImageBuffer<P, Vec<u8>>, bits: BitWidth) -> Result<String> {
    extract_bytes(grid, bits).map(|bytes| bytes.into_iter().map(char::from).collect())
}
