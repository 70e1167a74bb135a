use crate::bits::BitWidth;
use crate::constants::CHANNELS_PER_PIXEL;
use crate::error::{Result, StegoError};

/// 图像最多可以嵌入的比特数：`width * height * 3 * bits`，溢出时取 `u64::MAX`。
pub fn max_capacity_bits(width: u32, height: u32, bits: BitWidth) -> u64 {
    u64::from(width)
        .saturating_mul(u64::from(height))
        .saturating_mul(CHANNELS_PER_PIXEL)
        .saturating_mul(u64::from(bits.get()))
}

/// 检查 `required` 比特 (含结束标记) 能否放入图像，成功时返回可用容量。
pub fn check_capacity(required: u64, width: u32, height: u32, bits: BitWidth) -> Result<u64> {
    let available = max_capacity_bits(width, height, bits);
    log::debug!(
        "capacity check: {required} bits required, {available} bits available ({width}x{height}, {} bits per channel)",
        bits.get()
    );

    if required > available {
        return Err(StegoError::PayloadTooLarge {
            required,
            available,
        });
    }

    Ok(available)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_capacity_bits() {
        let one = BitWidth::new(1).unwrap();
        let eight = BitWidth::new(8).unwrap();
        assert_eq!(max_capacity_bits(3, 3, one), 27);
        assert_eq!(max_capacity_bits(10, 20, eight), 4800);
        assert_eq!(max_capacity_bits(0, 100, eight), 0);
    }

    #[test]
    fn test_capacity_boundary() {
        let two = BitWidth::new(2).unwrap();
        // 2x2 像素, 2 bits: 24 bits
        assert_eq!(check_capacity(24, 2, 2, two).unwrap(), 24);
        assert!(matches!(
            check_capacity(25, 2, 2, two),
            Err(StegoError::PayloadTooLarge {
                required: 25,
                available: 24
            })
        ));
    }

    #[test]
    fn test_large_dimensions_saturate() {
        let eight = BitWidth::new(8).unwrap();
        assert_eq!(max_capacity_bits(u32::MAX, u32::MAX, eight), u64::MAX);
    }
}
