//! # 图像编解码模块
//!
//! 负责图像文件与像素缓冲区之间的转换。8 位 RGB 和 8 位 RGBA 图像保持原样，
//! 其他颜色模式一律转换为 8 位 RGBA。输出格式由目标路径的扩展名决定。

use image::{DynamicImage, RgbImage, RgbaImage};
use std::path::Path;

use crate::bits::BitWidth;
use crate::capacity::max_capacity_bits;
use crate::error::{Result, StegoError};
use crate::steganography;

/// 解码后的像素网格。
#[derive(Debug, Clone, PartialEq)]
pub enum PixelGrid {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl From<DynamicImage> for PixelGrid {
    fn from(image: DynamicImage) -> Self {
        match image {
            DynamicImage::ImageRgb8(buffer) => PixelGrid::Rgb(buffer),
            DynamicImage::ImageRgba8(buffer) => PixelGrid::Rgba(buffer),
            other => PixelGrid::Rgba(other.to_rgba8()),
        }
    }
}

impl PixelGrid {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            PixelGrid::Rgb(buffer) => buffer.dimensions(),
            PixelGrid::Rgba(buffer) => buffer.dimensions(),
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, PixelGrid::Rgba(_))
    }

    pub fn capacity_bits(&self, bits: BitWidth) -> u64 {
        let (width, height) = self.dimensions();
        max_capacity_bits(width, height, bits)
    }

    pub fn embed(&mut self, text: &str, bits: BitWidth) -> Result<usize> {
        match self {
            PixelGrid::Rgb(buffer) => steganography::embed(buffer, text, bits),
            PixelGrid::Rgba(buffer) => steganography::embed(buffer, text, bits),
        }
    }

    pub fn extract(&self, bits: BitWidth) -> Result<String> {
        match self {
            PixelGrid::Rgb(buffer) => steganography::extract(buffer, bits),
            PixelGrid::Rgba(buffer) => steganography::extract(buffer, bits),
        }
    }
}

/// 读取并解码图像文件。
///
/// # Errors
///
/// 文件无法读取或格式损坏时返回 `StegoError::Decode`。
pub fn decode(path: &Path) -> Result<PixelGrid> {
    let image = image::open(path).map_err(|source| StegoError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "decoded {} ({}x{}, {:?})",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );

    Ok(PixelGrid::from(image))
}

/// 把像素网格编码并写入 `path`。
///
/// # Errors
///
/// 扩展名不受支持或路径不可写时返回 `StegoError::Encode`。
pub fn encode(grid: &PixelGrid, path: &Path) -> Result<()> {
    let saved = match grid {
        PixelGrid::Rgb(buffer) => buffer.save(path),
        PixelGrid::Rgba(buffer) => buffer.save(path),
    };

    saved.map_err(|source| StegoError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("encoded {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, Rgba};
    use tempfile::tempdir;

    #[test]
    fn test_color_modes() {
        let rgb = PixelGrid::from(DynamicImage::ImageRgb8(RgbImage::new(4, 2)));
        assert!(!rgb.has_alpha());
        assert_eq!(rgb.dimensions(), (4, 2));

        let gray = GrayImage::from_pixel(2, 2, Luma([7]));
        let converted = PixelGrid::from(DynamicImage::ImageLuma8(gray));
        match converted {
            PixelGrid::Rgba(buffer) => assert_eq!(buffer.get_pixel(1, 1), &Rgba([7, 7, 7, 255])),
            PixelGrid::Rgb(_) => panic!("grayscale should become RGBA"),
        }
    }

    #[test]
    fn test_png_round_trip_keeps_pixels() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("grid.png");
        let grid = PixelGrid::Rgb(RgbImage::from_pixel(3, 3, Rgb([1, 2, 3])));

        encode(&grid, &path)?;
        assert_eq!(decode(&path)?, grid);

        Ok(())
    }

    #[test]
    fn test_decode_missing_file() {
        let dir = tempdir().unwrap();
        let result = decode(&dir.path().join("missing.png"));
        assert!(matches!(result, Err(StegoError::Decode { .. })));
    }

    #[test]
    fn test_encode_unsupported_extension() {
        let dir = tempdir().unwrap();
        let grid = PixelGrid::Rgb(RgbImage::new(2, 2));
        let result = encode(&grid, &dir.path().join("out.jpg"));
        assert!(matches!(result, Err(StegoError::Encode { .. })));
    }

    #[test]
    fn test_embed_and_extract_through_grid() {
        let bits = BitWidth::new(2).unwrap();
        let mut grid = PixelGrid::Rgba(RgbaImage::from_pixel(5, 5, Rgba([9, 9, 9, 128])));
        assert_eq!(grid.capacity_bits(bits), 150);

        grid.embed("grid", bits).unwrap();
        assert_eq!(grid.extract(bits).unwrap(), "grid");
    }
}
