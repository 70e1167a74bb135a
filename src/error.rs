//! # 错误类型模块
//!
//! 定义库层面的错误分类。应用层 (`handler`) 再通过 `anyhow` 附加上下文。

use std::path::PathBuf;
use thiserror::Error;

use crate::constants::{MAX_BITS, MIN_BITS};

#[derive(Debug, Error)]
pub enum StegoError {
    #[error("Invalid bit width {}: must be between {} and {}", .0, MIN_BITS, MAX_BITS)]
    InvalidBitWidth(u8),

    #[error("The text is too long for this image. Required: {required} bits, Available: {available} bits")]
    PayloadTooLarge { required: u64, available: u64 },

    #[error("No end marker found. Check the image and the bit width")]
    NoMarkerFound,

    #[error("Unable to decode image file: {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Unable to encode image file: {}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Output file already exists: {} (use --force to overwrite)", .0.display())]
    OutputExists(PathBuf),
}

pub type Result<T> = std::result::Result<T, StegoError>;
