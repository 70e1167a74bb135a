//! # lsb_etx 库
//!
//! 本库包含 LSB 文本隐写工具的核心逻辑。

// 声明库包含的所有模块。

pub mod bits;
pub mod capacity;
pub mod cli;
pub mod codec;
pub mod constants;
pub mod error;
pub mod handler;
pub mod steganography;

pub use bits::BitWidth;
pub use codec::PixelGrid;
pub use error::StegoError;
