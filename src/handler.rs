//! # 命令处理逻辑模块
//!
//! 包含处理 `embed` 和 `extract` 子命令的高级业务逻辑。
//! 本模块负责协调位宽校验、图像编解码、调用核心隐写算法以及向用户报告结果。

use crate::bits::BitWidth;
use crate::cli::{EmbedArgs, ExtractArgs};
use crate::codec::{decode, encode};
use crate::error::StegoError;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

/// 目标文件已存在且未指定 `--force` 时拒绝继续。
///
/// 检查与随后的写入之间不加锁，期间被其他进程创建的文件仍会被覆盖。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(StegoError::OutputExists(path.to_path_buf()).into());
    }
    Ok(())
}

/// 处理 'Embed' 命令的执行逻辑。
///
/// 先校验位宽和输出路径，再读取图像、检查容量、嵌入文本，
/// 最后将结果写入目标图像文件。任何一步失败都不会写出输出文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径、文本和位宽的 `EmbedArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 位宽不在 1 到 8 之间。
/// * 输出文件已存在且未指定 `--force`。
/// * 无法读取或解码输入图像。
/// * 图像没有足够的空间来隐藏文本。
/// * 无法编码或写入目标图像文件。
pub fn handle_embed(args: EmbedArgs) -> Result<()> {
    let bits = BitWidth::new(args.bits)?;
    ensure_writable(&args.output_image, args.force)?;

    let mut grid = decode(&args.input_image)?;
    let (width, height) = grid.dimensions();
    let available = grid.capacity_bits(bits);
    log::info!(
        "embedding {} characters into {width}x{height} image (alpha: {}), {available} bits available",
        args.text.chars().count(),
        grid.has_alpha()
    );

    let written = grid.embed(&args.text, bits).with_context(|| {
        format!(
            "Unable to hide the text in: {}",
            args.input_image.to_string_lossy().red().bold()
        )
    })?;

    encode(&grid, &args.output_image)?;

    println!(
        "The text has been successfully embedded ({} of {} bits used) and saved: {}",
        written.to_string().green().bold(),
        available.to_string().green().bold(),
        args.output_image.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Extract' 命令的执行逻辑。
///
/// 读取经过隐写的图像，按位宽提取结束标记之前的文本，
/// 打印到终端或写入 `--output` 指定的文件。
///
/// # Arguments
///
/// * `args` - 包含输入路径、位宽和可选输出路径的 `ExtractArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 位宽不在 1 到 8 之间。
/// * 无法读取或解码输入图像。
/// * 图像中没有结束标记 (未嵌入文本，或位宽不一致)。
/// * 无法写入到目标文本文件。
pub fn handle_extract(args: ExtractArgs) -> Result<()> {
    let bits = BitWidth::new(args.bits)?;
    if let Some(output) = &args.output {
        ensure_writable(output, args.force)?;
    }

    let grid = decode(&args.input_image)?;

    let text = grid.extract(bits).with_context(|| {
        format!(
            "Failed to extract text from '{}'. \nThe image may not contain a hidden message, or the bit width differs from the one used to embed it.",
            args.input_image.to_string_lossy().red().bold()
        )
    })?;

    match &args.output {
        Some(output) => {
            fs::write(output, text.as_bytes()).with_context(|| {
                format!(
                    "Unable to write to target text file: {}",
                    output.to_string_lossy().red().bold()
                )
            })?;
            println!(
                "The text has been successfully extracted and saved: {}",
                output.to_string_lossy().green().bold()
            );
        }
        None => {
            println!("{}", "Extracted text:".green().bold());
            println!("{text}");
        }
    }

    Ok(())
}
