//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，把以 ETX 结尾的文本写入图像 RGB 通道的低位，或从中读出。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，把以 ETX 结尾的文本写入图像 RGB 通道的低位，或从中读出。\n请使用无损格式 (PNG, BMP, TIFF, WebP, QOI) 保存结果。"
)]
pub struct Cli {
    /// 提高日志详细程度 (-v, -vv, -vvv)。
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：embed (嵌入) 和 extract (提取)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 把文本嵌入图像。
    Embed(EmbedArgs),

    /// 从经过隐写的图像中提取文本。
    Extract(ExtractArgs),
}

/// 'embed' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EmbedArgs {
    /// 输入图像文件路径。
    pub input_image: PathBuf,

    /// 输出图像文件路径，格式由扩展名决定。
    pub output_image: PathBuf,

    /// 要嵌入的文本。每个字符只保留码点的低 8 位。
    pub text: String,

    /// 每个颜色通道使用的低位数 (1-8)。
    pub bits: u8,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'extract' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// 已嵌入文本的图像文件路径。
    pub input_image: PathBuf,

    /// 每个颜色通道使用的低位数 (1-8)，必须与嵌入时一致。
    pub bits: u8,

    /// 把提取的文本写入该文件，而不是打印到终端。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}
