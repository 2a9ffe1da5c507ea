//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 压缩与解压是两个相互独立的子命令。

use clap::Parser;
use std::path::PathBuf;

/// 一款基于游程编码 (RLE) 的命令行工具，用于压缩未压缩的 BMP 图像并将其还原。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于游程编码 (RLE) 的命令行工具，用于压缩未压缩的 BMP 图像并将其还原。\n压缩文件保留原始的 54 字节 BMP 文件头，其后是 (count, value) 字节对。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：compress (压缩) 和 decompress (解压)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 对 BMP 图像的像素数据进行游程编码。
    Compress(CompressArgs),

    /// 将游程编码后的文件还原为 BMP 图像。
    Decompress(DecompressArgs),
}

/// 'compress' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CompressArgs {
    /// 待压缩的 BMP 图像文件路径。
    #[arg(short, long)]
    pub input: PathBuf,

    /// 压缩结果的输出路径。默认为输入文件旁的 `compressed_<文件名>.rle`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'decompress' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct DecompressArgs {
    /// 由 'compress' 生成的压缩文件路径。
    #[arg(short, long)]
    pub input: PathBuf,

    /// 还原后 BMP 图像的输出路径。默认为输入文件旁的 `decompressed_<文件名>.bmp`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}
