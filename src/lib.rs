//! # bmp_rle 库
//!
//! 本库包含 BMP 图像游程编码 (RLE) 压缩工具的核心逻辑：
//! 固定布局的文件头模型、RLE 编解码器，以及命令行所需的文件处理逻辑。

// 声明库包含的所有模块。

pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod header;
pub mod rle;
