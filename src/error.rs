//! # 错误类型模块
//!
//! 定义文件头解析与 RLE 编解码过程中可能出现的所有错误。

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::constants::BMP_HEADER_SIZE;

/// 编解码核心返回的错误类型。
#[derive(Debug, Error)]
pub enum CodecError {
    /// 输入或输出文件无法打开。
    #[error("Unable to open file: {}", .path.display())]
    FileUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 文件开头的签名不是 "BM"。
    #[error("Not a valid BMP file (signature {found:02X?}, expected \"BM\")")]
    NotABitmap { found: [u8; 2] },

    #[error("BMP header is truncated: got {len} bytes, expected {}", BMP_HEADER_SIZE)]
    HeaderTooShort { len: usize },

    /// 文件头描述的像素区域超出了文件本身的范围。
    #[error("Pixel data (offset {offset}, size {size}) lies outside the {file_len}-byte file")]
    PixelDataOutOfRange { offset: i64, size: i64, file_len: usize },

    /// 压缩流在计数字节之后结束，缺少配对的值字节。
    #[error("Compressed stream is truncated: count byte at offset {offset} has no value byte")]
    TruncatedStream { offset: u64 },

    #[error("Cannot encode an empty pixel buffer")]
    EmptyBuffer,

    #[error(transparent)]
    Io(#[from] io::Error),
}
