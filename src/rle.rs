//! # RLE 编解码模块
//!
//! 压缩流由若干 (count, value) 字节对组成，每一对表示 `value` 重复 `count` 次。
//! 像素缓冲区被视为一段平坦的字节序列，不考虑行宽或行填充。

use std::io::{self, ErrorKind, Read, Write};

use crate::constants::MAX_RUN;
use crate::error::CodecError;

/// 对 `pixels` 进行游程编码，并将 (count, value) 字节对追加写入 `sink`。
///
/// 游程长度上限为 255；更长的重复序列会被拆分为多个字节对。
/// 返回写入的字节对数量。
///
/// # Errors
///
/// * `pixels` 为空时返回 `EmptyBuffer`，此时不会向 `sink` 写入任何内容。
/// * 写入 `sink` 失败时返回 `Io`。
pub fn encode<W: Write>(pixels: &[u8], sink: &mut W) -> Result<usize, CodecError> {
    let (&first, rest) = pixels.split_first().ok_or(CodecError::EmptyBuffer)?;

    let mut previous = first;
    let mut count: u8 = 1;
    let mut pairs = 0;

    for &byte in rest {
        if byte == previous && count < MAX_RUN {
            count += 1;
        } else {
            sink.write_all(&[count, previous])?;
            pairs += 1;
            previous = byte;
            count = 1;
        }
    }

    // 最后一个游程总是需要单独写出
    sink.write_all(&[count, previous])?;
    pairs += 1;

    Ok(pairs)
}

/// 内存版本的 [`encode`]。
pub fn encode_to_vec(pixels: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(pixels.len().min(1 << 20));
    encode(pixels, &mut out)?;
    Ok(out)
}

/// 读取单个字节，数据源耗尽时返回 `None`。
fn read_byte<R: Read>(source: &mut R) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match source.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// 从 `source` 中读取 (count, value) 字节对并展开写入 `sink`，直到数据源耗尽。
///
/// 计数为 0 的字节对是合法的，它不产生任何输出。
/// 返回展开后写出的字节总数。
///
/// # Errors
///
/// * 数据源在计数字节之后结束时返回 `TruncatedStream`，其中的偏移相对于 `source` 的起点。
/// * 读写失败时返回 `Io`。
pub fn decode<R: Read, W: Write>(source: &mut R, sink: &mut W) -> Result<u64, CodecError> {
    let mut offset: u64 = 0;
    let mut written: u64 = 0;

    while let Some(count) = read_byte(source)? {
        let value = read_byte(source)?.ok_or(CodecError::TruncatedStream { offset })?;
        offset += 2;

        let run = [value; MAX_RUN as usize];
        sink.write_all(&run[..count as usize])?;
        written += count as u64;
    }

    Ok(written)
}

/// 内存版本的 [`decode`]。
pub fn decode_to_vec(encoded: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    decode(&mut &encoded[..], &mut out)?;
    Ok(out)
}
