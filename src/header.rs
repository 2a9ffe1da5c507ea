//! # BMP 文件头模块
//!
//! 描述位于 BMP 文件开头、固定 54 字节的文件头 (文件头 + BITMAPINFOHEADER)。
//! 所有字段按小端序逐个序列化，字段之间没有任何填充，
//! 因此读取后再写出的文件头与原始字节完全一致。

use std::io::{Read, Write};
use std::ops::Range;

use crate::constants::{BMP_HEADER_SIZE, BMP_SIGNATURE};
use crate::error::CodecError;

/// 固定布局的 BMP 文件头。
///
/// 除签名外，本工具只使用 `data_offset` 和 `image_size` 两个字段；
/// 其余字段原样保留，以便写出时逐字节还原。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpHeader {
    pub signature: [u8; 2],
    pub file_size: i32,
    pub reserved: i32,
    pub data_offset: i32,
    pub header_size: i32,
    pub width: i32,
    pub height: i32,
    pub planes: i16,
    pub bits_per_pixel: i16,
    pub compression: i32,
    pub image_size: i32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: i32,
    pub important_colors: i32,
}

/// 按顺序从固定长度的字节数组中取出字段。
struct FieldReader<'a> {
    bytes: &'a [u8; BMP_HEADER_SIZE],
    pos: usize,
}

impl FieldReader<'_> {
    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut field = [0u8; N];
        field.copy_from_slice(&self.bytes[self.pos..self.pos + N]);
        self.pos += N;
        field
    }

    fn i16(&mut self) -> i16 {
        i16::from_le_bytes(self.take())
    }

    fn i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take())
    }
}

impl BmpHeader {
    /// 将文件头序列化为 54 字节，字段顺序与磁盘格式一致。
    pub fn to_bytes(&self) -> [u8; BMP_HEADER_SIZE] {
        let mut out = [0u8; BMP_HEADER_SIZE];
        let fields: [&[u8]; 15] = [
            &self.signature,
            &self.file_size.to_le_bytes(),
            &self.reserved.to_le_bytes(),
            &self.data_offset.to_le_bytes(),
            &self.header_size.to_le_bytes(),
            &self.width.to_le_bytes(),
            &self.height.to_le_bytes(),
            &self.planes.to_le_bytes(),
            &self.bits_per_pixel.to_le_bytes(),
            &self.compression.to_le_bytes(),
            &self.image_size.to_le_bytes(),
            &self.x_pixels_per_meter.to_le_bytes(),
            &self.y_pixels_per_meter.to_le_bytes(),
            &self.colors_used.to_le_bytes(),
            &self.important_colors.to_le_bytes(),
        ];

        let mut pos = 0;
        for field in fields {
            out[pos..pos + field.len()].copy_from_slice(field);
            pos += field.len();
        }
        debug_assert_eq!(pos, BMP_HEADER_SIZE);

        out
    }

    /// 计算像素数据在文件中的字节区间 `data_offset..data_offset + image_size`。
    ///
    /// # Errors
    ///
    /// 如果偏移或大小为负数，或者区间超出 `file_len`，返回 `PixelDataOutOfRange`。
    pub fn pixel_range(&self, file_len: usize) -> Result<Range<usize>, CodecError> {
        let out_of_range = || CodecError::PixelDataOutOfRange {
            offset: self.data_offset as i64,
            size: self.image_size as i64,
            file_len,
        };

        let start = usize::try_from(self.data_offset).map_err(|_| out_of_range())?;
        let size = usize::try_from(self.image_size).map_err(|_| out_of_range())?;
        let end = start
            .checked_add(size)
            .filter(|&end| end <= file_len)
            .ok_or_else(out_of_range)?;

        Ok(start..end)
    }
}

impl TryFrom<&[u8; BMP_HEADER_SIZE]> for BmpHeader {
    type Error = CodecError;

    fn try_from(bytes: &[u8; BMP_HEADER_SIZE]) -> Result<Self, Self::Error> {
        let mut r = FieldReader { bytes, pos: 0 };

        let signature = r.take::<2>();
        if signature != BMP_SIGNATURE {
            return Err(CodecError::NotABitmap { found: signature });
        }

        Ok(Self {
            signature,
            file_size: r.i32(),
            reserved: r.i32(),
            data_offset: r.i32(),
            header_size: r.i32(),
            width: r.i32(),
            height: r.i32(),
            planes: r.i16(),
            bits_per_pixel: r.i16(),
            compression: r.i32(),
            image_size: r.i32(),
            x_pixels_per_meter: r.i32(),
            y_pixels_per_meter: r.i32(),
            colors_used: r.i32(),
            important_colors: r.i32(),
        })
    }
}

/// 从 `source` 读取并校验 54 字节的文件头。
///
/// 本函数不会向任何输出写入数据，调用方应在校验通过后再创建输出。
///
/// # Errors
///
/// * 前两个字节不是 "BM" 时返回 `NotABitmap` (即使可读字节不足 54 个)。
/// * 以 "BM" 开头但可读字节不足 54 个时返回 `HeaderTooShort`。
pub fn read_header<R: Read>(source: &mut R) -> Result<BmpHeader, CodecError> {
    let mut buf = Vec::with_capacity(BMP_HEADER_SIZE);
    source
        .by_ref()
        .take(BMP_HEADER_SIZE as u64)
        .read_to_end(&mut buf)?;

    // 即使文件头不完整，也优先报告签名错误
    match buf.first_chunk::<2>() {
        Some(&found) if found != BMP_SIGNATURE => {
            return Err(CodecError::NotABitmap { found });
        }
        _ => {}
    }

    let bytes: &[u8; BMP_HEADER_SIZE] = buf
        .as_slice()
        .try_into()
        .map_err(|_| CodecError::HeaderTooShort { len: buf.len() })?;

    BmpHeader::try_from(bytes)
}

/// 将文件头原样写入 `sink`。
pub fn write_header<W: Write>(sink: &mut W, header: &BmpHeader) -> Result<(), CodecError> {
    sink.write_all(&header.to_bytes())?;
    Ok(())
}
