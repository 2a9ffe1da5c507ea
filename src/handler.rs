//! # 命令处理逻辑模块
//!
//! 包含处理 `compress` 和 `decompress` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用文件头与 RLE 编解码核心以及向用户报告结果。
//!
//! 输出内容先在内存中完整生成，全部步骤成功后才会创建输出文件，
//! 因此任何错误都不会留下不完整的输出文件。

use crate::cli::{CompressArgs, DecompressArgs};
use crate::constants::{
    BMP_HEADER_SIZE, COMPRESSED_EXTENSION, COMPRESSED_PREFIX, DECOMPRESSED_EXTENSION,
    DECOMPRESSED_PREFIX,
};
use crate::error::CodecError;
use crate::header::{read_header, write_header};
use crate::rle::{decode, encode};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// 根据输入路径生成默认输出路径：`<输入所在目录>/<prefix><文件名>.<extension>`。
fn default_output_path(input: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| "output".into());

    input.with_file_name(format!("{prefix}{stem}.{extension}"))
}

/// 判断两个路径是否指向同一个文件；目标已存在时比较规范化后的路径。
fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// 确定最终输出路径，并在读取任何输入之前完成覆盖保护检查。
fn resolve_output(
    input: &Path,
    dest: Option<PathBuf>,
    force: bool,
    prefix: &str,
    extension: &str,
) -> Result<PathBuf> {
    let dest = dest.unwrap_or_else(|| default_output_path(input, prefix, extension));

    anyhow::ensure!(
        !is_same_file(&dest, input),
        "Output path must differ from the input path: {}",
        dest.to_string_lossy().red().bold()
    );

    anyhow::ensure!(
        force || !dest.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        dest.to_string_lossy().red().bold()
    );

    Ok(dest)
}

fn read_file(path: &Path) -> Result<Vec<u8>, CodecError> {
    fs::read(path).map_err(|source| CodecError::FileUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), CodecError> {
    fs::write(path, contents).map_err(|source| CodecError::FileUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

/// 处理 'Compress' 命令的执行逻辑。
///
/// 读取 BMP 文件并校验其签名，按照文件头中的 `data_offset` 与 `image_size`
/// 定位像素数据，对其进行游程编码，最后将原始文件头和编码结果写入目标文件。
///
/// 文件头原样写出，其中的 `file_size` 与 `image_size` 仍然描述未压缩的图像。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `CompressArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入文件，或无法写入目标文件。
/// * 输入文件不是 BMP 文件 (签名不是 "BM" 或文件头不完整)。
/// * 文件头描述的像素区域超出文件范围，或像素数据为空。
pub fn handle_compress(args: CompressArgs) -> Result<()> {
    let dest = resolve_output(
        &args.input,
        args.dest,
        args.force,
        COMPRESSED_PREFIX,
        COMPRESSED_EXTENSION,
    )?;

    let picture = read_file(&args.input).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.input.to_string_lossy().red().bold()
        )
    })?;

    let header = read_header(&mut picture.as_slice()).with_context(|| {
        format!(
            "'{}' is not a valid BMP file.",
            args.input.to_string_lossy().red().bold()
        )
    })?;

    let pixel_range = header.pixel_range(picture.len()).with_context(|| {
        "The BMP header points at pixel data that does not exist. \nThe image file may be truncated or corrupted."
    })?;
    let pixels = &picture[pixel_range];

    let mut output = Vec::with_capacity(BMP_HEADER_SIZE + pixels.len());
    write_header(&mut output, &header)?;
    let pairs = encode(pixels, &mut output).with_context(|| {
        format!(
            "Failed to compress '{}'. \nThe header reports an image size of {}.",
            args.input.to_string_lossy().red().bold(),
            header.image_size.to_string().red().bold()
        )
    })?;

    write_file(&dest, &output).with_context(|| {
        format!(
            "Unable to write to target file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "Image compressed successfully: {}",
        dest.to_string_lossy().green().bold()
    );
    println!(
        "Pixel data: {} bytes -> {} bytes ({} runs)",
        pixels.len().to_string().yellow(),
        (pairs * 2).to_string().green(),
        pairs.to_string().cyan()
    );

    Ok(())
}

/// 处理 'Decompress' 命令的执行逻辑。
///
/// 读取压缩文件并校验其文件头，将第 54 字节之后的 (count, value) 字节对展开，
/// 最后将原始文件头和展开后的像素数据写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `DecompressArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入文件，或无法写入目标文件。
/// * 输入文件的文件头不是 BMP 文件头。
/// * 压缩数据在某个计数字节之后被截断。
pub fn handle_decompress(args: DecompressArgs) -> Result<()> {
    let dest = resolve_output(
        &args.input,
        args.dest,
        args.force,
        DECOMPRESSED_PREFIX,
        DECOMPRESSED_EXTENSION,
    )?;

    let compressed = read_file(&args.input).with_context(|| {
        format!(
            "Unable to read compressed file: {}",
            args.input.to_string_lossy().red().bold()
        )
    })?;

    let mut source = compressed.as_slice();
    let header = read_header(&mut source).with_context(|| {
        format!(
            "'{}' does not start with a BMP header.",
            args.input.to_string_lossy().red().bold()
        )
    })?;

    let mut output = Vec::with_capacity(BMP_HEADER_SIZE + source.len());
    write_header(&mut output, &header)?;
    // 截断位置以整个输入文件为基准报告
    let written = match decode(&mut source, &mut output) {
        Err(CodecError::TruncatedStream { offset }) => Err(CodecError::TruncatedStream {
            offset: offset + BMP_HEADER_SIZE as u64,
        }),
        result => result,
    }
    .with_context(|| {
        format!(
            "Failed to decompress '{}'. \nThe compressed data appears to be truncated or corrupted.",
            args.input.to_string_lossy().red().bold()
        )
    })?;

    write_file(&dest, &output).with_context(|| {
        format!(
            "Unable to write to target file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "Image decompressed successfully: {}",
        dest.to_string_lossy().green().bold()
    );
    println!(
        "Pixel data: {} bytes -> {} bytes",
        (compressed.len() - BMP_HEADER_SIZE).to_string().yellow(),
        written.to_string().green()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        let input = Path::new("images/photo.bmp");
        assert_eq!(
            default_output_path(input, COMPRESSED_PREFIX, COMPRESSED_EXTENSION),
            Path::new("images/compressed_photo.rle")
        );
        assert_eq!(
            default_output_path(
                Path::new("images/compressed_photo.rle"),
                DECOMPRESSED_PREFIX,
                DECOMPRESSED_EXTENSION
            ),
            Path::new("images/decompressed_compressed_photo.bmp")
        );
    }

    #[test]
    fn test_output_must_differ_from_input() {
        let input = Path::new("same.bmp");
        let result = resolve_output(
            input,
            Some(input.to_path_buf()),
            true,
            COMPRESSED_PREFIX,
            COMPRESSED_EXTENSION,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_output_aliasing_input_is_rejected() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("a.bmp");
        fs::write(&input, b"BM")?;

        let alias = dir.path().join(".").join("a.bmp");
        let result = resolve_output(
            &input,
            Some(alias),
            true,
            COMPRESSED_PREFIX,
            COMPRESSED_EXTENSION,
        );
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Output path must differ from the input path")
        );
        assert_eq!(fs::read(&input)?, b"BM");

        Ok(())
    }
}
