/// BMP 文件头 (文件头 14 字节 + 信息头 40 字节) 的固定大小 (字节)。
/// 压缩文件中的 RLE 数据紧跟在这个头部之后。
pub const BMP_HEADER_SIZE: usize = 54;

/// 合法 BMP 文件开头的两字节签名。
pub const BMP_SIGNATURE: [u8; 2] = *b"BM";

/// 单个游程的最大长度。
/// 计数值只占一个字节，因此更长的游程会被拆分成多个 (255, value) 对。
pub const MAX_RUN: u8 = u8::MAX;

/// 未指定输出路径时，压缩结果文件名的前缀与扩展名。
pub const COMPRESSED_PREFIX: &str = "compressed_";
pub const COMPRESSED_EXTENSION: &str = "rle";

/// 未指定输出路径时，解压结果文件名的前缀与扩展名。
pub const DECOMPRESSED_PREFIX: &str = "decompressed_";
pub const DECOMPRESSED_EXTENSION: &str = "bmp";
