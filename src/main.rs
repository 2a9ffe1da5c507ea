use clap::Parser;

use bmp_rle::{
    cli::{Cli, Commands},
    handler::{handle_compress, handle_decompress},
};

/// 程序的主入口点
///
/// 负责解析命令行参数，并根据指定的子命令（`compress` 或 `decompress`）
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Compress(args) => handle_compress(args),
        Commands::Decompress(args) => handle_decompress(args),
    }
}
