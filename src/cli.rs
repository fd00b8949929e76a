//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// 将比特序列藏入位图红色通道最低有效位，并在文件末尾记录消息长度。
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// 输出调试日志。
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏) 和 recover (恢复)。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 将消息隐藏到图像中。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复消息。
    Recover(RecoverArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Args, Debug)]
pub struct HideArgs {
    /// 输入图像文件路径 (如 BMP, PNG)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 以该文件的全部字节作为消息。
    #[arg(short, long, conflicts_with = "bits")]
    pub text: Option<PathBuf>,

    /// 直接给出的比特串，例如 "0110 1111"。两者都未给出时使用内置演示消息。
    #[arg(short, long)]
    pub bits: Option<String>,

    /// 结果图像的输出路径，默认为输入旁的 `doctored_<文件名>`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Args, Debug)]
pub struct RecoverArgs {
    /// 已隐藏消息的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复出的消息 (按字节打包) 的输出路径，默认为输入旁的 `recovered_<文件名>.txt`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,
}
