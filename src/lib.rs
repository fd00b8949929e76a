//! # bmp_stega 库
//!
//! 将比特序列隐藏在位图每个像素红色通道的最低有效位中，
//! 并在编码后的文件末尾附加记录消息长度的标记块。

pub mod bit;
pub mod bitmap;
pub mod cli;
pub mod constants;
pub mod handler;
pub mod message;
pub mod scanner;
pub mod steganography;
pub mod trailer;
