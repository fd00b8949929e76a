//! # 长度标记块
//!
//! 编码后的文件末尾附加 6 字节：`0x55`、4 字节小端比特数、`0x55`。
//! 首尾两个哨兵同时出现即视为文件携带隐藏消息。

use crate::constants::{SENTINEL, TRAILER_LEN};

/// 在 `bytes` 末尾追加标记块。必须在像素网格序列化之后调用，保证标记块位于文件最末尾。
pub fn append_size_marker(bytes: &mut Vec<u8>, bit_count: u32) {
    bytes.reserve(TRAILER_LEN);
    bytes.push(SENTINEL);
    bytes.extend_from_slice(&bit_count.to_le_bytes());
    bytes.push(SENTINEL);
}

/// 判断 `bytes` 末尾是否存在标记块。不足 6 字节时返回 `false`。
pub fn detect_marker(bytes: &[u8]) -> bool {
    bytes.len() >= TRAILER_LEN
        && bytes[bytes.len() - 1] == SENTINEL
        && bytes[bytes.len() - TRAILER_LEN] == SENTINEL
}

/// 读取标记块中的比特数；没有标记块时为 0。
pub fn read_size_marker(bytes: &[u8]) -> u32 {
    split_marker(bytes).map_or(0, |(_, bit_count)| bit_count)
}

/// 拆分出标记块之前的文件主体和记录的比特数。
pub fn split_marker(bytes: &[u8]) -> Option<(&[u8], u32)> {
    if !detect_marker(bytes) {
        return None;
    }
    let (body, trailer) = bytes.split_at(bytes.len() - TRAILER_LEN);
    let length: [u8; 4] = trailer[1..5].try_into().ok()?;
    Some((body, u32::from_le_bytes(length)))
}
