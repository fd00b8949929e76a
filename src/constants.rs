/// 标记块首尾的哨兵字节。
pub const SENTINEL: u8 = 0x55;

/// 附加在文件末尾的标记块长度 (字节)：哨兵 + 4 字节小端长度 + 哨兵。
pub const TRAILER_LEN: usize = 6;

/// 未指定消息来源时嵌入的演示消息。
pub const DEFAULT_MESSAGE: &str = "0110111110011";

/// `hide` 未指定输出路径时，结果图像文件名的前缀。
pub const HIDDEN_PREFIX: &str = "doctored_";

/// `recover` 未指定输出路径时，恢复文件名的前缀。
pub const RECOVERED_PREFIX: &str = "recovered_";
