//! # 消息模块
//!
//! 消息是按顺序排列的单个比特序列。顺序既是嵌入顺序，也是恢复顺序；
//! 消息本身不携带长度，长度由文件尾部的标记块记录。

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 单个负载比特。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    pub fn is_set(self) -> bool {
        self == Bit::One
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value { Bit::One } else { Bit::Zero }
    }
}

/// 任何非零字节都视为 1。
impl From<u8> for Bit {
    fn from(value: u8) -> Self {
        Bit::from(value != 0)
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        bit as u8
    }
}

/// 解析 `0`/`1` 字符串时的错误。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseMessageError {
    #[error("invalid bit character {character:?} at position {position}, expected '0' or '1'")]
    InvalidCharacter { character: char, position: usize },
}

/// 有序的比特序列。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message(Vec<Bit>);

impl Message {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bits(&self) -> &[Bit] {
        &self.0
    }

    /// 将字节序列展开为比特，每个字节从最高位开始。
    pub fn from_bytes(bytes: &[u8]) -> Self {
        bytes
            .iter()
            .flat_map(|&byte| (0..8).rev().map(move |shift| Bit::from((byte >> shift) & 1)))
            .collect()
    }

    /// 将比特按最高位优先打包为字节，最后不满 8 位的字节以 0 补齐。
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &bit)| acc | (u8::from(bit) << (7 - i)))
            })
            .collect()
    }
}

impl FromIterator<Bit> for Message {
    fn from_iter<T: IntoIterator<Item = Bit>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// 解析形如 `"0110 1111"` 的字符串，忽略空白。
impl FromStr for Message {
    type Err = ParseMessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(position, character)| match character {
                '0' => Ok(Bit::Zero),
                '1' => Ok(Bit::One),
                _ => Err(ParseMessageError::InvalidCharacter {
                    character,
                    position,
                }),
            })
            .collect()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0
            .iter()
            .try_for_each(|bit| f.write_str(if bit.is_set() { "1" } else { "0" }))
    }
}
