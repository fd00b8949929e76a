//! 通道采样值最低有效位的读写。

use crate::message::Bit;

/// 可以按最低有效位读写的整数通道采样值。
pub trait Sample: Copy {
    fn with_lsb(self, set: bool) -> Self;
    fn lsb(self) -> bool;
}

macro_rules! impl_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                #[inline]
                fn with_lsb(self, set: bool) -> Self {
                    if set { self | 1 } else { self & !1 }
                }

                #[inline]
                fn lsb(self) -> bool {
                    self % 2 == 1
                }
            }
        )*
    };
}

impl_sample!(u8, u16, u32);

/// 将 `sample` 的最低有效位设为 `bit`，其余位保持不变。
pub fn set_channel_bit<S: Sample>(sample: S, bit: Bit) -> S {
    sample.with_lsb(bit.is_set())
}

/// 读取 `sample` 的最低有效位。
pub fn get_channel_bit<S: Sample>(sample: S) -> Bit {
    Bit::from(sample.lsb())
}
