//! # 像素遍历顺序
//!
//! 嵌入与提取共享同一个遍历顺序：外层 `x` 从 `0` 到 `W-1`，内层 `y` 从 `0` 到 `H-1`
//! (按列优先)。坐标总是相对于像素网格自身的左上角，因此对 `SubImage`
//! 之类带偏移的视图同样适用。

use image::GenericImageView;
use std::iter::FusedIterator;

/// 相对于网格左上角的像素坐标。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

/// 按列优先顺序惰性产生 `W*H` 个坐标。克隆即可重新开始遍历。
#[derive(Debug, Clone)]
pub struct PixelScanner {
    width: u32,
    height: u32,
    next: u64,
}

impl PixelScanner {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            next: 0,
        }
    }

    /// 以网格的宽高构造遍历器。
    pub fn over<I: GenericImageView>(grid: &I) -> Self {
        let (width, height) = grid.dimensions();
        Self::new(width, height)
    }

    fn total(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl Iterator for PixelScanner {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        if self.next >= self.total() {
            return None;
        }
        let height = u64::from(self.height);
        // total > 0 implies height > 0
        let coordinate = Coordinate {
            x: (self.next / height) as u32,
            y: (self.next % height) as u32,
        };
        self.next += 1;
        Some(coordinate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.total() - self.next).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PixelScanner {}

impl FusedIterator for PixelScanner {}
