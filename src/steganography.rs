//! # 核心隐写算法
//!
//! 按 [`PixelScanner`] 的顺序，每个像素的红色通道最低有效位承载一个消息比特。
//! 嵌入和提取都维护一个负载游标，只在实际写入或读取比特时前进。
//!
//! 载体总是像素的第 0 个通道：`Rgb`/`Rgba` 中是红色，`Luma`/`LumaA` 中是亮度。

use crate::bit::{Sample, get_channel_bit, set_channel_bit};
use crate::message::Message;
use crate::scanner::{Coordinate, PixelScanner};
use crate::trailer::{detect_marker, read_size_marker};
use image::{GenericImageView, ImageBuffer, Pixel};

/// [`embed`] 的结果：新的像素网格，以及实际写入的比特数。
///
/// 消息比像素多时，多余的比特被丢弃，`bits_embedded` 会小于消息长度。
pub struct Embedded<P: Pixel> {
    pub image: ImageBuffer<P, Vec<P::Subpixel>>,
    pub bits_embedded: usize,
}

impl<P: Pixel> Embedded<P> {
    pub fn is_truncated(&self, message: &Message) -> bool {
        self.bits_embedded < message.len()
    }
}

/// 网格能容纳的比特数，即像素总数。
pub fn capacity<I: GenericImageView>(grid: &I) -> usize {
    PixelScanner::over(grid).len()
}

/// 将 `message` 写入 `grid` 的副本。
///
/// 前 `min(len, W*H)` 个被遍历到的像素的第 0 通道 (红色) 最低位被改写，其余通道和
/// 剩余像素原样复制。`grid` 本身不会被修改。不检查容量，不会失败。
pub fn embed<I, P>(grid: &I, message: &Message) -> Embedded<P>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel,
    P::Subpixel: Sample,
{
    let (width, height) = grid.dimensions();
    let mut image = ImageBuffer::new(width, height);
    let mut bits = message.bits().iter();
    let mut bits_embedded = 0;

    for Coordinate { x, y } in PixelScanner::new(width, height) {
        let mut pixel = grid.get_pixel(x, y);
        if let Some(&bit) = bits.next() {
            let red = &mut pixel.channels_mut()[0];
            *red = set_channel_bit(*red, bit);
            bits_embedded += 1;
        }
        image.put_pixel(x, y, pixel);
    }

    log::debug!(
        "embedded {}/{} bits into {}x{} grid",
        bits_embedded,
        message.len(),
        width,
        height
    );

    Embedded {
        image,
        bits_embedded,
    }
}

/// 按遍历顺序读取至多 `count` 个第 0 通道 (红色) 最低位。网格耗尽时提前结束。
pub fn read_bits<I, P>(grid: &I, count: usize) -> Message
where
    I: GenericImageView<Pixel = P>,
    P: Pixel,
    P::Subpixel: Sample,
{
    PixelScanner::over(grid)
        .take(count)
        .map(|Coordinate { x, y }| get_channel_bit(grid.get_pixel(x, y).channels()[0]))
        .collect()
}

/// 从文件字节和对应的像素网格中恢复消息。
///
/// 文件末尾没有标记块时直接返回空消息，不会访问 `grid`。
pub fn extract<I, P>(file_bytes: &[u8], grid: &I) -> Message
where
    I: GenericImageView<Pixel = P>,
    P: Pixel,
    P::Subpixel: Sample,
{
    if !detect_marker(file_bytes) {
        log::debug!("no size marker found, nothing to extract");
        return Message::default();
    }
    let bit_count = read_size_marker(file_bytes);
    log::debug!("size marker records {} bits", bit_count);
    read_bits(grid, bit_count as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Bit;
    use crate::trailer::append_size_marker;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    fn grid(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 31 + y * 7) as u8, x as u8, y as u8, 200])
        })
    }

    fn bits(s: &str) -> Message {
        s.parse().unwrap()
    }

    #[test]
    fn two_by_two_scenario() {
        let source = RgbaImage::from_pixel(2, 2, Rgba([0b1000_0000, 10, 20, 255]));
        let message = bits("101");

        let embedded = embed(&source, &message);
        assert_eq!(embedded.bits_embedded, 3);

        let image = &embedded.image;
        assert_eq!(image.get_pixel(0, 0)[0] & 1, 1);
        assert_eq!(image.get_pixel(0, 1)[0] & 1, 0);
        assert_eq!(image.get_pixel(1, 0)[0] & 1, 1);
        assert_eq!(image.get_pixel(1, 1), source.get_pixel(1, 1));

        let mut file = Vec::new();
        append_size_marker(&mut file, message.len() as u32);
        assert_eq!(file, vec![0x55, 0x03, 0x00, 0x00, 0x00, 0x55]);
        assert_eq!(extract(&file, image), message);
    }

    #[test]
    fn other_channels_are_copied() {
        let source = grid(3, 3);
        let embedded = embed(&source, &bits("111111111"));
        for (x, y, pixel) in embedded.image.enumerate_pixels() {
            let original = source.get_pixel(x, y);
            assert_eq!(pixel[0] | 1, original[0] | 1);
            assert_eq!(&pixel.0[1..], &original.0[1..]);
        }
    }

    #[test]
    fn empty_message_leaves_grid_identical() {
        let source = grid(5, 4);
        let embedded = embed(&source, &Message::default());
        assert_eq!(embedded.bits_embedded, 0);
        assert_eq!(embedded.image, source);
    }

    #[test]
    fn round_trip_recovers_message() {
        let source = grid(7, 9);
        let message = Message::from_bytes(b"hidden!");
        let embedded = embed(&source, &message);
        assert!(!embedded.is_truncated(&message));

        let mut file = b"BM-encoded".to_vec();
        append_size_marker(&mut file, message.len() as u32);
        assert_eq!(extract(&file, &embedded.image), message);
    }

    #[test]
    fn overlong_message_is_truncated_silently() {
        let source = grid(2, 3);
        let message = bits("1010110011");
        let embedded = embed(&source, &message);

        assert_eq!(embedded.bits_embedded, capacity(&source));
        assert!(embedded.is_truncated(&message));
        assert_eq!(
            read_bits(&embedded.image, message.len()),
            bits("101011")
        );
    }

    #[test]
    fn sixteen_bit_samples_are_supported() {
        let source: ImageBuffer<Rgba<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(2, 2, Rgba([0x0100, 0, 0, 0xFFFF]));
        let embedded = embed(&source, &bits("1100"));
        assert_eq!(embedded.image.get_pixel(0, 0)[0], 0x0101);
        assert_eq!(read_bits(&embedded.image, 4), bits("1100"));
    }

    #[test]
    fn channel_zero_carries_the_bit() {
        let rgb = RgbImage::from_pixel(1, 2, Rgb([10, 21, 31]));
        let embedded = embed(&rgb, &bits("10"));
        assert_eq!(embedded.image.get_pixel(0, 0), &Rgb([11, 21, 31]));
        assert_eq!(embedded.image.get_pixel(0, 1), &Rgb([10, 21, 31]));

        let luma = GrayImage::from_pixel(2, 1, Luma([200]));
        let embedded = embed(&luma, &bits("1"));
        assert_eq!(embedded.image.get_pixel(0, 0), &Luma([201]));
        assert_eq!(read_bits(&embedded.image, 2), bits("10"));
    }

    #[test]
    fn extract_without_marker_is_empty() {
        let embedded = embed(&grid(4, 4), &bits("1111"));
        assert!(extract(b"plain bitmap bytes", &embedded.image).is_empty());
        assert!(extract(&[0x55, 0x55], &embedded.image).is_empty());
    }

    #[test]
    fn marker_of_zero_reads_nothing() {
        let mut file = Vec::new();
        append_size_marker(&mut file, 0);
        let message = extract(&file, &grid(2, 2));
        assert_eq!(message.bits(), &[] as &[Bit]);
    }
}
