//! # 位图读写
//!
//! 通过 `image` 在字节与像素网格之间转换。BMP 为默认格式，
//! 也接受 PNG、TIFF、WebP、QOI 等无损格式。

use image::{DynamicImage, ImageError, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BitmapError {
    #[error("Image codec error: {0}")]
    Image(#[from] ImageError),
}

/// 根据文件头猜测格式并解码。
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, BitmapError> {
    let image = image::load_from_memory(bytes)?;
    log::debug!(
        "decoded {}x{} image ({:?})",
        image.width(),
        image.height(),
        image.color()
    );
    Ok(image)
}

/// 将像素网格编码为指定格式的文件字节。
pub fn encode(image: &RgbaImage, format: ImageFormat) -> Result<Vec<u8>, BitmapError> {
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, format)?;
    Ok(cursor.into_inner())
}

/// 由输出路径的扩展名决定格式，无法识别时使用 BMP。
pub fn output_format(path: &Path) -> ImageFormat {
    ImageFormat::from_path(path).unwrap_or(ImageFormat::Bmp)
}
