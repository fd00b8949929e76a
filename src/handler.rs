//! # 命令处理逻辑模块
//!
//! 包含处理 `hide` 和 `recover` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::bitmap;
use crate::cli::{HideArgs, RecoverArgs};
use crate::constants::{DEFAULT_MESSAGE, HIDDEN_PREFIX, RECOVERED_PREFIX};
use crate::message::Message;
use crate::steganography::{embed, extract};
use crate::trailer::{append_size_marker, detect_marker};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// 在 `source` 同一目录下生成 `<prefix><name>` 形式的默认输出路径。
fn default_output(source: &Path, prefix: &str, name: &str) -> PathBuf {
    source.with_file_name(format!("{prefix}{name}"))
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

fn load_message(args: &HideArgs) -> Result<Message> {
    if let Some(text) = &args.text {
        let bytes = fs::read(text).with_context(|| {
            format!(
                "Unable to read text file: {}",
                text.to_string_lossy().red().bold()
            )
        })?;
        return Ok(Message::from_bytes(&bytes));
    }

    let bits = args.bits.as_deref().unwrap_or_else(|| {
        log::debug!("no message given, using built-in message {DEFAULT_MESSAGE}");
        DEFAULT_MESSAGE
    });
    bits.parse::<Message>()
        .with_context(|| format!("Invalid bit string: {}", bits.red().bold()))
}

fn read_image_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 读取图像与消息，将消息嵌入红色通道，按输出路径的扩展名编码 (默认 BMP)，
/// 最后在文件末尾追加长度标记块并写入目标文件。
///
/// 消息超出图像容量时不会报错，多余的比特被丢弃并给出警告。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的图像或文本文件，或比特串不合法。
/// * 图像无法解码或编码。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = match &args.dest {
        Some(dest) => dest.clone(),
        None => {
            let name = args
                .image
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image.bmp".to_owned());
            default_output(&args.image, HIDDEN_PREFIX, &name)
        }
    };
    ensure_writable(&dest, args.force)?;

    let message = load_message(&args)?;
    let bit_count = u32::try_from(message.len()).with_context(|| {
        format!(
            "Message is too long: {} bits do not fit in the size marker.",
            message.len().to_string().red().bold()
        )
    })?;

    let file = read_image_bytes(&args.image)?;
    let picture = bitmap::decode(&file).with_context(|| {
        format!(
            "Unable to decode image: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let embedded = embed(&picture, &message);
    if embedded.is_truncated(&message) {
        log::warn!(
            "image holds only {} of {} bits, the rest were dropped",
            embedded.bits_embedded,
            message.len()
        );
    }

    let mut output = bitmap::encode(&embedded.image, bitmap::output_format(&dest))
        .context("Failed to encode the doctored image.")?;
    append_size_marker(&mut output, bit_count);

    fs::write(&dest, output).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "{} bits have been hidden and saved: {}",
        embedded.bits_embedded.to_string().green().bold(),
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 文件末尾没有标记块时得到空消息，图像不会被解码。否则解码整个文件，
/// 按标记块记录的比特数读取消息，打印比特串并将其按字节打包写入目标文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的图像文件，或带标记的图像无法解码。
/// * 无法写入到目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let text = match &args.text {
        Some(text) => text.clone(),
        None => {
            let stem = args
                .image
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_owned());
            default_output(&args.image, RECOVERED_PREFIX, &format!("{stem}.txt"))
        }
    };
    ensure_writable(&text, args.force)?;

    let file = read_image_bytes(&args.image)?;

    let message = if detect_marker(&file) {
        // 解码器会忽略文件末尾的标记块，因此始终解码完整文件
        let picture = bitmap::decode(&file).with_context(|| {
            format!(
                "Unable to decode image: {}. \nThe size marker is present but the image data is corrupted.",
                args.image.to_string_lossy().red().bold()
            )
        })?;
        extract(&file, &picture)
    } else {
        log::info!("no size marker at the end of the file, no hidden message");
        Message::default()
    };

    println!("Extracted from file: [{}]", message.to_string().cyan());

    fs::write(&text, message.to_bytes()).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            text.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "{} bits have been recovered and saved: {}",
        message.len().to_string().green().bold(),
        text.to_string_lossy().green().bold()
    );
    Ok(())
}
