//! Reading product photos from disk and materializing enhanced images.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, ImageReader};
use uuid::Uuid;

use crate::error::Result;

/// 输出文件名后缀。
pub const ENHANCED_SUFFIX: &str = "_enhanced.png";

/// 已加载的输入图片。
#[derive(Debug, Clone)]
pub struct InputImage {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}

/// 读取图片文件，并确认其可被识别为图片。
///
/// PNG、JPEG、WebP 原样发送；其他可解码格式（BMP、GIF、TIFF 等）先转为 PNG，
/// 接口不接受这些格式。
///
/// # Errors
/// 文件不可读，或内容不是可识别的图片时返回错误。
pub async fn load_input_image(path: &Path) -> Result<InputImage> {
    let data = tokio::fs::read(path).await?;
    let format = image::guess_format(&data)?;

    if is_upload_format(format) {
        let (width, height) =
            ImageReader::with_format(Cursor::new(&data), format).into_dimensions()?;
        return Ok(InputImage {
            data,
            mime_type: format.to_mime_type().to_string(),
            width,
            height,
        });
    }

    let decoded = image::load_from_memory_with_format(&data, format)?;
    Ok(InputImage {
        data: encode_png(&decoded)?,
        mime_type: ImageFormat::Png.to_mime_type().to_string(),
        width: decoded.width(),
        height: decoded.height(),
    })
}

const fn is_upload_format(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP
    )
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut encoded = Vec::new();
    image.write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)?;
    Ok(encoded)
}

/// 将模型返回的图片数据解码后以 PNG 写入 `output_dir`，返回新文件路径。
///
/// 编码在内存中完成，解码失败时不会产生任何文件。目录不存在时自动创建。
///
/// # Errors
/// 数据无法解码为图片，或目录创建、文件写入失败时返回错误。
pub async fn save_enhanced_image(data: &[u8], output_dir: &Path) -> Result<PathBuf> {
    let encoded = encode_png(&image::load_from_memory(data)?)?;

    tokio::fs::create_dir_all(output_dir).await?;
    let path = output_dir.join(enhanced_file_name());
    tokio::fs::write(&path, encoded).await?;
    Ok(path)
}

fn enhanced_file_name() -> String {
    format!("{}{ENHANCED_SUFFIX}", Uuid::new_v4())
}
