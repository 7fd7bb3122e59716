#![allow(dead_code)]

use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{ImageFormat, Rgb, RgbImage};
use serde_json::{json, Value};

use artisan_enhance::Client;

pub const MODEL_PATH: &str = "/v1beta/models/gemini-2.5-flash-image-preview:generateContent";

pub fn build_gemini_client(base_url: &str) -> Client {
    Client::builder()
        .api_key("test-key")
        .base_url(base_url)
        .build()
        .unwrap()
}

pub fn encode_image(format: ImageFormat, color: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(4, 4, Rgb(color));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

pub fn png_bytes() -> Vec<u8> {
    encode_image(ImageFormat::Png, [240, 230, 210])
}

/// 在 `dir/uploads/vase.jpg` 写入一张 JPEG 商品图。
pub fn write_input_image(dir: &Path) -> PathBuf {
    write_input_image_as(dir, "vase.jpg", ImageFormat::Jpeg)
}

pub fn write_input_image_as(dir: &Path, name: &str, format: ImageFormat) -> PathBuf {
    let uploads = dir.join("uploads");
    std::fs::create_dir_all(&uploads).unwrap();
    let path = uploads.join(name);
    std::fs::write(&path, encode_image(format, [90, 60, 30])).unwrap();
    path
}

pub fn inline_image_response(data: &[u8]) -> Value {
    json!({
        "candidates": [
            {
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "Here is the enhanced product photo."},
                        {"inlineData": {"mimeType": "image/png", "data": STANDARD.encode(data)}}
                    ]
                },
                "finishReason": "STOP"
            }
        ],
        "modelVersion": "gemini-2.5-flash-image-preview"
    })
}

pub fn text_only_response() -> Value {
    json!({
        "candidates": [
            {"content": {"role": "model", "parts": [{"text": "I cannot edit this image."}]}}
        ]
    })
}

pub fn dir_entries(dir: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .map(|read| read.map(|entry| entry.unwrap().path()).collect())
        .unwrap_or_default();
    entries.sort();
    entries
}
