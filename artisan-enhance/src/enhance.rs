//! Product photo enhancement with fallback to the original image.

use std::path::{Path, PathBuf};

use artisan_enhance_types::config::GenerationConfig;
use artisan_enhance_types::content::{Content, Part, Role};
use artisan_enhance_types::enums::Modality;
use artisan_enhance_types::models::GenerateContentConfig;

use crate::client::Client;
use crate::env::first_non_blank;
use crate::error::{Error, Result};
use crate::image_io::{load_input_image, save_enhanced_image};
use crate::models::Models;

/// 默认图片模型。
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";
/// 默认增强提示词。
pub const DEFAULT_PROMPT: &str =
    "Make this image look professional for an e-commerce website selling artisan products.";
/// 默认输出目录（相对当前工作目录）。
pub const DEFAULT_OUTPUT_DIR: &str = "uploads";

/// 增强配置。
#[derive(Debug, Clone)]
pub struct EnhanceConfig {
    pub model: String,
    pub prompt: String,
    pub output_dir: PathBuf,
    /// 为 `None` 时不发送 `generationConfig`，由模型决定输出模态。
    pub response_modalities: Option<Vec<Modality>>,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            response_modalities: None,
        }
    }
}

impl EnhanceConfig {
    /// 从环境变量读取配置，未设置或为空的项使用默认值。
    ///
    /// 支持 `ENHANCE_MODEL`、`ENHANCE_PROMPT`、`ENHANCE_OUTPUT_DIR`。
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(model) = first_non_blank(&["ENHANCE_MODEL"]) {
            config.model = model;
        }
        if let Some(prompt) = first_non_blank(&["ENHANCE_PROMPT"]) {
            config.prompt = prompt;
        }
        if let Some(dir) = first_non_blank(&["ENHANCE_OUTPUT_DIR"]) {
            config.output_dir = PathBuf::from(dir);
        }
        config
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    #[must_use]
    pub fn with_response_modalities(mut self, modalities: Vec<Modality>) -> Self {
        self.response_modalities = Some(modalities);
        self
    }

    fn generate_content_config(&self) -> GenerateContentConfig {
        GenerateContentConfig {
            generation_config: self.response_modalities.clone().map(|modalities| {
                GenerationConfig {
                    response_modalities: Some(modalities),
                    ..Default::default()
                }
            }),
            ..Default::default()
        }
    }
}

/// 增强结果：新图片路径，或原图路径及回退原因。
#[derive(Debug)]
pub enum EnhanceOutcome {
    Enhanced { path: PathBuf },
    Original { path: PathBuf, reason: Error },
}

impl EnhanceOutcome {
    /// 调用方应使用的图片路径。
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Enhanced { path } | Self::Original { path, .. } => path,
        }
    }

    #[must_use]
    pub fn into_path(self) -> PathBuf {
        match self {
            Self::Enhanced { path } | Self::Original { path, .. } => path,
        }
    }

    #[must_use]
    pub const fn is_enhanced(&self) -> bool {
        matches!(self, Self::Enhanced { .. })
    }

    /// 回退原因（仅当未增强）。
    #[must_use]
    pub const fn fallback_reason(&self) -> Option<&Error> {
        match self {
            Self::Original { reason, .. } => Some(reason),
            Self::Enhanced { .. } => None,
        }
    }
}

/// 图片增强器。
#[derive(Clone)]
pub struct Enhancer {
    models: Models,
    config: EnhanceConfig,
}

impl Enhancer {
    #[must_use]
    pub fn new(client: &Client, config: EnhanceConfig) -> Self {
        Self {
            models: client.models(),
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &EnhanceConfig {
        &self.config
    }

    /// 发送图片与提示词，保存第一个候选中的第一张内联图片。
    ///
    /// # Errors
    /// 输入图片无法读取、请求失败、响应中没有内联图片，或结果无法解码、写入时返回错误。
    pub async fn try_enhance(&self, image_path: impl AsRef<Path>) -> Result<PathBuf> {
        let input = load_input_image(image_path.as_ref()).await?;
        tracing::debug!(
            mime_type = %input.mime_type,
            width = input.width,
            height = input.height,
            "loaded product image"
        );

        let contents = vec![Content::from_parts(
            vec![
                Part::text(&self.config.prompt),
                Part::inline_data(input.data, input.mime_type),
            ],
            Role::User,
        )];
        let response = self
            .models
            .generate_content_with_config(
                &self.config.model,
                contents,
                self.config.generate_content_config(),
            )
            .await?;

        let blob = response.first_inline_data().ok_or(Error::NoInlineImage)?;
        save_enhanced_image(&blob.data, &self.config.output_dir).await
    }

    /// 增强图片；任何失败都记录日志并回退为原图路径。
    pub async fn enhance_product_image(&self, image_path: impl AsRef<Path>) -> EnhanceOutcome {
        let image_path = image_path.as_ref();
        match self.try_enhance(image_path).await {
            Ok(path) => {
                tracing::info!(
                    input = %image_path.display(),
                    output = %path.display(),
                    "product image enhanced"
                );
                EnhanceOutcome::Enhanced { path }
            }
            Err(reason) => {
                tracing::warn!(
                    input = %image_path.display(),
                    error = %reason,
                    "image enhancement failed, keeping original image"
                );
                EnhanceOutcome::Original {
                    path: image_path.to_path_buf(),
                    reason,
                }
            }
        }
    }
}

/// 使用默认配置增强图片，返回增强后的路径或原路径。
pub async fn enhance_product_image(client: &Client, image_path: impl AsRef<Path>) -> PathBuf {
    Enhancer::new(client, EnhanceConfig::default())
        .enhance_product_image(image_path)
        .await
        .into_path()
}
