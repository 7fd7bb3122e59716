use serde::{Deserialize, Serialize};

/// 响应模态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modality {
    ModalityUnspecified,
    Text,
    Image,
    Audio,
}

/// Reason why the prompt was blocked.
///
/// 未识别的取值会归入 `Other`，避免新增枚举导致整个响应解析失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockedReason {
    BlockedReasonUnspecified,
    Safety,
    Blocklist,
    ProhibitedContent,
    ImageSafety,
    #[serde(other)]
    Other,
}

/// The reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    FinishReasonUnspecified,
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Blocklist,
    ProhibitedContent,
    ImageSafety,
    ImageProhibitedContent,
    NoImage,
    #[serde(other)]
    Other,
}
