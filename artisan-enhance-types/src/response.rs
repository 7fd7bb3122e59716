use serde::{Deserialize, Serialize};

use crate::content::{Blob, Content};
use crate::enums::{BlockedReason, FinishReason};

/// 生成内容响应。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_id: Option<String>,
}

impl GenerateContentResponse {
    /// 提取第一个候选的文本。
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.first_content()
            .and_then(Content::first_text)
            .map(ToString::to_string)
    }

    /// 提取第一个候选中的第一段内联数据。
    ///
    /// 只看第一个候选，其余候选即使带有图片也忽略。
    #[must_use]
    pub fn first_inline_data(&self) -> Option<&Blob> {
        self.first_content().and_then(Content::first_inline_data)
    }

    fn first_content(&self) -> Option<&Content> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
    }
}

/// 响应候选。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
}

/// Prompt 反馈。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<BlockedReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_reason_message: Option<String>,
}

/// 用量统计。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_token_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates_token_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_token_count: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_inline_data_only_reads_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "no image today"}]}},
                {"content": {"role": "model", "parts": [
                    {"inlineData": {"mimeType": "image/png", "data": "AQ=="}}
                ]}}
            ]
        }))
        .unwrap();
        assert_eq!(response.text(), Some("no image today".to_string()));
        assert!(response.first_inline_data().is_none());
    }

    #[test]
    fn missing_candidates_and_content_are_tolerated() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "IMAGE_SAFETY"}
        }))
        .unwrap();
        assert!(response.candidates.is_empty());
        assert!(response.first_inline_data().is_none());
        assert_eq!(
            response.prompt_feedback.unwrap().block_reason,
            Some(BlockedReason::ImageSafety)
        );

        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"finishReason": "NO_IMAGE"}],
            "usageMetadata": {"promptTokenCount": 12, "totalTokenCount": 12},
            "modelVersion": "gemini-2.5-flash-image-preview"
        }))
        .unwrap();
        assert!(response.first_inline_data().is_none());
        assert_eq!(
            response.candidates[0].finish_reason,
            Some(FinishReason::NoImage)
        );
    }

    #[test]
    fn first_inline_data_picks_earliest_part() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [
                {"text": "enhanced"},
                {"inlineData": {"mimeType": "image/webp", "data": "Aw=="}},
                {"inlineData": {"mimeType": "image/png", "data": "BA=="}}
            ]}}]
        }))
        .unwrap();
        let blob = response.first_inline_data().unwrap();
        assert_eq!(blob.mime_type, "image/webp");
        assert_eq!(blob.data, vec![3]);
    }
}
