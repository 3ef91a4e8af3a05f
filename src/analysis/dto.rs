use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// Inbound analysis request body.
///
/// Fields are optional at the serde level so missing/empty values surface as a
/// JSON error body instead of a bare extractor rejection.
#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, rename = "mimeType")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Text,
    Product,
    Image,
}

#[derive(Debug)]
pub struct ValidRequest {
    pub mode: Mode,
    pub content: String,
    pub mime_type: Option<String>,
}

impl AnalysisRequest {
    /// Check the §4.1 invariant: `mode` and `content` present and non-empty,
    /// `mode` one of the supported values. Base64 validity of image content is
    /// deferred to the completion service.
    pub fn validate(self) -> Result<ValidRequest, RelayError> {
        let mode = match self.mode.as_deref() {
            None | Some("") => {
                return Err(RelayError::InvalidRequest("mode is required".into()));
            }
            Some("text") => Mode::Text,
            Some("product") => Mode::Product,
            Some("image") => Mode::Image,
            Some(other) => {
                return Err(RelayError::InvalidRequest(format!(
                    "unsupported mode: {other}"
                )));
            }
        };

        let content = match self.content {
            Some(c) if !c.is_empty() => c,
            _ => return Err(RelayError::InvalidRequest("content is required".into())),
        };

        Ok(ValidRequest {
            mode,
            content,
            mime_type: self.mime_type,
        })
    }
}

// --- outbound schema ---
//
// The relay returns the model's JSON verbatim after the top-level shape check,
// so these types are not on the success path; they document the schema the
// system instruction demands and back the test fixtures.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyTier {
    Safe,
    Caution,
    Flag,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRecord {
    pub name: String,
    pub inci_name: String,
    pub safety: SafetyTier,
    pub categories: Vec<String>,
    pub description: String,
    pub benefits: Vec<String>,
    pub concerns: Vec<String>,
    /// 0 (non-comedogenic) to 5 (highly comedogenic).
    pub comedogenic: u8,
    /// true / false / null (unknown).
    pub pregnancy_safe: Option<bool>,
    pub restricted_regions: Vec<String>,
    /// 1 (lowest risk) to 10.
    pub hazard_score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub overall_safety: SafetyTier,
    pub safe_count: u32,
    pub caution_count: u32,
    pub flag_count: u32,
    pub top_concerns: Vec<String>,
    pub skin_type_notes: String,
    pub pregnancy_note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub product_name: Option<String>,
    pub extracted_ingredient_text: String,
    /// Order of appearance in the source text.
    pub ingredients: Vec<IngredientRecord>,
    pub summary: AnalysisSummary,
}
