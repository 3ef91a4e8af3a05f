//! Prompt construction.
//!
//! Pure functions from the validated request to the outbound message. All
//! ingredient knowledge lives in the model; the instruction text only pins
//! down the response schema and the grading scales.

use crate::completion::UserMessage;

use super::dto::{Mode, ValidRequest};

/// Fixed system instruction: exact response schema plus the grading rubrics
/// for the safety tiers, the comedogenicity scale, and the hazard score.
pub const SYSTEM_INSTRUCTION: &str = r#"You are a skincare ingredient analyst. You will be given a skincare product's ingredient list, a product name, or a photo of a product label. Analyze every ingredient and respond with a single JSON object, and nothing else, matching exactly this schema:

{
  "productName": string or null,
  "extractedIngredientText": string (the ingredient list as you read or assumed it),
  "ingredients": [
    {
      "name": string (common name),
      "inciName": string (INCI/scientific name),
      "safety": "safe" | "caution" | "flag",
      "categories": [string] (e.g. "humectant", "preservative", "fragrance", "surfactant"),
      "description": string (one or two sentences),
      "benefits": [string],
      "concerns": [string],
      "comedogenic": integer 0-5,
      "pregnancySafe": true | false | null,
      "restrictedRegions": [string] (regions where the ingredient is restricted or banned, empty if none),
      "hazardScore": integer 1-10
    }
  ],
  "summary": {
    "overallSafety": "safe" | "caution" | "flag",
    "safeCount": integer,
    "cautionCount": integer,
    "flagCount": integer,
    "topConcerns": [string] (at most 3),
    "skinTypeNotes": string (which skin types this product suits or should avoid it),
    "pregnancyNote": string
  }
}

List ingredients in their order of appearance in the source text.

Grading rubric:
- "safe": well-tolerated by most users, no significant documented concerns at cosmetic concentrations.
- "caution": a potential irritant, sensitizer, or pore-clogger for some users, or an ingredient with mixed evidence.
- "flag": documented significant health concern, or restricted/banned in major markets.
- comedogenic: 0 means will not clog pores, 5 means highly likely to clog pores.
- hazardScore: 1 means lowest risk, 10 means highest risk, in the style of consumer ingredient-safety databases.

Respond with ONLY the JSON object. Do not wrap it in markdown code fences and do not add any text before or after it."#;

const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Build the single user message for the completion service.
///
/// For `text` mode the wording depends on a local shape guess; the model is
/// separately instructed to re-decide product-name vs. ingredient-list for
/// itself, so the guess only affects phrasing.
pub fn build_user_message(request: &ValidRequest) -> UserMessage {
    match request.mode {
        Mode::Image => UserMessage::Image {
            data: request.content.clone(),
            mime_type: request
                .mime_type
                .clone()
                .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string()),
            instruction: "This is a photo of a skincare product label. Extract the complete \
                          ingredient list from the label and analyze every ingredient you find. \
                          Put the ingredient text you read into extractedIngredientText."
                .to_string(),
        },
        Mode::Product => UserMessage::Text(product_instruction(&request.content)),
        Mode::Text => {
            if looks_like_product_name(&request.content) {
                UserMessage::Text(format!(
                    "The following input is either a skincare product name or a very short \
                     ingredient list: \"{}\". If it is a product you recognize, analyze its \
                     known ingredient list and set productName; if it is a product you do not \
                     recognize, analyze the typical ingredients for that product category; \
                     otherwise treat it as an ingredient list and set productName to null.",
                    request.content
                ))
            } else {
                UserMessage::Text(format!(
                    "Analyze this skincare product ingredient list. Set productName to null \
                     unless the list itself names the product.\n\nIngredients:\n{}",
                    request.content
                ))
            }
        }
    }
}

fn product_instruction(name: &str) -> String {
    format!(
        "Analyze the skincare product named \"{name}\". If you recognize this product, use its \
         known ingredient list and set productName to its name. If you do not \
         recognize it, analyze the typical ingredients for that product category and set \
         productName to null."
    )
}

/// Shape guess: 3 or fewer comma/newline-delimited segments and under 80
/// characters reads as a product name rather than an ingredient list.
pub fn looks_like_product_name(content: &str) -> bool {
    let segments = content
        .split([',', '\n'])
        .filter(|s| !s.trim().is_empty())
        .count();
    segments <= 3 && content.trim().len() < 80
}

#[cfg(test)]
mod prompt_tests {
    use super::*;

    fn text_request(content: &str) -> ValidRequest {
        ValidRequest {
            mode: Mode::Text,
            content: content.to_string(),
            mime_type: None,
        }
    }

    #[test]
    fn test_short_name_reads_as_product() {
        assert!(looks_like_product_name("CeraVe Moisturizing Cream"));
        assert!(looks_like_product_name("The Ordinary, Niacinamide 10% + Zinc 1%"));
    }

    #[test]
    fn test_ingredient_dump_reads_as_list() {
        assert!(!looks_like_product_name(
            "Water, Glycerin, Niacinamide, Phenoxyethanol, Fragrance"
        ));
        // Few segments but long enough to be a list fragment.
        let long = format!("{}, {}", "a".repeat(50), "b".repeat(50));
        assert!(!looks_like_product_name(&long));
    }

    #[test]
    fn test_text_mode_product_path() {
        let message = build_user_message(&text_request("CeraVe Moisturizing Cream"));
        let UserMessage::Text(text) = message else {
            panic!("expected text message");
        };
        assert!(text.contains("product name"));
        assert!(!text.contains("Ingredients:\n"));
    }

    #[test]
    fn test_text_mode_ingredient_path() {
        let message = build_user_message(&text_request(
            "Water, Glycerin, Niacinamide, Phenoxyethanol, Fragrance",
        ));
        let UserMessage::Text(text) = message else {
            panic!("expected text message");
        };
        assert!(text.contains("Ingredients:\n"));
    }

    #[test]
    fn test_image_mode_defaults_mime_type() {
        let message = build_user_message(&ValidRequest {
            mode: Mode::Image,
            content: "aGVsbG8=".into(),
            mime_type: None,
        });
        let UserMessage::Image { data, mime_type, instruction } = message else {
            panic!("expected image message");
        };
        assert_eq!(data, "aGVsbG8=");
        assert_eq!(mime_type, "image/jpeg");
        assert!(instruction.contains("label"));
    }

    #[test]
    fn test_image_mode_keeps_given_mime_type() {
        let message = build_user_message(&ValidRequest {
            mode: Mode::Image,
            content: "aGVsbG8=".into(),
            mime_type: Some("image/png".into()),
        });
        let UserMessage::Image { mime_type, .. } = message else {
            panic!("expected image message");
        };
        assert_eq!(mime_type, "image/png");
    }

    #[test]
    fn test_system_instruction_pins_schema() {
        assert!(SYSTEM_INSTRUCTION.contains("\"ingredients\""));
        assert!(SYSTEM_INSTRUCTION.contains("\"safe\" | \"caution\" | \"flag\""));
        assert!(SYSTEM_INSTRUCTION.contains("integer 0-5"));
        assert!(SYSTEM_INSTRUCTION.contains("integer 1-10"));
    }
}
