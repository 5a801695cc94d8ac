use crate::{config::DF, domain::AnalysisResult, error::VisionError};

/// First balanced top-level `{...}` in `text`.
///
/// Braces inside JSON strings (and escaped quotes) are ignored, so prose or
/// code fences around the object do not matter. Returns `None` when no object
/// closes.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Extracts, parses and structurally validates a model reply.
///
/// Anything short of a complete, in-range AnalysisResult is rejected as a
/// whole. The raw reply is logged for diagnosis and never put in the error.
pub fn parse_analysis(raw: &str) -> Result<AnalysisResult, VisionError> {
    let outcome = extract_json_object(raw)
        .ok_or_else(|| String::from("no JSON object in reply"))
        .and_then(|json| {
            serde_json::from_str::<AnalysisResult>(json).map_err(|e| e.to_string())
        })
        .and_then(|mut result| {
            result.validate()?;
            result.clear_outcomes();
            Ok(result)
        });

    match outcome {
        Ok(result) => {
            if DF.log_raw_response {
                log::info!("Model reply accepted:\n{}", raw);
            }
            Ok(result)
        }
        Err(reason) => {
            log::error!("Rejected model reply ({}). Raw payload:\n{}", reason, raw);
            Err(VisionError::MalformedResponse(reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, Outcome, fixtures};

    #[test]
    fn finds_object_inside_fences_and_prose() {
        let text = "Sure! ```json\n{ \"a\": { \"b\": 1 } }\n``` hope this helps {\"c\":2}";
        assert_eq!(extract_json_object(text), Some("{ \"a\": { \"b\": 1 } }"));
    }

    #[test]
    fn ignores_braces_inside_strings() {
        let text = r#"{"reason": "range {high} \"quoted }\" end", "n": 1} trailing"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"reason": "range {high} \"quoted }\" end", "n": 1}"#)
        );
    }

    #[test]
    fn unbalanced_or_missing_objects_are_none() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("{\"open\": {\"never\": 1}"), None);
    }

    #[test]
    fn partial_object_is_malformed() {
        let raw = "Sure! ```json\n{ \"asset_class\": \"Forex\" }\n```";
        assert!(matches!(
            parse_analysis(raw),
            Err(VisionError::MalformedResponse(_))
        ));
    }

    #[test]
    fn numeric_prices_are_rejected() {
        let mut value = serde_json::to_value(fixtures::analysis(Direction::Buy, 72)).unwrap();
        value["setups"]["setup_A"]["entry"] = serde_json::json!(4338.66);
        let raw = value.to_string();
        assert!(matches!(
            parse_analysis(&raw),
            Err(VisionError::MalformedResponse(_))
        ));
    }

    #[test]
    fn fractional_confidence_is_rejected() {
        let mut value = serde_json::to_value(fixtures::analysis(Direction::Buy, 72)).unwrap();
        value["market_bias"]["confidence"] = serde_json::json!(72.5);
        assert!(parse_analysis(&value.to_string()).is_err());
    }

    #[test]
    fn unknown_direction_is_rejected() {
        let mut value = serde_json::to_value(fixtures::analysis(Direction::Buy, 72)).unwrap();
        value["market_bias"]["direction"] = serde_json::json!("LONG");
        assert!(parse_analysis(&value.to_string()).is_err());
    }

    #[test]
    fn price_strings_survive_byte_for_byte() {
        let expected = fixtures::analysis(Direction::Buy, 72);
        let raw = format!("```json\n{}\n```", serde_json::to_string_pretty(&expected).unwrap());
        let parsed = parse_analysis(&raw).unwrap();
        assert_eq!(parsed.setups.a.entry, "4338.66");
        assert_eq!(parsed, expected);

        let stored = serde_json::to_string(&parsed).unwrap();
        assert!(stored.contains(r#""entry":"4338.66""#));
    }

    #[test]
    fn model_supplied_outcomes_are_reset() {
        let mut value = serde_json::to_value(fixtures::analysis(Direction::Sell, 55)).unwrap();
        value["setups"]["setup_A"]["user_result"] = serde_json::json!("WIN");
        let parsed = parse_analysis(&value.to_string()).unwrap();
        assert_eq!(parsed.setups.a.user_result, Outcome::Pending);
    }
}
