use serde_json::Value;
use tracing::debug;

/// Recover a JSON document from a reply that is not guaranteed to be
/// well-formed: strip surrounding code fences and single backticks, try a
/// strict parse, then fall back to the first-`{`-to-last-`}` substring.
/// Returns `None` when no JSON can be salvaged; the caller substitutes its
/// fallback payload.
pub fn salvage_json(raw: &str) -> Option<Value> {
    let mut cleaned = raw.trim();
    if cleaned.is_empty() {
        return None;
    }

    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest.trim();
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest.trim();
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest.trim();
    }

    if cleaned.len() >= 2 && cleaned.starts_with('`') && cleaned.ends_with('`') {
        cleaned = cleaned[1..cleaned.len() - 1].trim();
    }

    match serde_json::from_str::<Value>(cleaned) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(error = %err, "strict parse failed, attempting brace extraction");
            let start = cleaned.find('{')?;
            let end = cleaned.rfind('}')?;
            if end <= start {
                return None;
            }
            serde_json::from_str::<Value>(&cleaned[start..=end]).ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json() {
        let value = salvage_json(r#"{"risk_level": "High"}"#).expect("parses");
        assert_eq!(value["risk_level"], "High");
    }

    #[test]
    fn code_fenced_reply_parses_like_unwrapped() {
        let bare = salvage_json(r#"{"risk_level": "Low"}"#);
        let fenced = salvage_json("```json\n{\"risk_level\": \"Low\"}\n```");
        let plain_fence = salvage_json("```\n{\"risk_level\": \"Low\"}\n```");
        assert_eq!(bare, fenced);
        assert_eq!(bare, plain_fence);
    }

    #[test]
    fn strips_single_backticks() {
        let value = salvage_json("`{\"risk_level\": \"Medium\"}`").expect("parses");
        assert_eq!(value["risk_level"], "Medium");
    }

    #[test]
    fn extracts_object_embedded_in_prose() {
        let raw = "Here is the assessment you asked for:\n{\"risk_level\": \"High\", \"confidence_percentage\": 90}\nLet me know if you need more detail.";
        let value = salvage_json(raw).expect("salvages embedded object");
        assert_eq!(value["confidence_percentage"], 90);
    }

    #[test]
    fn unrecoverable_input_yields_none() {
        assert!(salvage_json("").is_none());
        assert!(salvage_json("   ").is_none());
        assert!(salvage_json("no json here").is_none());
        assert!(salvage_json("} backwards {").is_none());
    }
}
