//! Label rendering
//!
//! Templates are label-printer XML with `{PLACEHOLDER}` slots. Rendering
//! substitutes context values verbatim; when the context carries a cost
//! and a price, an upcharge code summarizing the markup is injected so
//! price stickers can encode it without exposing the cost.

use serde_json::{Map, Value};

/// Markup code in five-point increments: 32% markup becomes `U30`,
/// 65.8% rounds to `U65`. `None` when the inputs do not allow the
/// calculation (missing or non-positive cost).
pub fn upcharge_code(cost: Option<f64>, price: Option<f64>) -> Option<String> {
    let cost = cost?;
    let price = price?;
    if cost <= 0.0 {
        return None;
    }
    let markup = (price - cost) / cost * 100.0;
    let rounded = if markup <= 0.0 {
        0
    } else {
        ((markup / 5.0).round() * 5.0) as i64
    };
    Some(format!("U{:02}", rounded))
}

/// Inject `UPCHARGE_CODE` into a render context when cost and price are
/// present under any of their accepted spellings.
pub fn prepare_label_context(mut context: Map<String, Value>) -> Map<String, Value> {
    if !context.contains_key("UPCHARGE_CODE") {
        let price = lookup_number(&context, &["PRICE", "price", "Price"]);
        let cost = lookup_number(&context, &["UNIT_COST", "unit_cost", "COST", "cost"]);
        if let Some(code) = upcharge_code(cost, price) {
            context.insert("UPCHARGE_CODE".to_string(), Value::String(code));
        }
    }
    context
}

/// Replace every `{KEY}` occurrence with its context value.
pub fn render_label(template_xml: &str, context: &Map<String, Value>) -> String {
    let mut xml = template_xml.to_string();
    for (key, value) in context {
        let needle = format!("{{{}}}", key);
        xml = xml.replace(&needle, &value_text(value));
    }
    xml
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn lookup_number(context: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    for key in keys {
        if let Some(value) = context.get(*key) {
            match value {
                Value::Number(number) => return number.as_f64(),
                Value::String(text) => {
                    let cleaned = text.trim().trim_start_matches('$');
                    if let Ok(parsed) = cleaned.parse::<f64>() {
                        return Some(parsed);
                    }
                }
                _ => {}
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context(entries: Value) -> Map<String, Value> {
        entries.as_object().unwrap().clone()
    }

    #[test]
    fn upcharge_rounds_to_five_point_steps() {
        assert_eq!(upcharge_code(Some(10.0), Some(13.2)).as_deref(), Some("U30"));
        assert_eq!(upcharge_code(Some(10.0), Some(16.58)).as_deref(), Some("U65"));
        assert_eq!(upcharge_code(Some(10.0), Some(9.0)).as_deref(), Some("U00"));
        assert_eq!(upcharge_code(Some(0.0), Some(9.0)), None);
        assert_eq!(upcharge_code(None, Some(9.0)), None);
    }

    #[test]
    fn renders_placeholders_and_injected_code() {
        let ctx = prepare_label_context(context(json!({
            "SKU": "WID-001",
            "PRICE": "$20.00",
            "UNIT_COST": 10.0,
        })));
        let xml = render_label("<label>{SKU} {UPCHARGE_CODE}</label>", &ctx);
        assert_eq!(xml, "<label>WID-001 U100</label>");
    }

    #[test]
    fn explicit_upcharge_code_is_left_alone() {
        let ctx = prepare_label_context(context(json!({
            "UPCHARGE_CODE": "U15",
            "PRICE": 20.0,
            "COST": 10.0,
        })));
        assert_eq!(ctx.get("UPCHARGE_CODE"), Some(&json!("U15")));
    }
}
