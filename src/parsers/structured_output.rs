// Structured output parser - validates the JSON cost estimate reply

use crate::models::{CostEstimate, CostEstimateItem};
use serde_json::{Map, Value};

/// Error type for structured output parsing
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredOutputError {
    pub message: String,
    /// Path of the offending field, e.g. `breakdown[2].amount`
    pub field: Option<String>,
}

impl StructuredOutputError {
    fn at(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

impl std::fmt::Display for StructuredOutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "Field '{}': {}", field, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for StructuredOutputError {}

/// Strip a surrounding ```json fence if the model added one anyway
fn unfence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn require_str(obj: &Map<String, Value>, path: &str, key: &str) -> Result<String, StructuredOutputError> {
    let field = if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    };
    match obj.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(StructuredOutputError::at(
            field,
            format!("expected a string, got {}", type_name(other)),
        )),
        None => Err(StructuredOutputError::at(field, "missing required field")),
    }
}

fn require_number(obj: &Map<String, Value>, path: &str, key: &str) -> Result<f64, StructuredOutputError> {
    let field = if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    };
    match obj.get(key) {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| StructuredOutputError::at(field, "number out of range")),
        Some(other) => Err(StructuredOutputError::at(
            field,
            format!("expected a number, got {}", type_name(other)),
        )),
        None => Err(StructuredOutputError::at(field, "missing required field")),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn parse_item(index: usize, value: &Value) -> Result<CostEstimateItem, StructuredOutputError> {
    let path = format!("breakdown[{}]", index);
    let obj = value.as_object().ok_or_else(|| {
        StructuredOutputError::at(
            path.clone(),
            format!("expected an object, got {}", type_name(value)),
        )
    })?;

    Ok(CostEstimateItem {
        category: require_str(obj, &path, "category")?,
        amount: require_number(obj, &path, "amount")?,
        description: require_str(obj, &path, "description")?,
    })
}

/// Parse and validate the text of a structured cost reply.
///
/// Every field the response schema declares is checked before anything is
/// returned; a reply that is almost right is still rejected.
pub fn parse_cost_estimate(text: &str) -> Result<CostEstimate, StructuredOutputError> {
    let body = unfence(text);
    if body.is_empty() {
        return Err(StructuredOutputError {
            message: "Empty response text".to_string(),
            field: None,
        });
    }

    let value: Value = serde_json::from_str(body).map_err(|e| StructuredOutputError {
        message: format!("Invalid JSON: {}", e),
        field: None,
    })?;

    let obj = value.as_object().ok_or_else(|| StructuredOutputError {
        message: format!("Expected a JSON object, got {}", type_name(&value)),
        field: None,
    })?;

    let currency = require_str(obj, "", "currency")?;
    let total_estimated_cost = require_number(obj, "", "totalEstimatedCost")?;
    let summary = require_str(obj, "", "summary")?;

    let breakdown = match obj.get("breakdown") {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| parse_item(i, item))
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(StructuredOutputError::at(
                "breakdown",
                format!("expected an array, got {}", type_name(other)),
            ))
        }
        None => return Err(StructuredOutputError::at("breakdown", "missing required field")),
    };

    Ok(CostEstimate {
        currency,
        total_estimated_cost,
        breakdown,
        summary,
    })
}
