use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use utoipa::ToSchema;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Uniform response wrapper returned by every API operation.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationIssue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            details: None,
            count: None,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn list(items: Vec<T>) -> Self {
        let count = items.len();
        Self {
            count: Some(count),
            ..Self::ok(items)
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            details: None,
            count: None,
            message: None,
        }
    }

    pub fn with_details(mut self, details: Vec<ValidationIssue>) -> Self {
        self.details = Some(details);
        self
    }
}

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationIssue {
    /// Dotted path to the offending field, e.g. `exercises[0].sets`.
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Flattens nested validator output into path-addressed issues, sorted
    /// by path so the result does not depend on hash order.
    pub fn from_errors(errors: &ValidationErrors) -> Vec<Self> {
        let mut issues = Vec::new();
        collect_issues(errors, "", &mut issues);
        issues.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
        issues
    }
}

fn collect_issues(errors: &ValidationErrors, prefix: &str, issues: &mut Vec<ValidationIssue>) {
    for (field, kind) in errors.errors() {
        let field = camel_case(field);
        let path = if prefix.is_empty() {
            field
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                issues.extend(field_errors.iter().map(|e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed '{}' check", e.code));
                    ValidationIssue::new(path.clone(), message)
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_issues(nested, &path, issues),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_issues(nested, &format!("{}[{}]", path, index), issues);
                }
            }
        }
    }
}

/// Validator reports Rust field names; the wire format is camelCase.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Treats a missing or blank query value as "not provided".
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Lower date bound: RFC 3339 timestamp, or a plain date meaning its first instant.
pub fn lower_date_bound<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    date_bound(deserializer, NaiveTime::MIN)
}

/// Upper date bound: RFC 3339 timestamp, or a plain date meaning its last instant.
pub fn upper_date_bound<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let end_of_day = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
        .ok_or_else(|| de::Error::custom("invalid end of day"))?;
    date_bound(deserializer, end_of_day)
}

fn date_bound<'de, D>(deserializer: D, time: NaiveTime) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    let Some(value) = raw.as_deref().map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(timestamp.with_timezone(&Utc)));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| Some(date.and_time(time).and_utc()))
        .map_err(|_| {
            de::Error::custom(format!(
                "invalid date '{}', expected YYYY-MM-DD or an RFC 3339 timestamp",
                value
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Params {
        #[serde(default, deserialize_with = "empty_as_none")]
        flag: Option<bool>,
        #[serde(default, deserialize_with = "lower_date_bound")]
        from: Option<DateTime<Utc>>,
        #[serde(default, deserialize_with = "upper_date_bound")]
        to: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_blank_values_are_absent() {
        let params: Params =
            serde_json::from_value(json!({ "flag": "", "from": " ", "to": null })).unwrap();
        assert!(params.flag.is_none());
        assert!(params.from.is_none());
        assert!(params.to.is_none());
    }

    #[test]
    fn test_plain_dates_cover_whole_day() {
        let params: Params = serde_json::from_value(
            json!({ "flag": "true", "from": "2024-03-01", "to": "2024-03-01" }),
        )
        .unwrap();
        assert_eq!(params.flag, Some(true));
        assert_eq!(params.from.unwrap().to_rfc3339(), "2024-03-01T00:00:00+00:00");
        assert!(params.to.unwrap() > params.from.unwrap());
        assert_eq!(params.to.unwrap().date_naive(), params.from.unwrap().date_naive());
    }

    #[test]
    fn test_rfc3339_bounds_are_normalized_to_utc() {
        let params: Params =
            serde_json::from_value(json!({ "from": "2024-03-01T10:00:00+02:00" })).unwrap();
        assert_eq!(params.from.unwrap().to_rfc3339(), "2024-03-01T08:00:00+00:00");
    }

    #[test]
    fn test_garbage_date_is_rejected() {
        let result: Result<Params, _> = serde_json::from_value(json!({ "from": "yesterday" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_camel_case_field_names() {
        assert_eq!(camel_case("set_number"), "setNumber");
        assert_eq!(camel_case("name"), "name");
    }

    #[test]
    fn test_list_envelope_counts_items() {
        let body = serde_json::to_value(ApiResponse::list(vec![1, 2, 3])).unwrap();
        assert_eq!(body, json!({ "success": true, "data": [1, 2, 3], "count": 3 }));
    }

    #[test]
    fn test_failure_envelope_omits_data() {
        let body = serde_json::to_value(
            ApiResponse::failure("Validation failed")
                .with_details(vec![ValidationIssue::new("name", "required")]),
        )
        .unwrap();
        assert_eq!(
            body,
            json!({
                "success": false,
                "error": "Validation failed",
                "details": [{ "field": "name", "message": "required" }]
            })
        );
    }
}
