use regex::Regex;
use std::sync::OnceLock;

/// Parses PostgreSQL constraint violation messages into structured
/// (entity, field, value) information.
///
/// Works from the constraint name first ("users_email_key",
/// "cats_owner_fkey") and falls back to the message text.
pub struct ConstraintParser;

/// Compiled regex patterns, cached for the process lifetime
struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    table_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // "Key (field)=(value)" in DETAIL lines
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").unwrap(),
            // column names in quotes
            column_name: Regex::new(r#"column "([^"]+)""#).unwrap(),
            // table names in quotes
            table_name: Regex::new(r#"table "([^"]+)""#).unwrap(),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Parses a unique violation into (entity, field, value).
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some(constraint) = constraint_name {
            if let Some((entity, field)) = Self::parse_constraint_name(constraint) {
                if let Some((_, value)) = Self::extract_key_value_from_message(message) {
                    return Some((entity, field, value));
                }
                return Some((entity, field, "duplicate_value".to_string()));
            }
        }

        // Fallback: parse from the error message directly
        if let Some((field, value)) = Self::extract_key_value_from_message(message) {
            let entity = Self::extract_table_from_message(message)
                .unwrap_or_else(|| "resource".to_string());
            return Some((entity, field, value));
        }

        None
    }

    /// Parses a not-null violation into (entity, field).
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        if let Some(field) = Self::extract_column_from_message(message) {
            let entity = Self::extract_table_from_message(message)
                .or_else(|| {
                    constraint_name.and_then(|c| Self::parse_constraint_name(c).map(|(e, _)| e))
                })
                .unwrap_or_else(|| "resource".to_string());
            return Some((entity, field));
        }

        None
    }

    /// Parses a foreign key violation into (entity, field, referenced value).
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some(constraint) = constraint_name {
            if let Some((entity, field)) = Self::parse_constraint_name(constraint) {
                if let Some((_, value)) = Self::extract_key_value_from_message(message) {
                    return Some((entity, field, value));
                }
                return Some((entity, field, "invalid_reference".to_string()));
            }
        }

        if let Some((field, value)) = Self::extract_key_value_from_message(message) {
            let entity = Self::extract_table_from_message(message)
                .unwrap_or_else(|| "resource".to_string());
            return Some((entity, field, value));
        }

        None
    }

    /// Parses a check violation into (entity, field).
    pub fn parse_check_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        if let Some(constraint) = constraint_name {
            if let Some((entity, field)) = Self::parse_constraint_name(constraint) {
                return Some((entity, field));
            }
        }

        if let Some(field) = Self::extract_column_from_message(message) {
            let entity = Self::extract_table_from_message(message)
                .unwrap_or_else(|| "resource".to_string());
            return Some((entity, field));
        }

        None
    }

    /// Splits a Postgres constraint name of the form
    /// `<table>_<field...>_<suffix>` into (table, field). The field part
    /// may itself contain underscores ("users_user_name_key").
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let stem = ["_key", "_fkey", "_idx", "_check"]
            .iter()
            .find_map(|suffix| constraint_name.strip_suffix(suffix))?;
        let (entity, field) = stem.split_once('_')?;
        if entity.is_empty() || field.is_empty() {
            return None;
        }
        Some((entity.to_string(), field.to_string()))
    }

    /// Extracts a `column "..."` capture from the message.
    pub fn extract_column_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .column_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Extracts a `table "..."` capture from the message.
    pub fn extract_table_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .table_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Extracts the `Key (field)=(value)` pair from a DETAIL line.
    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        Self::patterns().key_value.captures(message).and_then(|caps| {
            let field = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((field, value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_constraint_name_unique() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("users_email_key"),
            Some(("users".to_string(), "email".to_string()))
        );
    }

    #[test]
    fn test_parse_constraint_name_multi_part_field() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("users_user_name_key"),
            Some(("users".to_string(), "user_name".to_string()))
        );
    }

    #[test]
    fn test_parse_constraint_name_foreign_key() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("cats_owner_fkey"),
            Some(("cats".to_string(), "owner".to_string()))
        );
    }

    #[test]
    fn test_parse_constraint_name_unknown_suffix() {
        assert_eq!(ConstraintParser::parse_constraint_name("users_pkey"), None);
    }

    #[test]
    fn test_parse_unique_violation_with_detail() {
        let message = "duplicate key value violates unique constraint \"users_email_key\"\nDETAIL: Key (email)=(musti@example.com) already exists.";
        assert_eq!(
            ConstraintParser::parse_unique_violation(message, Some("users_email_key")),
            Some((
                "users".to_string(),
                "email".to_string(),
                "musti@example.com".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_unique_violation_without_constraint_name() {
        let message = "duplicate key value violates unique constraint on table \"users\"\nDETAIL: Key (email)=(musti@example.com) already exists.";
        assert_eq!(
            ConstraintParser::parse_unique_violation(message, None),
            Some((
                "users".to_string(),
                "email".to_string(),
                "musti@example.com".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_not_null_violation() {
        let message = "null value in column \"cat_name\" violates not-null constraint";
        assert_eq!(
            ConstraintParser::parse_not_null_violation(message, None),
            Some(("resource".to_string(), "cat_name".to_string()))
        );
    }

    #[test]
    fn test_parse_foreign_key_violation() {
        let message = "insert or update on table \"cats\" violates foreign key constraint \"cats_owner_fkey\"\nDETAIL: Key (owner)=(999) is not present in table \"users\".";
        assert_eq!(
            ConstraintParser::parse_foreign_key_violation(message, Some("cats_owner_fkey")),
            Some(("cats".to_string(), "owner".to_string(), "999".to_string()))
        );
    }

    #[test]
    fn test_extract_key_value() {
        let message = "DETAIL: Key (owner)=(3) is still referenced from table \"cats\".";
        assert_eq!(
            ConstraintParser::extract_key_value_from_message(message),
            Some(("owner".to_string(), "3".to_string()))
        );
    }
}
