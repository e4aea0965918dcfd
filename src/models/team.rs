// src/models/team.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq)]
pub struct Team {
    pub id: i32,
    pub name: String,
    pub founded: NaiveDate,
    pub country: Option<String>,
    pub city: Option<String>,
    pub stadium: Option<String>,
    pub emblem: Option<String>,
    pub user_id: Option<Uuid>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Matches the `VARCHAR(100)` name columns.
pub const MAX_TEAM_NAME_CHARS: usize = 100;

/// Request to create a team
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TeamRequest {
    pub name: String,
    pub founded: NaiveDate,
    pub country: Option<String>,
    pub city: Option<String>,
    pub stadium: Option<String>,
    pub emblem: Option<String>,
}

/// Request to replace a team's fields
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TeamEditRequest {
    #[serde(flatten)]
    pub team: TeamRequest,
    /// Version the client last read; the current one is used when absent.
    #[serde(default)]
    pub version: Option<i32>,
}

/// Validated team fields ready to be written.
#[derive(Debug, Clone)]
pub struct TeamFields {
    pub name: String,
    pub founded: NaiveDate,
    pub country: Option<String>,
    pub city: Option<String>,
    pub stadium: Option<String>,
    pub emblem: Option<String>,
    pub user_id: Option<Uuid>,
}

impl TeamRequest {
    pub fn validate(&self) -> Result<(), String> {
        let name = self.sanitized_name();
        if name.is_empty() {
            return Err("Team name cannot be empty".to_string());
        }

        if name.chars().count() > MAX_TEAM_NAME_CHARS {
            return Err("Team name cannot exceed 100 characters".to_string());
        }

        Ok(())
    }

    /// Team name with surrounding whitespace and control characters removed.
    pub fn sanitized_name(&self) -> String {
        self.name
            .chars()
            .filter(|&c| c != '\0' && c != '\t' && c != '\r' && c != '\n')
            .collect::<String>()
            .trim()
            .to_string()
    }

    pub fn into_fields(self, user_id: Option<Uuid>) -> TeamFields {
        TeamFields {
            name: self.sanitized_name(),
            founded: self.founded,
            country: non_blank(self.country),
            city: non_blank(self.city),
            stadium: non_blank(self.stadium),
            emblem: non_blank(self.emblem),
            user_id,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> TeamRequest {
        TeamRequest {
            name: name.to_string(),
            founded: NaiveDate::from_ymd_opt(1893, 9, 28).unwrap(),
            country: Some("Portugal".into()),
            city: Some("  ".into()),
            stadium: None,
            emblem: None,
        }
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(request("   ").validate().is_err());
        assert!(request("FC Porto").validate().is_ok());
    }

    #[test]
    fn name_made_only_of_control_characters_is_rejected() {
        assert!(request("\0").validate().is_err());
        assert!(request("\0\t\r\n ").validate().is_err());
    }

    #[test]
    fn name_length_is_counted_in_characters() {
        let accented = "é".repeat(100);
        assert!(request(&accented).validate().is_ok());
        assert!(request(&format!("{}é", accented)).validate().is_err());
    }

    #[test]
    fn fields_are_trimmed_and_blank_optionals_dropped() {
        let fields = request("\tFC Porto \n").into_fields(None);
        assert_eq!(fields.name, "FC Porto");
        assert_eq!(fields.country.as_deref(), Some("Portugal"));
        assert_eq!(fields.city, None);
    }
}
