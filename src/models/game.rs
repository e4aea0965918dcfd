// src/models/game.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::team::MAX_TEAM_NAME_CHARS;

/// A scheduled match between two teams referenced by name.
///
/// Team names are a snapshot, not a link to a `Team` row: a renamed or deleted
/// team keeps appearing under its old name here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Game {
    pub id: i32,
    pub scheduled_at: DateTime<Utc>,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub home_card: Option<CardState>,
    pub away_card: Option<CardState>,
    pub user_id: Option<Uuid>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Game {
    /// Both scores present.
    pub fn is_played(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }

    pub fn card(&self, side: Side) -> Option<CardState> {
        match side {
            Side::Home => self.home_card,
            Side::Away => self.away_card,
        }
    }

    pub fn set_card(&mut self, side: Side, card: CardType) {
        match side {
            Side::Home => self.home_card = Some(card.into()),
            Side::Away => self.away_card = Some(card.into()),
        }
    }
}

/// Per-side disciplinary marker stored on a game.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    None,
    Yellow,
    Red,
}

impl CardState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardState::None => "none",
            CardState::Yellow => "yellow",
            CardState::Red => "red",
        }
    }

    /// Parse the stored column value. Unknown values are treated as absent.
    pub fn from_db(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "none" => Some(CardState::None),
            "yellow" => Some(CardState::Yellow),
            "red" => Some(CardState::Red),
            _ => None,
        }
    }
}

/// A card that can be issued; `CardState::None` is never issued.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum CardType {
    Yellow,
    Red,
}

impl From<CardType> for CardState {
    fn from(card: CardType) -> Self {
        match card {
            CardType::Yellow => CardState::Yellow,
            CardType::Red => CardState::Red,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

/// Fields of a game that does not exist yet.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NewGame {
    pub scheduled_at: DateTime<Utc>,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub home_score: Option<i32>,
    #[serde(default)]
    pub away_score: Option<i32>,
    #[serde(default)]
    pub home_card: Option<CardState>,
    #[serde(default)]
    pub away_card: Option<CardState>,
    #[serde(skip)]
    pub user_id: Option<Uuid>,
}

impl NewGame {
    pub fn validate(&self) -> Result<(), String> {
        validate_team_names(&self.home_team, &self.away_team)
    }
}

/// Full replacement of the editable game fields.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GameEditRequest {
    pub scheduled_at: DateTime<Utc>,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub home_score: Option<i32>,
    #[serde(default)]
    pub away_score: Option<i32>,
    #[serde(default)]
    pub home_card: Option<CardState>,
    #[serde(default)]
    pub away_card: Option<CardState>,
    /// Version the client last read; the current one is used when absent.
    #[serde(default)]
    pub version: Option<i32>,
}

impl GameEditRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_team_names(&self.home_team, &self.away_team)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScoreUpdateRequest {
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    #[serde(default)]
    pub version: Option<i32>,
}

/// Body of the card issuance endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct IssueCardRequest {
    pub match_id: i32,
    pub side: Side,
    pub card_type: CardType,
    #[serde(default)]
    pub version: Option<i32>,
}

/// Game as exposed by the JSON API, with its owner resolved.
#[derive(Debug, Serialize, Deserialize)]
pub struct GameWithOwner {
    #[serde(flatten)]
    pub game: Game,
    pub owner: Option<GameOwner>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GameOwner {
    pub id: Uuid,
    pub username: String,
}

fn validate_team_names(home_team: &str, away_team: &str) -> Result<(), String> {
    for (label, name) in [("Home team", home_team.trim()), ("Away team", away_team.trim())] {
        if name.is_empty() {
            return Err(format!("{} is required", label));
        }
        if name.chars().count() > MAX_TEAM_NAME_CHARS {
            return Err(format!("{} cannot exceed {} characters", label, MAX_TEAM_NAME_CHARS));
        }
    }
    Ok(())
}
