use std::sync::Arc;

use uuid::Uuid;

use crate::db::repository::{is_unique_violation, SaveOutcome, TeamRepository};
use crate::league::error::{Entity, LeagueError};
use crate::models::team::{Team, TeamEditRequest, TeamRequest};

const DUPLICATE_NAME: &str = "A team with the same name already exists.";

/// Team administration with duplicate-name checks.
pub struct TeamService {
    teams: Arc<dyn TeamRepository>,
}

impl TeamService {
    pub fn new(teams: Arc<dyn TeamRepository>) -> Self {
        Self { teams }
    }

    pub async fn list(&self) -> Result<Vec<Team>, LeagueError> {
        Ok(self.teams.get_all().await?)
    }

    pub async fn get(&self, team_id: i32) -> Result<Team, LeagueError> {
        self.teams
            .get_by_id(team_id)
            .await?
            .ok_or_else(|| LeagueError::team_not_found(team_id))
    }

    pub async fn create(&self, request: TeamRequest, owner: Option<Uuid>) -> Result<Team, LeagueError> {
        request.validate().map_err(LeagueError::Validation)?;
        let fields = request.into_fields(owner);

        if self.teams.get_by_name(&fields.name).await?.is_some() {
            return Err(LeagueError::Validation(DUPLICATE_NAME.to_string()));
        }

        let team = self.teams.create(fields).await.map_err(map_unique_violation)?;
        tracing::info!("Created team {} ({})", team.id, team.name);
        Ok(team)
    }

    pub async fn edit(
        &self,
        team_id: i32,
        request: TeamEditRequest,
        editor: Option<Uuid>,
    ) -> Result<Team, LeagueError> {
        request.team.validate().map_err(LeagueError::Validation)?;

        let current = self.get(team_id).await?;
        let expected_version = request.version.unwrap_or(current.version);
        let fields = request.team.into_fields(editor.or(current.user_id));

        if let Some(existing) = self.teams.get_by_name(&fields.name).await? {
            if existing.id != team_id {
                return Err(LeagueError::Validation(DUPLICATE_NAME.to_string()));
            }
        }

        let outcome = self
            .teams
            .save(team_id, fields, expected_version)
            .await
            .map_err(map_unique_violation)?;

        match outcome {
            SaveOutcome::Saved(team) => {
                tracing::info!("Updated team {} ({}) to version {}", team.id, team.name, team.version);
                Ok(team)
            }
            SaveOutcome::Conflict => {
                if !self.teams.exists(team_id).await? {
                    return Err(LeagueError::team_not_found(team_id));
                }
                tracing::warn!("Concurrent modification of team {}", team_id);
                Err(LeagueError::ConcurrencyConflict { entity: Entity::Team, id: team_id })
            }
        }
    }

    /// Games keep referencing the team by name after it is gone.
    pub async fn delete(&self, team_id: i32) -> Result<(), LeagueError> {
        if !self.teams.delete(team_id).await? {
            return Err(LeagueError::team_not_found(team_id));
        }
        tracing::info!("Deleted team {}", team_id);
        Ok(())
    }
}

fn map_unique_violation(error: sqlx::Error) -> LeagueError {
    if is_unique_violation(&error) {
        LeagueError::Validation(DUPLICATE_NAME.to_string())
    } else {
        LeagueError::Database(error)
    }
}
