use std::collections::BTreeSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::db::repository::{GameRepository, TeamRepository};
use crate::league::error::LeagueError;
use crate::models::game::{Game, NewGame};

/// Game scheduling and lookup. Score and card changes go through
/// `MatchMutationService`.
pub struct GameService {
    games: Arc<dyn GameRepository>,
    teams: Arc<dyn TeamRepository>,
}

impl GameService {
    pub fn new(games: Arc<dyn GameRepository>, teams: Arc<dyn TeamRepository>) -> Self {
        Self { games, teams }
    }

    pub async fn list(&self) -> Result<Vec<Game>, LeagueError> {
        Ok(self.games.get_all().await?)
    }

    pub async fn get(&self, game_id: i32) -> Result<Game, LeagueError> {
        self.games
            .get_by_id(game_id)
            .await?
            .ok_or_else(|| LeagueError::game_not_found(game_id))
    }

    pub async fn create(&self, mut game: NewGame, owner: Option<Uuid>) -> Result<Game, LeagueError> {
        game.validate().map_err(LeagueError::Validation)?;
        game.home_team = game.home_team.trim().to_string();
        game.away_team = game.away_team.trim().to_string();
        game.user_id = owner;

        let created = self.games.create(game).await?;
        tracing::info!(
            "Scheduled game {}: {} vs {} at {}",
            created.id, created.home_team, created.away_team, created.scheduled_at
        );
        Ok(created)
    }

    pub async fn delete(&self, game_id: i32) -> Result<(), LeagueError> {
        if !self.games.delete(game_id).await? {
            return Err(LeagueError::game_not_found(game_id));
        }
        tracing::info!("Deleted game {}", game_id);
        Ok(())
    }

    /// Every name used by a game or a registered team, sorted and deduplicated.
    pub async fn team_name_suggestions(&self) -> Result<Vec<String>, LeagueError> {
        let games = self.games.get_all().await?;
        let teams = self.teams.get_all().await?;

        let names: BTreeSet<String> = games
            .into_iter()
            .flat_map(|g| [g.home_team, g.away_team])
            .chain(teams.into_iter().map(|t| t.name))
            .collect();

        Ok(names.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::db::memory::InMemoryStore;
    use crate::models::team::TeamFields;

    fn new_game(home: &str, away: &str, day: u32) -> NewGame {
        NewGame {
            scheduled_at: Utc.with_ymd_and_hms(2024, 9, day, 20, 0, 0).unwrap(),
            home_team: home.into(),
            away_team: away.into(),
            home_score: None,
            away_score: None,
            home_card: None,
            away_card: None,
            user_id: None,
        }
    }

    #[tokio::test]
    async fn games_are_listed_by_date_and_owned_by_creator() {
        let store = Arc::new(InMemoryStore::default());
        let service = GameService::new(store.clone(), store.clone());
        let owner = Uuid::new_v4();

        service.create(new_game("Porto", "Braga", 21), Some(owner)).await.unwrap();
        service.create(new_game(" Benfica ", "Sporting", 14), Some(owner)).await.unwrap();

        let games = service.list().await.unwrap();
        assert_eq!(games[0].home_team, "Benfica");
        assert_eq!(games[1].home_team, "Porto");
        assert!(games.iter().all(|g| g.user_id == Some(owner)));
    }

    #[tokio::test]
    async fn suggestions_merge_game_and_team_names() {
        let store = Arc::new(InMemoryStore::default());
        let service = GameService::new(store.clone(), store.clone());

        service.create(new_game("Porto", "Braga", 1), None).await.unwrap();
        service.create(new_game("Braga", "Porto", 8), None).await.unwrap();
        TeamRepository::create(
            store.as_ref(),
            TeamFields {
                name: "Arouca".into(),
                founded: NaiveDate::from_ymd_opt(1951, 12, 25).unwrap(),
                country: None,
                city: None,
                stadium: None,
                emblem: None,
                user_id: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(service.team_name_suggestions().await.unwrap(), vec!["Arouca", "Braga", "Porto"]);
    }

    #[tokio::test]
    async fn deleting_a_missing_game_is_not_found() {
        let store = Arc::new(InMemoryStore::default());
        let service = GameService::new(store.clone(), store);

        assert!(matches!(service.delete(42).await, Err(LeagueError::NotFound { .. })));
    }
}
