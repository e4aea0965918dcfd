use std::sync::Arc;

use uuid::Uuid;

use crate::db::repository::{GameRepository, SaveOutcome};
use crate::league::error::{Entity, LeagueError};
use crate::models::game::{CardType, Game, GameEditRequest, Side};

/// Applies targeted edits to a single game under optimistic concurrency.
///
/// Every operation loads the game, changes it in memory and writes the whole
/// record back only if the stored version still equals the expected one. The
/// expected version is the one supplied by the caller, or the one just loaded.
pub struct MatchMutationService {
    games: Arc<dyn GameRepository>,
}

impl MatchMutationService {
    pub fn new(games: Arc<dyn GameRepository>) -> Self {
        Self { games }
    }

    /// Set both scores. `None` clears a score so the game counts as unplayed.
    pub async fn update_score(
        &self,
        game_id: i32,
        home_score: Option<i32>,
        away_score: Option<i32>,
        expected_version: Option<i32>,
    ) -> Result<Game, LeagueError> {
        let game = self
            .apply(game_id, expected_version, |game| {
                game.home_score = home_score;
                game.away_score = away_score;
            })
            .await?;

        tracing::info!(
            "Score updated for game {}: {} {:?} - {:?} {}",
            game.id, game.home_team, game.home_score, game.away_score, game.away_team
        );
        Ok(game)
    }

    /// Set the card state of one side. Re-issuing overwrites the previous card.
    pub async fn issue_card(
        &self,
        game_id: i32,
        side: Side,
        card: CardType,
        expected_version: Option<i32>,
    ) -> Result<Game, LeagueError> {
        let game = self
            .apply(game_id, expected_version, |game| game.set_card(side, card))
            .await?;

        tracing::info!("{:?} card issued to {:?} side of game {}", card, side, game.id);
        Ok(game)
    }

    /// Replace every editable field; the editor becomes the owner.
    pub async fn edit_game(
        &self,
        game_id: i32,
        edit: GameEditRequest,
        editor: Option<Uuid>,
    ) -> Result<Game, LeagueError> {
        edit.validate().map_err(LeagueError::Validation)?;

        let expected_version = edit.version;
        self.apply(game_id, expected_version, move |game| {
            game.scheduled_at = edit.scheduled_at;
            game.home_team = edit.home_team.trim().to_string();
            game.away_team = edit.away_team.trim().to_string();
            game.home_score = edit.home_score;
            game.away_score = edit.away_score;
            game.home_card = edit.home_card;
            game.away_card = edit.away_card;
            if editor.is_some() {
                game.user_id = editor;
            }
        })
        .await
    }

    async fn apply<F>(
        &self,
        game_id: i32,
        expected_version: Option<i32>,
        mutate: F,
    ) -> Result<Game, LeagueError>
    where
        F: FnOnce(&mut Game) + Send,
    {
        let mut game = self
            .games
            .get_by_id(game_id)
            .await?
            .ok_or_else(|| LeagueError::game_not_found(game_id))?;

        let expected_version = expected_version.unwrap_or(game.version);
        mutate(&mut game);

        match self.games.save(&game, expected_version).await? {
            SaveOutcome::Saved(saved) => Ok(saved),
            SaveOutcome::Conflict => {
                // A failed version check is either a deletion race or a stale write
                if !self.games.exists(game_id).await? {
                    tracing::info!("Game {} was deleted before the update was saved", game_id);
                    return Err(LeagueError::game_not_found(game_id));
                }
                tracing::warn!(
                    "Concurrent modification of game {} (expected version {})",
                    game_id, expected_version
                );
                Err(LeagueError::ConcurrencyConflict { entity: Entity::Game, id: game_id })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use crate::db::memory::InMemoryStore;
    use crate::models::game::{CardState, NewGame};

    async fn setup() -> (Arc<InMemoryStore>, MatchMutationService, Game) {
        let store = Arc::new(InMemoryStore::default());
        let game = GameRepository::create(
            store.as_ref(),
            NewGame {
                scheduled_at: Utc.with_ymd_and_hms(2024, 8, 10, 19, 0, 0).unwrap(),
                home_team: "Benfica".into(),
                away_team: "Porto".into(),
                home_score: None,
                away_score: None,
                home_card: None,
                away_card: Some(CardState::Yellow),
                user_id: None,
            },
        )
        .await
        .unwrap();
        let service = MatchMutationService::new(store.clone());
        (store, service, game)
    }

    #[tokio::test]
    async fn red_card_to_home_side_leaves_away_side_untouched() {
        let (store, service, game) = setup().await;

        service.issue_card(game.id, Side::Home, CardType::Red, None).await.unwrap();

        let reread = GameRepository::get_by_id(store.as_ref(), game.id).await.unwrap().unwrap();
        assert_eq!(reread.home_card, Some(CardState::Red));
        assert_eq!(reread.away_card, Some(CardState::Yellow));
        assert_eq!(reread.version, game.version + 1);
    }

    #[tokio::test]
    async fn reissuing_a_card_overwrites_it() {
        let (_store, service, game) = setup().await;

        service.issue_card(game.id, Side::Away, CardType::Red, None).await.unwrap();
        let updated = service.issue_card(game.id, Side::Away, CardType::Yellow, None).await.unwrap();

        assert_eq!(updated.card(Side::Away), Some(CardState::Yellow));
        assert_eq!(updated.card(Side::Home), None);
    }

    #[tokio::test]
    async fn missing_game_is_not_found() {
        let (_store, service, _game) = setup().await;

        let result = service.update_score(999, Some(1), Some(0), None).await;
        assert!(matches!(result, Err(LeagueError::NotFound { entity: Entity::Game, id: 999 })));

        let result = service.issue_card(999, Side::Home, CardType::Red, None).await;
        assert!(matches!(result, Err(LeagueError::NotFound { .. })));
    }

    #[tokio::test]
    async fn stale_version_is_a_conflict() {
        let (_store, service, game) = setup().await;

        service.update_score(game.id, Some(1), Some(1), Some(game.version)).await.unwrap();
        let result = service.update_score(game.id, Some(2), Some(1), Some(game.version)).await;

        assert!(matches!(result, Err(LeagueError::ConcurrencyConflict { entity: Entity::Game, .. })));
    }

    #[tokio::test]
    async fn concurrent_updates_with_the_same_version_yield_one_success() {
        let (store, service, game) = setup().await;

        let (first, second) = tokio::join!(
            service.update_score(game.id, Some(2), Some(0), Some(game.version)),
            service.update_score(game.id, Some(0), Some(2), Some(game.version)),
        );

        let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
        let conflicts = [&first, &second]
            .iter()
            .filter(|r| matches!(r, Err(LeagueError::ConcurrencyConflict { .. })))
            .count();
        assert_eq!((successes, conflicts), (1, 1));

        let stored = GameRepository::get_by_id(store.as_ref(), game.id).await.unwrap().unwrap();
        assert_eq!(stored.version, game.version + 1);
    }

    #[tokio::test]
    async fn edit_replaces_fields_and_sets_owner() {
        let (_store, service, game) = setup().await;
        let editor = Uuid::new_v4();

        let edited = service
            .edit_game(
                game.id,
                GameEditRequest {
                    scheduled_at: game.scheduled_at,
                    home_team: " Sporting ".into(),
                    away_team: "Porto".into(),
                    home_score: Some(3),
                    away_score: Some(1),
                    home_card: None,
                    away_card: None,
                    version: Some(game.version),
                },
                Some(editor),
            )
            .await
            .unwrap();

        assert_eq!(edited.home_team, "Sporting");
        assert_eq!(edited.away_card, None);
        assert_eq!(edited.user_id, Some(editor));
    }

    /// Store whose game disappears between the read and the write.
    struct VanishingGames {
        game: Game,
    }

    #[async_trait]
    impl GameRepository for VanishingGames {
        async fn get_all(&self) -> Result<Vec<Game>, sqlx::Error> {
            Ok(vec![])
        }
        async fn get_by_id(&self, _id: i32) -> Result<Option<Game>, sqlx::Error> {
            Ok(Some(self.game.clone()))
        }
        async fn create(&self, _game: NewGame) -> Result<Game, sqlx::Error> {
            Err(sqlx::Error::RowNotFound)
        }
        async fn save(&self, _game: &Game, _expected_version: i32) -> Result<SaveOutcome<Game>, sqlx::Error> {
            Ok(SaveOutcome::Conflict)
        }
        async fn delete(&self, _id: i32) -> Result<bool, sqlx::Error> {
            Ok(false)
        }
        async fn exists(&self, _id: i32) -> Result<bool, sqlx::Error> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn conflict_on_a_deleted_game_is_not_found() {
        let (_store, _service, game) = setup().await;
        let service = MatchMutationService::new(Arc::new(VanishingGames { game: game.clone() }));

        let result = service.issue_card(game.id, Side::Home, CardType::Yellow, None).await;
        assert!(matches!(result, Err(LeagueError::NotFound { entity: Entity::Game, .. })));
    }
}
