pub mod game_handler;
pub mod standings_handler;
