pub mod game_management_handler;
pub mod team_handler;
