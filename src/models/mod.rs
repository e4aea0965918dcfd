pub mod common;
pub mod game;
pub mod team;
pub mod user;
