pub mod games_handler;
