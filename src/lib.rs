pub mod ai;
pub mod config;
pub mod ecs;
pub mod game;
pub mod protocol;
