pub mod autopilot;
pub mod enemy_ai;
