pub mod components;
pub mod enemy_stats;
pub mod systems;
pub mod weapon_stats;
pub mod world;
