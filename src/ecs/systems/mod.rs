pub mod abilities;
pub mod combat;
pub mod economy;
pub mod effects;
pub mod projectile;
pub mod spawn;
