pub mod cards;
pub mod collision;
pub mod profile;
pub mod run;
pub mod snapshot;
pub mod state;
pub mod upgrades;
pub mod wizard;
