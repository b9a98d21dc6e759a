//! Path: native/swarm_sim/src/lib.rs
//! Summary: モジュール宣言と pub use のみ（外部からは Simulation を使う）

mod game_logic;
pub mod scheduler;
pub mod simulation;
pub mod snapshot;
pub mod world;

pub use game_logic::find_nearest_enemy_spatial;
pub use scheduler::FixedStepScheduler;
pub use simulation::{Simulation, TickInput};
pub use snapshot::{EnemyView, OrbView, PlayerView, ProjectileView, WorldSnapshot};
pub use world::{EnemyWorld, FrameEvent, GameWorld, OrbWorld, PlayerState, ProjectileWorld};

pub use swarm_core::config::SimConfig;
pub use swarm_core::entity_params::{
    EnemySpawn, ProjectileBehavior, ProjectileSpawn, ShotStats, StatSnapshot,
};
pub use swarm_core::error::ConfigError;
