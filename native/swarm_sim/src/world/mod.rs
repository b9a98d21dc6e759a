//! Path: native/swarm_sim/src/world/mod.rs
//! Summary: ワールド型（PlayerState, EnemyWorld, ProjectileWorld, OrbWorld, GameWorld）

mod enemy;
mod frame_event;
mod game_world;
mod orb;
mod player;
mod projectile;

pub use enemy::EnemyWorld;
pub use frame_event::FrameEvent;
pub use game_world::GameWorld;
pub(crate) use game_world::PendingProjectile;
pub use orb::OrbWorld;
pub use player::PlayerState;
pub use projectile::ProjectileWorld;
