//! Path: native/swarm_sim/src/game_logic/mod.rs
//! Summary: 物理ステップ・Chase AI・イベント drain

mod chase_ai;
mod events;
mod physics_step;
pub(crate) mod systems;

pub use chase_ai::find_nearest_enemy_spatial;
pub(crate) use chase_ai::update_chase_ai;
pub(crate) use events::drain_frame_events_inner;
pub(crate) use physics_step::physics_step_inner;
