//! Path: native/swarm_sim/src/game_logic/systems/mod.rs
//! Summary: ティック内の各システム（移動・射撃・弾丸・湧き・衝突・オーブ・接触ダメージ）

pub(crate) mod collision;
pub(crate) mod damage;
pub(crate) mod movement;
pub(crate) mod orbs;
pub(crate) mod projectiles;
pub(crate) mod spawn;
pub(crate) mod weapons;
