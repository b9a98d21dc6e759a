//! Path: native/swarm_core/src/physics/mod.rs
//! Summary: 物理モジュール（幾何・空間ハッシュ・衝突解決・分離・RNG）

pub mod geometry;
pub mod obstacle_resolve;
pub mod rng;
pub mod separation;
pub mod spatial_hash;
