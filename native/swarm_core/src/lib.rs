//! Path: native/swarm_core/src/lib.rs
//! Summary: シミュレーションコアの共通プリミティブ（定数・設定・物理・プール・配置）

pub mod config;
pub mod constants;
pub mod entity_params;
pub mod error;
pub mod physics;
pub mod placement;
pub mod pool;
pub mod util;

pub use config::SimConfig;
pub use error::ConfigError;
