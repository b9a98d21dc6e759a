//! Path: native/swarm_sim/src/world/frame_event.rs
//! Summary: ティック内で発生したイベント（描画・音声側が drain して反応する）

/// ティック内で発生したイベント。ID はそのティック内でのみ有効。
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    EnemyKilled       { enemy: usize, x: f32, y: f32, is_boss: bool },
    EnemyHit          { enemy: usize, damage: f32, crit: bool },
    PlayerDamaged     { damage: f32 },
    PlayerDied,
    OrbCollected      { value: u32 },
    LevelUp           { new_level: u32 },
    ProjectileExpired { projectile: usize },
}
