//! Path: native/swarm_sim/src/main.rs
//! Summary: ヘッドレス実行バイナリ（描画なしで固定ステップを回し、結果をログに出す）
//!
//! 使い方: `swarm_headless [config.toml] [seconds]`
//! ログレベルは RUST_LOG で指定する（例: RUST_LOG=debug）。

use std::error::Error;

use log::info;
use swarm_core::physics::geometry::Aabb;
use swarm_sim::{
    EnemySpawn, FrameEvent, ShotStats, SimConfig, Simulation, StatSnapshot, TickInput,
};

const SEED: u64 = 0x5EED;
const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_SECONDS: f32 = 60.0;
const VIEW_HALF_W: f32 = 640.0;
const VIEW_HALF_H: f32 = 360.0;
/// ボスを湧かせる間隔（秒）
const BOSS_INTERVAL: f32 = 60.0;

fn main() -> Result<(), Box<dyn Error>> {
    let _ = env_logger::Builder::from_default_env().try_init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let src = std::fs::read_to_string(&path)?;
            info!("config loaded from {path}");
            SimConfig::from_toml_str(&src)?
        }
        None => SimConfig::default(),
    };
    let seconds: f32 = match args.next() {
        Some(s) => s.parse()?,
        None => DEFAULT_SECONDS,
    };

    let mut sim = Simulation::new(config, SEED)?;
    info!("world ready: {} obstacles", sim.obstacles().len());

    let frames = (seconds / FRAME_DT).ceil() as u64;
    let shot = ShotStats::default();
    let (mut kills, mut level_ups, mut damage_taken) = (0_u32, 0_u32, 0.0_f32);
    let mut worst_ms = 0.0_f64;
    let mut next_boss = BOSS_INTERVAL;

    for frame in 0..frames {
        // 円を描くように歩き回る
        let angle = frame as f32 * 0.01;
        let (px, py) = sim.player_position();
        let input = TickInput {
            move_dir: (angle.cos(), angle.sin()),
            viewport: Aabb::around(px, py, VIEW_HALF_W, VIEW_HALF_H),
            stats:    StatSnapshot::default(),
            shot:     Some(shot),
        };
        sim.step_simulation(FRAME_DT, &input);
        worst_ms = worst_ms.max(sim.last_tick_ms());

        if sim.elapsed_seconds() >= next_boss {
            next_boss += BOSS_INTERVAL;
            let at = sim.player_position();
            if let Some(id) = sim.spawn_enemy_around(at, &EnemySpawn::boss()) {
                info!("boss {id} spawned at {:.1}s", sim.elapsed_seconds());
            }
        }

        for event in sim.drain_events() {
            match event {
                FrameEvent::EnemyKilled { .. } => kills += 1,
                FrameEvent::LevelUp { new_level } => {
                    level_ups += 1;
                    info!("level up -> {new_level} at {:.1}s", sim.elapsed_seconds());
                }
                FrameEvent::PlayerDamaged { damage } => damage_taken += damage,
                FrameEvent::PlayerDied => {
                    info!("player died at {:.1}s", sim.elapsed_seconds());
                }
                _ => {}
            }
        }
        if sim.player_hp() <= 0.0 {
            break;
        }
    }

    info!(
        "done: ticks={} elapsed={:.1}s kills={} level_ups={} damage_taken={:.0} hp={:.0}",
        sim.tick_id(),
        sim.elapsed_seconds(),
        kills,
        level_ups,
        damage_taken,
        sim.player_hp()
    );
    info!(
        "alive: enemies={} projectiles={} orbs={} worst_tick={:.2}ms",
        sim.enemy_count(),
        sim.projectile_count(),
        sim.orb_count(),
        worst_ms
    );
    Ok(())
}
