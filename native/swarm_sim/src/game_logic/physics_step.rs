//! Path: native/swarm_sim/src/game_logic/physics_step.rs
//! Summary: 1 ティック分の物理ステップ（システムの実行順はここで固定）

use super::chase_ai::update_chase_ai;
use super::events::trim_frame_events;
use super::systems::collision::{resolve_player_enemy_contact, separate_enemies};
use super::systems::damage::update_contact_damage;
use super::systems::movement::update_player_movement;
use super::systems::orbs::update_orbs;
use super::systems::projectiles::{update_projectile_hits, update_projectiles};
use super::systems::spawn::update_enemy_spawn;
use super::systems::weapons::{update_aim, update_weapon_fire};
use crate::simulation::TickInput;
use crate::world::GameWorld;

/// 固定 dt（`scheduler.tick`）で 1 ティック進める
pub(crate) fn physics_step_inner(w: &mut GameWorld, input: &TickInput) {
    // trace にしておき、RUST_LOG=trace のときだけ毎ティック出力（debug だと 60Hz でコンソールが埋まる）
    log::trace!(
        "physics_step: tick={} enemies={} projectiles={} orbs={}",
        w.tick_id,
        w.enemies.count(),
        w.projectiles.count(),
        w.orbs.count()
    );
    let t_start = std::time::Instant::now();

    w.tick_id += 1;
    let dt = w.config.scheduler.tick;
    w.elapsed_seconds += dt;

    // ── 1-2: 入力 → 速度、プレイヤー移動 + タイマー ─────────────
    update_player_movement(w, input.move_dir, &input.stats, dt);

    // ── 3: 照準 + 自動射撃 ──────────────────────────────────────
    update_aim(w);
    if let Some(shot) = input.shot.as_ref() {
        update_weapon_fire(w, shot, dt);
    }

    // ── 4: 弾丸移動（周回・帰還・分裂・地形・射程・寿命・場外）──
    update_projectiles(w, dt);

    // ── 5: 敵の湧き + Chase AI + 地形付き移動 ──────────────────
    update_enemy_spawn(w, &input.viewport, &input.stats, dt);
    update_chase_ai(w, dt);

    // ── 6: 敵グリッド再構築 → 敵同士の分離 ──────────────────────
    w.rebuild_collision();
    separate_enemies(w);

    // ── 7: プレイヤー vs 敵の押し合い ───────────────────────────
    resolve_player_enemy_contact(w);

    // ── 8: 弾丸 vs 敵（分離・押し合い後の位置でグリッドを取り直す）─
    w.rebuild_collision();
    update_projectile_hits(w);

    // ── 9: 経験値オーブ ─────────────────────────────────────────
    update_orbs(w, &input.stats, dt);

    // ── 10: 接触ダメージ ────────────────────────────────────────
    update_contact_damage(w, &input.stats);
    trim_frame_events(w);

    let elapsed_ms = t_start.elapsed().as_secs_f64() * 1000.0;
    w.last_tick_ms = elapsed_ms;
    if elapsed_ms > w.config.scheduler.frame_budget_ms {
        log::warn!(
            "tick budget exceeded: {:.2}ms (enemies: {}, projectiles: {})",
            elapsed_ms,
            w.enemies.count(),
            w.projectiles.count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarm_core::config::SimConfig;
    use swarm_core::entity_params::{ShotStats, StatSnapshot};
    use swarm_core::physics::geometry::Aabb;

    fn input_for(w: &GameWorld, dir: (f32, f32)) -> TickInput {
        TickInput {
            move_dir: dir,
            viewport: Aabb::around(w.player.x(), w.player.y(), 640.0, 360.0),
            stats:    StatSnapshot::default(),
            shot:     Some(ShotStats::default()),
        }
    }

    #[test]
    fn everything_stays_inside_world_over_many_ticks() {
        let mut cfg = SimConfig::default();
        cfg.world.width = 3000.0;
        cfg.world.height = 3000.0;
        cfg.obstacle.min_count = 200;
        cfg.obstacle.max_count = 300;
        cfg.enemy.spawn_interval = 0.05;
        cfg.enemy.min_spawn_interval = 0.05;
        let mut w = GameWorld::new(cfg, 99);

        for t in 0..600 {
            let a = t as f32 * 0.01;
            let input = input_for(&w, (a.cos(), a.sin()));
            physics_step_inner(&mut w, &input);

            let (ww, wh) = (w.config.world.width, w.config.world.height);
            assert!((0.0..=ww).contains(&w.player.x()) && (0.0..=wh).contains(&w.player.y()));
            for i in w.enemies.iter_alive() {
                assert!((0.0..=ww).contains(&w.enemies.positions_x[i]));
                assert!((0.0..=wh).contains(&w.enemies.positions_y[i]));
            }
        }
        assert_eq!(w.tick_id, 600);
        assert!(w.enemies.count() > 0);
    }

    #[test]
    fn same_seed_same_outcome() {
        let run = || {
            let mut cfg = SimConfig::default();
            cfg.world.width = 2000.0;
            cfg.world.height = 2000.0;
            cfg.obstacle.min_count = 50;
            cfg.obstacle.max_count = 80;
            let mut w = GameWorld::new(cfg, 1234);
            for _ in 0..240 {
                let input = input_for(&w, (1.0, 0.0));
                physics_step_inner(&mut w, &input);
            }
            (w.player.x(), w.player.y(), w.enemies.count(), w.kill_count, w.projectiles.count())
        };
        assert_eq!(run(), run());
    }
}
