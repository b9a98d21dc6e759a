//! Path: native/swarm_sim/src/game_logic/chase_ai.rs
//! Summary: 敵 Chase AI と最近接探索（find_nearest_enemy_spatial）

use crate::world::{EnemyWorld, GameWorld};
use swarm_core::physics::obstacle_resolve::{move_and_collide, move_phasing};
use swarm_core::physics::spatial_hash::CollisionWorld;

/// 二乗距離（sqrt を避けて高速化）
#[inline]
fn dist_sq(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let dx = x1 - x2;
    let dy = y1 - y2;
    dx * dx + dy * dy
}

/// 敵グリッドを使った最近接探索。`search_radius` の外の敵は対象外。
///
/// グリッドは直近の再構築時点の位置で登録されているため、
/// 距離は現在位置で測り直す。
pub fn find_nearest_enemy_spatial(
    collision: &mut CollisionWorld,
    enemies: &EnemyWorld,
    px: f32,
    py: f32,
    search_radius: f32,
    buf: &mut Vec<usize>,
) -> Option<usize> {
    collision.dynamic.query_circle_into(px, py, search_radius, buf);
    let r_sq = search_radius * search_radius;

    buf.iter()
        .filter(|&&i| i < enemies.len() && enemies.alive(i))
        .map(|&i| (i, dist_sq(enemies.positions_x[i], enemies.positions_y[i], px, py)))
        .filter(|&(_, d)| d <= r_sq)
        .min_by(|(ia, da), (ib, db)| da.total_cmp(db).then(ia.cmp(ib)))
        .map(|(i, _)| i)
}

/// 全生存敵をプレイヤーへ向けて動かす。
/// 出現演出中の敵はタイマーだけ進めて静止、すり抜け敵は地形を無視して直進する。
pub(crate) fn update_chase_ai(w: &mut GameWorld, dt: f32) {
    let px = w.player.x();
    let py = w.player.y();
    let params = w.enemy_resolve_params();

    for i in 0..w.enemies.len() {
        if !w.enemies.alive(i) {
            continue;
        }
        if w.enemies.is_spawning(i) {
            w.enemies.spawn_timer[i] = (w.enemies.spawn_timer[i] - dt).max(0.0);
            w.enemies.velocities_x[i] = 0.0;
            w.enemies.velocities_y[i] = 0.0;
            continue;
        }

        let mut body = w.enemies.body(i);
        let dx = px - body.x;
        let dy = py - body.y;
        let dist = (dx * dx + dy * dy).sqrt().max(0.001);
        let speed = w.enemies.speeds[i];
        body.vx = (dx / dist) * speed;
        body.vy = (dy / dist) * speed;

        let (step_x, step_y) = (body.vx * dt, body.vy * dt);
        if w.enemies.ignore_terrain[i] {
            move_phasing(&mut body, step_x, step_y, &params);
        } else {
            move_and_collide(
                &mut body,
                step_x,
                step_y,
                &mut w.collision,
                &mut w.obstacle_query_buf,
                &params,
            );
        }
        w.enemies.store_body(i, &body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarm_core::config::{EnemyConfig, SimConfig};
    use swarm_core::entity_params::EnemySpawn;

    fn empty_world() -> GameWorld {
        let mut cfg = SimConfig::default();
        cfg.world.width = 1000.0;
        cfg.world.height = 1000.0;
        cfg.obstacle.min_count = 0;
        cfg.obstacle.max_count = 0;
        GameWorld::new(cfg, 3)
    }

    /// 全探索による最近接（グリッド探索の答え合わせ用）
    fn nearest_by_scan(enemies: &EnemyWorld, px: f32, py: f32) -> Option<usize> {
        let mut min_dist = f32::MAX;
        let mut nearest  = None;
        for i in enemies.iter_alive() {
            let dist = dist_sq(enemies.positions_x[i], enemies.positions_y[i], px, py);
            if dist < min_dist {
                min_dist = dist;
                nearest  = Some(i);
            }
        }
        nearest
    }

    fn spawn_at(w: &mut GameWorld, x: f32, y: f32) -> usize {
        let base = EnemyConfig { spawn_time: 0.0, ..w.config.enemy.clone() };
        w.enemies.spawn(x, y, &EnemySpawn::default(), &base, usize::MAX).unwrap()
    }

    #[test]
    fn nearest_enemy_scan_and_spatial_agree() {
        let mut w = empty_world();
        spawn_at(&mut w, 900.0, 500.0);
        let near = spawn_at(&mut w, 560.0, 520.0);
        spawn_at(&mut w, 100.0, 100.0);
        w.rebuild_collision();

        assert_eq!(nearest_by_scan(&w.enemies, 500.0, 500.0), Some(near));
        let mut buf = Vec::new();
        let found = find_nearest_enemy_spatial(&mut w.collision, &w.enemies, 500.0, 500.0, 900.0, &mut buf);
        assert_eq!(found, Some(near));
    }

    #[test]
    fn spatial_search_respects_radius() {
        let mut w = empty_world();
        spawn_at(&mut w, 950.0, 950.0);
        w.rebuild_collision();
        let mut buf = Vec::new();
        assert_eq!(find_nearest_enemy_spatial(&mut w.collision, &w.enemies, 10.0, 10.0, 100.0, &mut buf), None);
    }

    #[test]
    fn chase_moves_toward_player_at_speed() {
        let mut w = empty_world();
        let i = spawn_at(&mut w, 100.0, 500.0);
        let dt = 1.0 / 60.0;
        update_chase_ai(&mut w, dt);
        let moved = w.enemies.positions_x[i] - 100.0;
        assert!((moved - w.enemies.speeds[i] * dt).abs() < 1e-3);
        assert!((w.enemies.positions_y[i] - 500.0).abs() < 1e-4);
    }

    #[test]
    fn spawning_enemy_stays_still_until_timer_expires() {
        let mut w = empty_world();
        let base = EnemyConfig { spawn_time: 0.05, ..w.config.enemy.clone() };
        let i = w.enemies.spawn(100.0, 100.0, &EnemySpawn::default(), &base, 10).unwrap();
        update_chase_ai(&mut w, 1.0 / 60.0);
        assert_eq!(w.enemies.positions_x[i], 100.0);
        for _ in 0..3 {
            update_chase_ai(&mut w, 1.0 / 60.0);
        }
        assert!(!w.enemies.is_spawning(i));
        update_chase_ai(&mut w, 1.0 / 60.0);
        assert!(w.enemies.positions_x[i] > 100.0);
    }
}
