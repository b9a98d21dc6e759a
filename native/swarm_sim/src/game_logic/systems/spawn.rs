use crate::world::GameWorld;
use swarm_core::entity_params::{EnemySpawn, StatSnapshot};
use swarm_core::physics::geometry::Aabb;
use swarm_core::util::spawn_position_around;

/// 視界内（余白 `spawn_pad`）で `point` から `spawn_min_dist` 以上離れた位置に敵を 1 体出す
pub(crate) fn spawn_enemy_around(
    w: &mut GameWorld,
    point: (f32, f32),
    viewport: &Aabb,
    params: &EnemySpawn,
    max_active: usize,
) -> Option<usize> {
    let cfg = &w.config.enemy;
    let (x, y) = spawn_position_around(
        &mut w.spawn_rng,
        point.0,
        point.1,
        viewport,
        cfg.spawn_min_dist,
        cfg.spawn_pad,
        cfg.spawn_tries,
    );
    let x = x.clamp(0.0, w.config.world.width);
    let y = y.clamp(0.0, w.config.world.height);
    let id = w.enemies.spawn(x, y, params, cfg, max_active);
    if id.is_none() {
        log::debug!("enemy spawn refused (active {}/{})", w.enemies.count(), max_active);
    }
    id
}

/// 湧きタイマー。間隔と同時出現上限は `spawn_rate` 倍率でスケールする。
pub(crate) fn update_enemy_spawn(w: &mut GameWorld, viewport: &Aabb, stats: &StatSnapshot, dt: f32) {
    let rate = stats.spawn_rate.max(1e-3);
    let interval = (w.config.enemy.spawn_interval / rate).max(w.config.enemy.min_spawn_interval);
    let cap = ((w.config.enemy.max_active as f32 * rate).round() as usize).min(w.enemies.len());

    w.spawn_timer -= dt;
    if w.spawn_timer > 0.0 {
        return;
    }
    w.spawn_timer += interval;
    if w.enemies.count() >= cap {
        return;
    }

    let params = EnemySpawn {
        hp_mult:     stats.enemy_hp,
        speed_mult:  stats.enemy_speed,
        damage_mult: stats.enemy_damage,
        ..EnemySpawn::default()
    };
    let player = (w.player.x(), w.player.y());
    spawn_enemy_around(w, player, viewport, &params, cap);
}
