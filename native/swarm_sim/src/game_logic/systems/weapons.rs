use crate::game_logic::find_nearest_enemy_spatial;
use crate::world::GameWorld;
use swarm_core::entity_params::ShotStats;
use swarm_core::physics::geometry::length;

/// 移動中とみなす速度成分のしきい値
const MOVING_SPEED: f32 = 10.0;

/// 照準の更新: 最近接敵 → 移動方向 → 直前の向き の優先順
pub(crate) fn update_aim(w: &mut GameWorld) {
    let px = w.player.x();
    let py = w.player.y();
    let radius = w.config.projectile.aim_radius;

    if let Some(ti) = find_nearest_enemy_spatial(
        &mut w.collision,
        &w.enemies,
        px,
        py,
        radius,
        &mut w.enemy_query_buf,
    ) {
        let dx = w.enemies.positions_x[ti] - px;
        let dy = w.enemies.positions_y[ti] - py;
        let len = length(dx, dy);
        if len > 1e-5 {
            w.player.aim_x = dx / len;
            w.player.aim_y = dy / len;
            return;
        }
    }

    let (vx, vy) = (w.player.body.vx, w.player.body.vy);
    if vx.abs() > MOVING_SPEED || vy.abs() > MOVING_SPEED {
        let len = length(vx, vy);
        w.player.aim_x = vx / len;
        w.player.aim_y = vy / len;
    }
}

/// クールダウンが明けたら照準方向へ `amount` 発を扇状に撃つ
pub(crate) fn update_weapon_fire(w: &mut GameWorld, shot: &ShotStats, dt: f32) {
    w.weapon_cooldown -= dt;
    if w.weapon_cooldown > 0.0 || w.player.is_dead() {
        return;
    }

    let px = w.player.x();
    let py = w.player.y();
    let base_angle = w.player.aim_y.atan2(w.player.aim_x);
    let params = shot.projectile_spawn();
    for i in 0..shot.amount {
        let angle = base_angle + shot.spread_offset(i);
        let vx = angle.cos() * shot.speed;
        let vy = angle.sin() * shot.speed;
        if w.projectiles.spawn(px, py, vx, vy, shot.damage, shot.lifetime, &params).is_none() {
            break;
        }
    }
    w.weapon_cooldown = shot.cooldown;
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarm_core::config::{EnemyConfig, SimConfig};
    use swarm_core::entity_params::EnemySpawn;

    fn open_world() -> GameWorld {
        let mut cfg = SimConfig::default();
        cfg.world.width = 2000.0;
        cfg.world.height = 2000.0;
        cfg.obstacle.min_count = 0;
        cfg.obstacle.max_count = 0;
        GameWorld::new(cfg, 5)
    }

    #[test]
    fn aim_prefers_nearest_enemy() {
        let mut w = open_world();
        let base = EnemyConfig { spawn_time: 0.0, ..w.config.enemy.clone() };
        w.enemies.spawn(1000.0, 1200.0, &EnemySpawn::default(), &base, 10);
        w.rebuild_collision();
        w.player.body.vx = 200.0;
        update_aim(&mut w);
        assert!(w.player.aim_x.abs() < 1e-5);
        assert!((w.player.aim_y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn aim_falls_back_to_movement_then_last_heading() {
        let mut w = open_world();
        assert_eq!((w.player.aim_x, w.player.aim_y), (1.0, 0.0));
        w.player.body.vx = 0.0;
        w.player.body.vy = -50.0;
        update_aim(&mut w);
        assert_eq!((w.player.aim_x, w.player.aim_y), (0.0, -1.0));
        // ほぼ停止中は直前の向きを維持
        w.player.body.vy = -5.0;
        update_aim(&mut w);
        assert_eq!((w.player.aim_x, w.player.aim_y), (0.0, -1.0));
    }

    #[test]
    fn volley_fires_amount_and_resets_cooldown() {
        let mut w = open_world();
        let shot = ShotStats { amount: 3, spread: 0.5, ..ShotStats::default() };
        update_weapon_fire(&mut w, &shot, 1.0 / 60.0);
        assert_eq!(w.projectiles.count(), 3);
        assert_eq!(w.weapon_cooldown, shot.cooldown);

        update_weapon_fire(&mut w, &shot, 1.0 / 60.0);
        assert_eq!(w.projectiles.count(), 3);
    }

    #[test]
    fn volley_speed_matches_shot() {
        let mut w = open_world();
        let shot = ShotStats::default();
        update_weapon_fire(&mut w, &shot, 1.0 / 60.0);
        let i = w.projectiles.iter_alive().next().unwrap();
        let v = length(w.projectiles.velocities_x[i], w.projectiles.velocities_y[i]);
        assert!((v - shot.speed).abs() < 1e-2);
        assert_eq!(w.projectiles.damage[i], shot.damage);
    }
}
