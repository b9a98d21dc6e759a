//! Path: native/swarm_sim/src/snapshot.rs
//! Summary: GameWorld から読み取り専用スナップショットを構築（描画アダプタ用）
//!
//! シミュレーションは描画オブジェクトを持たない。描画側はティック後に
//! WorldSnapshot を受け取り、ID → スプライトの対応を自前で管理する。

use crate::world::GameWorld;
use swarm_core::physics::geometry::Aabb;
use swarm_core::physics::spatial_hash::{CollisionWorld, StaticObstacle};

/// 視界カリングの余白（スプライトのはみ出し分）
pub const VIEW_CULL_PAD: f32 = 128.0;

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerView {
    pub x:            f32,
    pub y:            f32,
    pub vx:           f32,
    pub vy:           f32,
    pub radius:       f32,
    pub hp:           f32,
    pub hp_max:       f32,
    pub aim_x:        f32,
    pub aim_y:        f32,
    pub level:        u32,
    pub xp:           f32,
    pub xp_for_next:  u32,
    pub invulnerable: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyView {
    pub id:       usize,
    pub x:        f32,
    pub y:        f32,
    pub radius:   f32,
    /// hp / hp_max
    pub health:   f32,
    pub spawning: bool,
    pub is_boss:  bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileView {
    pub id:     usize,
    pub x:      f32,
    pub y:      f32,
    pub radius: f32,
    /// 進行方向（ラジアン）
    pub angle:  f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbView {
    pub id:    usize,
    pub x:     f32,
    pub y:     f32,
    pub value: u32,
}

/// 1 ティック分の描画用コピー
#[derive(Clone, Debug, PartialEq)]
pub struct WorldSnapshot {
    pub tick_id:         u64,
    pub elapsed_seconds: f32,
    pub kill_count:      u32,
    /// スケジューラの補間係数
    pub alpha:           f32,
    pub player:          PlayerView,
    pub enemies:         Vec<EnemyView>,
    pub projectiles:     Vec<ProjectileView>,
    pub orbs:            Vec<OrbView>,
}

pub fn build_snapshot(w: &GameWorld, alpha: f32) -> WorldSnapshot {
    let p = &w.player;
    let player = PlayerView {
        x:            p.x(),
        y:            p.y(),
        vx:           p.body.vx,
        vy:           p.body.vy,
        radius:       p.radius,
        hp:           p.hp,
        hp_max:       p.hp_max,
        aim_x:        p.aim_x,
        aim_y:        p.aim_y,
        level:        p.level,
        xp:           p.xp,
        xp_for_next:  p.xp_for_next,
        invulnerable: p.invuln_timer > 0.0,
    };

    let e = &w.enemies;
    let enemies = e
        .iter_alive()
        .map(|i| EnemyView {
            id:       i,
            x:        e.positions_x[i],
            y:        e.positions_y[i],
            radius:   e.radius[i],
            health:   if e.hp_max[i] > 0.0 { (e.hp[i] / e.hp_max[i]).clamp(0.0, 1.0) } else { 0.0 },
            spawning: e.is_spawning(i),
            is_boss:  e.is_boss[i],
        })
        .collect();

    let b = &w.projectiles;
    let projectiles = b
        .iter_alive()
        .map(|i| ProjectileView {
            id:     i,
            x:      b.positions_x[i],
            y:      b.positions_y[i],
            radius: b.radius[i],
            angle:  b.velocities_y[i].atan2(b.velocities_x[i]),
        })
        .collect();

    let o = &w.orbs;
    let orbs = o
        .iter_alive()
        .map(|i| OrbView { id: i, x: o.positions_x[i], y: o.positions_y[i], value: o.value[i] })
        .collect();

    WorldSnapshot {
        tick_id: w.tick_id,
        elapsed_seconds: w.elapsed_seconds,
        kill_count: w.kill_count,
        alpha,
        player,
        enemies,
        projectiles,
        orbs,
    }
}

/// 視界（+ 余白）に掛かる障害物。描画側のカリング用で、衝突判定には使わない。
pub fn visible_obstacles(
    collision: &mut CollisionWorld,
    viewport: &Aabb,
    buf: &mut Vec<usize>,
) -> Vec<StaticObstacle> {
    let view = viewport.expand(VIEW_CULL_PAD);
    let obstacles = collision.query_static_into(&view, buf);
    buf.iter()
        .filter_map(|&idx| obstacles.get(idx))
        .filter(|o| o.aabb.intersects(&view))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarm_core::config::{EnemyConfig, SimConfig};
    use swarm_core::entity_params::EnemySpawn;
    use swarm_core::physics::spatial_hash::ObstacleKind;

    fn open_world() -> GameWorld {
        let mut cfg = SimConfig::default();
        cfg.world.width = 2000.0;
        cfg.world.height = 2000.0;
        cfg.obstacle.min_count = 0;
        cfg.obstacle.max_count = 0;
        GameWorld::new(cfg, 29)
    }

    #[test]
    fn snapshot_lists_only_live_entities() {
        let mut w = open_world();
        let base = EnemyConfig { spawn_time: 0.0, ..w.config.enemy.clone() };
        let a = w.enemies.spawn(10.0, 10.0, &EnemySpawn::default(), &base, 10).unwrap();
        let b = w.enemies.spawn(20.0, 20.0, &EnemySpawn::default(), &base, 10).unwrap();
        w.enemies.kill(a);

        let snap = build_snapshot(&w, 0.5);
        assert_eq!(snap.enemies.len(), 1);
        assert_eq!(snap.enemies[0].id, b);
        assert_eq!(snap.enemies[0].health, 1.0);
        assert_eq!(snap.player.x, 1000.0);
        assert_eq!(snap.alpha, 0.5);
        assert!(snap.projectiles.is_empty() && snap.orbs.is_empty());
    }

    #[test]
    fn visible_obstacles_culls_with_padding() {
        let mut w = open_world();
        let rock = |x: f32| StaticObstacle {
            aabb:  Aabb::new(x, 100.0, 32.0, 32.0),
            solid: true,
            kind:  ObstacleKind::Rock,
        };
        // 視界 0..800、余白込みで 928 まで
        w.collision.rebuild_static(vec![rock(100.0), rock(850.0), rock(1500.0)]);
        let mut buf = Vec::new();
        let vp = Aabb::new(0.0, 0.0, 800.0, 600.0);
        let visible = visible_obstacles(&mut w.collision, &vp, &mut buf);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|o| o.aabb.x < 928.0));
    }
}
