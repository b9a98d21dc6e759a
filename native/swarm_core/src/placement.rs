//! Path: native/swarm_core/src/placement.rs
//! Summary: シード付き障害物散布（中心保護半径 + 直近 K 個との重なり回避）

use crate::config::ObstacleConfig;
use crate::physics::geometry::Aabb;
use crate::physics::rng::SimpleRng;
use crate::physics::spatial_hash::{ObstacleKind, StaticObstacle};

/// ワールド全体に障害物を散布する。同じシードなら同じ配置になる。
/// 試行回数内に置けなかった障害物はスキップする。
pub fn scatter_obstacles(
    rng: &mut SimpleRng,
    cfg: &ObstacleConfig,
    world_w: f32,
    world_h: f32,
) -> Vec<StaticObstacle> {
    let count = rng.int(cfg.min_count as i32, cfg.max_count as i32).max(0) as usize;
    let mut placed: Vec<StaticObstacle> = Vec::with_capacity(count);
    let (center_x, center_y) = (world_w / 2.0, world_h / 2.0);
    let protected_sq = cfg.protected_radius * cfg.protected_radius;

    for _ in 0..count {
        let kind = if rng.chance(cfg.tree_ratio) { ObstacleKind::Tree } else { ObstacleKind::Rock };
        let (w, h) = match kind {
            ObstacleKind::Tree => (rng.int(48, 64) as f32, rng.int(48, 64) as f32),
            ObstacleKind::Rock => (rng.int(64, 96) as f32, rng.int(32, 64) as f32),
        };

        for _ in 0..cfg.tries {
            let x = rng.int(0, world_w as i32) as f32;
            let y = rng.int(0, world_h as i32) as f32;
            let dx = x - center_x;
            let dy = y - center_y;
            if dx * dx + dy * dy < protected_sq {
                continue;
            }
            let aabb = Aabb::around(x, y, w / 2.0, h / 2.0);
            let window_start = placed.len().saturating_sub(cfg.recency_window);
            if placed[window_start..].iter().any(|p| p.aabb.intersects(&aabb)) {
                continue;
            }
            placed.push(StaticObstacle { aabb, solid: true, kind });
            break;
        }
    }

    log::debug!("obstacles placed: {}/{}", placed.len(), count);
    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_cfg() -> ObstacleConfig {
        ObstacleConfig { min_count: 200, max_count: 300, ..ObstacleConfig::default() }
    }

    #[test]
    fn identical_seed_gives_identical_layout() {
        let cfg = small_cfg();
        let a = scatter_obstacles(&mut SimpleRng::new(0xdeca_fbad), &cfg, 3000.0, 3000.0);
        let b = scatter_obstacles(&mut SimpleRng::new(0xdeca_fbad), &cfg, 3000.0, 3000.0);
        assert!(!a.is_empty());
        assert_eq!(a, b);
        let c = scatter_obstacles(&mut SimpleRng::new(1), &cfg, 3000.0, 3000.0);
        assert_ne!(a, c);
    }

    #[test]
    fn nothing_inside_protected_radius() {
        let cfg = small_cfg();
        let obstacles = scatter_obstacles(&mut SimpleRng::new(7), &cfg, 3000.0, 3000.0);
        for o in &obstacles {
            let (cx, cy) = o.aabb.center();
            let d = ((cx - 1500.0).powi(2) + (cy - 1500.0).powi(2)).sqrt();
            assert!(d >= cfg.protected_radius - 1e-3, "obstacle centre at distance {d}");
        }
    }

    #[test]
    fn count_and_sizes_stay_in_range() {
        let cfg = small_cfg();
        let obstacles = scatter_obstacles(&mut SimpleRng::new(99), &cfg, 3000.0, 3000.0);
        assert!(obstacles.len() <= cfg.max_count as usize);
        for o in &obstacles {
            match o.kind {
                ObstacleKind::Tree => {
                    assert!((48.0..=64.0).contains(&o.aabb.w) && (48.0..=64.0).contains(&o.aabb.h));
                }
                ObstacleKind::Rock => {
                    assert!((64.0..=96.0).contains(&o.aabb.w) && (32.0..=64.0).contains(&o.aabb.h));
                }
            }
            assert!(o.solid);
        }
    }

    #[test]
    fn recent_neighbours_do_not_overlap() {
        let cfg = ObstacleConfig { recency_window: 10, ..small_cfg() };
        let obstacles = scatter_obstacles(&mut SimpleRng::new(3), &cfg, 2000.0, 2000.0);
        for (i, o) in obstacles.iter().enumerate() {
            let start = i.saturating_sub(cfg.recency_window);
            for p in &obstacles[start..i] {
                assert!(!o.aabb.intersects(&p.aabb));
            }
        }
    }
}
