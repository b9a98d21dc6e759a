use crate::world::{FrameEvent, GameWorld};
use swarm_core::entity_params::StatSnapshot;

/// 経験値オーブ: 磁力圏内はプレイヤーへ吸い寄せ、圏外は減衰ドリフト。回収半径内で取得。
pub(crate) fn update_orbs(w: &mut GameWorld, stats: &StatSnapshot, dt: f32) {
    let px = w.player.x();
    let py = w.player.y();
    let magnet_r = w.player.magnet_radius * stats.magnet;
    let pickup_r = w.player.pickup_radius * stats.pickup;
    let pull = w.player.magnet_pull_speed;
    let damping = w.config.orb.drift_damping;

    for i in 0..w.orbs.len() {
        if !w.orbs.alive(i) {
            continue;
        }
        let dx = px - w.orbs.positions_x[i];
        let dy = py - w.orbs.positions_y[i];
        let dist = (dx * dx + dy * dy).sqrt();

        if dist < magnet_r && dist > 1e-5 {
            w.orbs.velocities_x[i] = dx / dist * pull;
            w.orbs.velocities_y[i] = dy / dist * pull;
        } else {
            w.orbs.velocities_x[i] *= damping;
            w.orbs.velocities_y[i] *= damping;
        }
        w.orbs.positions_x[i] += w.orbs.velocities_x[i] * dt;
        w.orbs.positions_y[i] += w.orbs.velocities_y[i] * dt;

        // 回収判定は移動前の距離で行う
        if dist <= pickup_r {
            let value = w.orbs.value[i];
            w.orbs.kill(i);
            w.frame_events.push(FrameEvent::OrbCollected { value });
            let gained = w.player.add_xp(value as f32 * stats.xp_mult);
            if gained > 0 {
                w.frame_events.push(FrameEvent::LevelUp { new_level: w.player.level });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarm_core::config::SimConfig;
    use swarm_core::physics::rng::SimpleRng;

    fn open_world() -> GameWorld {
        let mut cfg = SimConfig::default();
        cfg.world.width = 2000.0;
        cfg.world.height = 2000.0;
        cfg.obstacle.min_count = 0;
        cfg.obstacle.max_count = 0;
        GameWorld::new(cfg, 19)
    }

    #[test]
    fn orb_inside_magnet_radius_is_pulled() {
        let mut w = open_world();
        let mut rng = SimpleRng::new(1);
        let (px, py) = (w.player.x(), w.player.y());
        let i = w.orbs.spawn(px + 100.0, py, 1, &mut rng);
        update_orbs(&mut w, &StatSnapshot::default(), 1.0 / 60.0);
        assert!((w.orbs.velocities_x[i] + w.player.magnet_pull_speed).abs() < 1e-3);
        assert!(w.orbs.positions_x[i] < px + 100.0);
    }

    #[test]
    fn orb_outside_magnet_radius_drifts_with_damping() {
        let mut w = open_world();
        let mut rng = SimpleRng::new(1);
        let (px, py) = (w.player.x(), w.player.y());
        let i = w.orbs.spawn(px + 600.0, py, 1, &mut rng);
        let v0 = w.orbs.velocities_x[i];
        update_orbs(&mut w, &StatSnapshot::default(), 1.0 / 60.0);
        assert!((w.orbs.velocities_x[i] - v0 * w.config.orb.drift_damping).abs() < 1e-4);
    }

    #[test]
    fn collecting_orbs_grants_xp_and_levels() {
        let mut w = open_world();
        let mut rng = SimpleRng::new(1);
        let (px, py) = (w.player.x(), w.player.y());
        for _ in 0..4 {
            w.orbs.spawn(px + 1.0, py, 3, &mut rng);
        }
        update_orbs(&mut w, &StatSnapshot::default(), 1.0 / 60.0);
        assert_eq!(w.orbs.count(), 0);
        assert_eq!(w.player.level, 2);
        let collected = w.frame_events.iter().filter(|e| matches!(e, FrameEvent::OrbCollected { .. })).count();
        assert_eq!(collected, 4);
        assert!(w.frame_events.contains(&FrameEvent::LevelUp { new_level: 2 }));
    }

    #[test]
    fn xp_multiplier_applies() {
        let mut w = open_world();
        let mut rng = SimpleRng::new(1);
        let (px, py) = (w.player.x(), w.player.y());
        w.orbs.spawn(px, py, 2, &mut rng);
        let stats = StatSnapshot { xp_mult: 1.5, ..StatSnapshot::default() };
        update_orbs(&mut w, &stats, 1.0 / 60.0);
        assert!((w.player.xp - 3.0).abs() < 1e-6);
    }
}
