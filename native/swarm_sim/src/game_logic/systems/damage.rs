use crate::world::{FrameEvent, GameWorld};
use swarm_core::entity_params::StatSnapshot;

/// 接触ダメージ: 触れている敵のダメージを合算し、`contact_interval` ごとに 1 回だけ適用する
pub(crate) fn update_contact_damage(w: &mut GameWorld, stats: &StatSnapshot) {
    if w.player.is_dead() {
        return;
    }
    let px = w.player.x();
    let py = w.player.y();
    let pr = w.player.radius;

    let mut total = 0.0_f32;
    let mut hits = 0_u32;
    for i in w.enemies.iter_alive() {
        if w.enemies.is_spawning(i) {
            continue;
        }
        let dx = w.enemies.positions_x[i] - px;
        let dy = w.enemies.positions_y[i] - py;
        let reach = w.enemies.radius[i] + pr;
        if dx * dx + dy * dy <= reach * reach {
            total += w.enemies.damage[i];
            hits += 1;
        }
    }

    if hits == 0 || w.player.contact_timer > 0.0 {
        return;
    }
    let amount = total.round().max(1.0);
    let invuln = w.config.player.invuln_time;
    if let Some(taken) = w.player.apply_damage(amount, stats.armor, invuln) {
        w.player.contact_timer = w.config.player.contact_interval;
        w.frame_events.push(FrameEvent::PlayerDamaged { damage: taken });
        if w.player.is_dead() {
            w.frame_events.push(FrameEvent::PlayerDied);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::systems::movement::update_player_movement;
    use swarm_core::config::{EnemyConfig, SimConfig};
    use swarm_core::entity_params::EnemySpawn;

    const DT: f32 = 1.0 / 60.0;

    fn world_with_touching_enemy(spawn_time: f32) -> GameWorld {
        let mut cfg = SimConfig::default();
        cfg.world.width = 2000.0;
        cfg.world.height = 2000.0;
        cfg.obstacle.min_count = 0;
        cfg.obstacle.max_count = 0;
        let mut w = GameWorld::new(cfg, 23);
        let base = EnemyConfig { spawn_time, ..w.config.enemy.clone() };
        let (px, py) = (w.player.x(), w.player.y());
        w.enemies.spawn(px + 10.0, py, &EnemySpawn::default(), &base, usize::MAX);
        w
    }

    fn damage_events(w: &GameWorld) -> usize {
        w.frame_events.iter().filter(|e| matches!(e, FrameEvent::PlayerDamaged { .. })).count()
    }

    #[test]
    fn contact_damage_respects_interval() {
        let mut w = world_with_touching_enemy(0.0);
        let stats = StatSnapshot::default();
        // 1 秒間に接触間隔ごと 1 回
        for _ in 0..60 {
            update_player_movement(&mut w, (0.0, 0.0), &stats, DT);
            update_contact_damage(&mut w, &stats);
        }
        let interval = w.config.player.contact_interval.max(w.config.player.invuln_time);
        let expected = (1.0 / interval).ceil() as usize;
        let got = damage_events(&w);
        assert!(got >= expected - 1 && got <= expected, "got {got}, expected ~{expected}");
        assert_eq!(w.player.hp, w.player.hp_max - got as f32 * w.config.enemy.damage.round().max(1.0));
    }

    #[test]
    fn spawning_enemy_is_harmless() {
        let mut w = world_with_touching_enemy(5.0);
        update_contact_damage(&mut w, &StatSnapshot::default());
        assert_eq!(w.player.hp, w.player.hp_max);
        assert_eq!(damage_events(&w), 0);
    }

    #[test]
    fn armor_reduces_to_minimum_one() {
        let mut w = world_with_touching_enemy(0.0);
        let stats = StatSnapshot { armor: 100.0, ..StatSnapshot::default() };
        update_contact_damage(&mut w, &stats);
        assert_eq!(w.player.hp, w.player.hp_max - 1.0);
    }

    #[test]
    fn lethal_contact_emits_player_died() {
        let mut w = world_with_touching_enemy(0.0);
        w.player.hp = 1.0;
        update_contact_damage(&mut w, &StatSnapshot::default());
        assert!(w.player.is_dead());
        assert!(w.frame_events.contains(&FrameEvent::PlayerDied));
        // 死亡後は何も起きない
        let n = w.frame_events.len();
        w.player.contact_timer = 0.0;
        update_contact_damage(&mut w, &StatSnapshot::default());
        assert_eq!(w.frame_events.len(), n);
    }
}
