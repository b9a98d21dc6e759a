use crate::world::GameWorld;
use swarm_core::physics::obstacle_resolve::{move_and_collide, move_phasing, push_by};
use swarm_core::physics::separation::compute_separation;

/// 敵同士の重なり解消。押し出し量を計算してから、地形を考慮して反映する（すり抜け敵は地形無視）。
/// 敵グリッドはこのティックに再構築済みであること。
pub(crate) fn separate_enemies(w: &mut GameWorld) {
    let slop = w.config.resolver.separation_slop;
    let pairs = compute_separation(&mut w.enemies, &mut w.collision.dynamic, slop);
    if pairs == 0 {
        return;
    }

    let params = w.enemy_resolve_params();
    for i in 0..w.enemies.len() {
        if !w.enemies.alive(i) {
            continue;
        }
        let (sx, sy) = (w.enemies.sep_x[i], w.enemies.sep_y[i]);
        if sx == 0.0 && sy == 0.0 {
            continue;
        }
        let mut body = w.enemies.body(i);
        if w.enemies.ignore_terrain[i] {
            move_phasing(&mut body, sx, sy, &params);
        } else {
            push_by(&mut body, sx, sy, &mut w.collision, &mut w.obstacle_query_buf, &params);
        }
        w.enemies.store_body(i, &body);
    }
}

/// プレイヤー vs 敵の AABB 押し合い。小さい方の軸の MTV を半分ずつ配る。
/// プレイヤーは地形付きで動かし、速度は 0 にする。出現演出中の敵は対象外。
pub(crate) fn resolve_player_enemy_contact(w: &mut GameWorld) {
    let player_params = w.player_resolve_params();
    let enemy_params = w.enemy_resolve_params();

    let query = w.player.body.aabb();
    w.collision.query_dynamic_into(&query, &mut w.enemy_query_buf);

    for k in 0..w.enemy_query_buf.len() {
        let ei = w.enemy_query_buf[k];
        if !w.enemies.alive(ei) || w.enemies.is_spawning(ei) {
            continue;
        }
        let pa = w.player.body.aabb();
        let ea = w.enemies.aabb(ei);
        if !pa.intersects(&ea) {
            continue;
        }

        let mtv_x = pa.overlap_x(&ea);
        let mtv_y = pa.overlap_y(&ea);
        let (hx, hy) = if mtv_x.abs() < mtv_y.abs() {
            (mtv_x * 0.5, 0.0)
        } else {
            (0.0, mtv_y * 0.5)
        };

        move_and_collide(
            &mut w.player.body,
            hx,
            hy,
            &mut w.collision,
            &mut w.obstacle_query_buf,
            &player_params,
        );
        w.player.body.vx = 0.0;
        w.player.body.vy = 0.0;

        let mut body = w.enemies.body(ei);
        if w.enemies.ignore_terrain[ei] {
            move_phasing(&mut body, -hx, -hy, &enemy_params);
        } else {
            push_by(&mut body, -hx, -hy, &mut w.collision, &mut w.obstacle_query_buf, &enemy_params);
        }
        body.vx = 0.0;
        body.vy = 0.0;
        w.enemies.store_body(ei, &body);
    }
}
