use crate::world::GameWorld;
use swarm_core::entity_params::StatSnapshot;
use swarm_core::physics::geometry::{length, move_toward_zero};
use swarm_core::physics::obstacle_resolve::move_and_collide;

/// 入力方向 → 速度 → 地形付き移動、無敵・接触タイマーの減算
pub(crate) fn update_player_movement(w: &mut GameWorld, move_dir: (f32, f32), stats: &StatSnapshot, dt: f32) {
    let (mut ix, mut iy) = move_dir;
    if !ix.is_finite() || !iy.is_finite() {
        ix = 0.0;
        iy = 0.0;
    }
    // 呼び出し側で正規化済みのはずだが、長さ 1 を超える入力は詰め直す
    let len = length(ix, iy);
    if len > 1.0 {
        ix /= len;
        iy /= len;
    }

    let p = &mut w.player;
    if len > 1e-5 {
        let speed = p.max_speed * stats.move_speed;
        p.body.vx = ix * speed;
        p.body.vy = iy * speed;
    } else {
        let (vx, vy) = move_toward_zero(p.body.vx, p.body.vy, w.config.player.friction, dt);
        p.body.vx = vx;
        p.body.vy = vy;
    }

    let params = w.player_resolve_params();
    let (dx, dy) = (w.player.body.vx * dt, w.player.body.vy * dt);
    move_and_collide(
        &mut w.player.body,
        dx,
        dy,
        &mut w.collision,
        &mut w.obstacle_query_buf,
        &params,
    );

    if w.player.invuln_timer > 0.0 {
        w.player.invuln_timer = (w.player.invuln_timer - dt).max(0.0);
    }
    w.player.contact_timer = (w.player.contact_timer - dt).max(0.0);
}
