use crate::world::{FrameEvent, GameWorld, PendingProjectile};
use swarm_core::constants::{
    PROJECTILE_CATCH_DIST, PROJECTILE_ORBIT_DIST, PROJECTILE_ORBIT_SPEED, SHOT_DAMAGE_CAP,
};
use swarm_core::entity_params::{ProjectileBehavior, ProjectileSpawn};
use swarm_core::physics::geometry::{circle_intersects_circle, length, Aabb};
use swarm_core::physics::obstacle_resolve::{move_phasing, push_by, ResolveParams};
use swarm_core::util::{orb_split, roll_kill_value};

/// 分裂弾の扇の全幅（±22.5°）
const SPLIT_FAN: f32 = std::f32::consts::FRAC_PI_4;
/// Returning 弾の折り返し角のランダム幅
const RETURN_JITTER: f32 = 0.5;

/// 寿命・射程・地形・場外による消滅（ヒットによる消滅は含まない）
fn expire(w: &mut GameWorld, i: usize) {
    if w.projectiles.kill(i) {
        w.frame_events.push(FrameEvent::ProjectileExpired { projectile: i });
    }
}

/// 分裂: 親の進行方向を中心に扇状の子弾を保留リストへ積む
fn queue_split(w: &mut GameWorld, i: usize, split_count: u32) {
    let p = &w.projectiles;
    let (vx, vy) = (p.velocities_x[i], p.velocities_y[i]);
    let speed = length(vx, vy);
    let angle = vy.atan2(vx);
    let denom = if split_count > 1 { (split_count - 1) as f32 } else { 1.0 };
    let params = ProjectileSpawn {
        radius:           p.radius[i] * 0.5,
        pierce:           p.pierce[i],
        collides_terrain: p.collides_terrain[i],
        max_distance:     0.0,
        crit_chance:      p.crit_chance[i],
        crit_mult:        p.crit_mult[i],
        behavior:         ProjectileBehavior::Straight,
    };
    for k in 0..split_count {
        let a = angle + SPLIT_FAN * (k as f32 / denom - 0.5);
        w.pending_projectiles.push(PendingProjectile {
            x:        p.positions_x[i],
            y:        p.positions_y[i],
            vx:       a.cos() * speed,
            vy:       a.sin() * speed,
            damage:   p.damage[i] * 0.5,
            lifetime: 1.0,
            params,
        });
    }
}

/// 磁力弾: 半径内の敵を弾の位置へ引き寄せる。地形は押し出しと同じ手順で考慮する。
/// 敵グリッドは前ティックのものなので、候補は現在位置で距離を測り直す。
fn pull_enemies(
    w: &mut GameWorld,
    (cx, cy): (f32, f32),
    pull_radius: f32,
    step: f32,
    params: &ResolveParams,
) {
    if pull_radius <= 0.0 || step <= 0.0 {
        return;
    }
    w.collision
        .query_dynamic_into(&Aabb::around(cx, cy, pull_radius, pull_radius), &mut w.enemy_query_buf);

    for k in 0..w.enemy_query_buf.len() {
        let ei = w.enemy_query_buf[k];
        if !w.enemies.alive(ei) || w.enemies.is_spawning(ei) {
            continue;
        }
        let dx = cx - w.enemies.positions_x[ei];
        let dy = cy - w.enemies.positions_y[ei];
        let dist = length(dx, dy);
        if dist >= pull_radius || dist <= f32::EPSILON {
            continue;
        }
        // 弾の中心を越えて引っ張らない
        let s = step.min(dist) / dist;
        let mut body = w.enemies.body(ei);
        if w.enemies.ignore_terrain[ei] {
            move_phasing(&mut body, dx * s, dy * s, params);
        } else {
            push_by(&mut body, dx * s, dy * s, &mut w.collision, &mut w.obstacle_query_buf, params);
        }
        w.enemies.store_body(ei, &body);
    }
}

/// 弾丸の移動・挙動・地形判定・射程・寿命・場外判定
pub(crate) fn update_projectiles(w: &mut GameWorld, dt: f32) {
    let px = w.player.x();
    let py = w.player.y();
    let enemy_params = w.enemy_resolve_params();
    let margin = w.config.projectile.bounds_margin;
    let (world_w, world_h) = (w.config.world.width, w.config.world.height);
    w.pending_projectiles.clear();

    for i in 0..w.projectiles.len() {
        if !w.projectiles.alive(i) {
            continue;
        }

        // ── 周回フェーズ: プレイヤーの周りを回ってからランダム方向へ発射 ──
        if let ProjectileBehavior::Orbiting { launch_delay, orbit_angle, launch_speed } = w.projectiles.behavior[i] {
            if !w.projectiles.launched[i] {
                w.projectiles.orbit_time[i] += dt;
                let t = w.projectiles.orbit_time[i];
                if t < launch_delay {
                    let a = orbit_angle + t * PROJECTILE_ORBIT_SPEED;
                    w.projectiles.positions_x[i] = px + a.cos() * PROJECTILE_ORBIT_DIST;
                    w.projectiles.positions_y[i] = py + a.sin() * PROJECTILE_ORBIT_DIST;
                    continue;
                }
                w.projectiles.launched[i] = true;
                let a = w.combat_rng.float(0.0, std::f32::consts::TAU);
                w.projectiles.velocities_x[i] = a.cos() * launch_speed;
                w.projectiles.velocities_y[i] = a.sin() * launch_speed;
            }
        }

        let ox = w.projectiles.positions_x[i];
        let oy = w.projectiles.positions_y[i];
        let step_x = w.projectiles.velocities_x[i] * dt;
        let step_y = w.projectiles.velocities_y[i] * dt;
        let nx = ox + step_x;
        let ny = oy + step_y;

        // 1 ティック分の移動を覆うボックスで地形を引き、終点の円で判定
        if w.projectiles.collides_terrain[i] {
            let r = w.projectiles.radius[i];
            let sweep = Aabb::new(
                ox.min(nx) - r,
                oy.min(ny) - r,
                step_x.abs() + r * 2.0,
                step_y.abs() + r * 2.0,
            );
            if w.collision.circle_hits_solid(&sweep, nx, ny, r, &mut w.obstacle_query_buf) {
                expire(w, i);
                continue;
            }
        }

        w.projectiles.positions_x[i] = nx;
        w.projectiles.positions_y[i] = ny;
        w.projectiles.travel[i] += length(step_x, step_y);
        let max_distance = w.projectiles.max_distance[i];

        if let ProjectileBehavior::Magnet { pull_radius, pull_strength } = w.projectiles.behavior[i] {
            pull_enemies(w, (nx, ny), pull_radius, pull_strength * dt, &enemy_params);
        }

        match w.projectiles.behavior[i] {
            ProjectileBehavior::Returning | ProjectileBehavior::Magnet { .. } => {
                if !w.projectiles.returning[i] {
                    if max_distance > 0.0 && w.projectiles.travel[i] >= max_distance {
                        w.projectiles.returning[i] = true;
                        w.projectiles.travel[i] = 0.0;
                        let speed = length(w.projectiles.velocities_x[i], w.projectiles.velocities_y[i]);
                        let jitter = (w.combat_rng.next_f32() - 0.5) * RETURN_JITTER;
                        let a = (py - ny).atan2(px - nx) + jitter;
                        w.projectiles.velocities_x[i] = a.cos() * speed;
                        w.projectiles.velocities_y[i] = a.sin() * speed;
                    }
                } else {
                    let dx = px - nx;
                    let dy = py - ny;
                    if dx * dx + dy * dy < PROJECTILE_CATCH_DIST * PROJECTILE_CATCH_DIST {
                        expire(w, i);
                        continue;
                    }
                }
            }
            behavior => {
                if max_distance > 0.0 && w.projectiles.travel[i] >= max_distance {
                    if let ProjectileBehavior::Splitting { split_count } = behavior {
                        if split_count > 0 {
                            queue_split(w, i, split_count);
                        }
                    }
                    expire(w, i);
                    continue;
                }
            }
        }

        w.projectiles.lifetime[i] -= dt;
        if w.projectiles.lifetime[i] <= 0.0 {
            expire(w, i);
            continue;
        }

        if nx < -margin || ny < -margin || nx > world_w + margin || ny > world_h + margin {
            expire(w, i);
        }
    }

    // ループ中にプールを触らないよう、分裂弾はまとめて生成する（満杯なら黙って捨てる）
    for k in 0..w.pending_projectiles.len() {
        let s = w.pending_projectiles[k];
        w.projectiles.spawn(s.x, s.y, s.vx, s.vy, s.damage, s.lifetime, &s.params);
    }
    w.pending_projectiles.clear();
}

/// 敵撃破: スロット解放・撃破数・報酬オーブ・イベント
pub(crate) fn kill_enemy(w: &mut GameWorld, ei: usize) {
    let x = w.enemies.positions_x[ei];
    let y = w.enemies.positions_y[ei];
    let is_boss = w.enemies.is_boss[ei];
    if !w.enemies.kill(ei) {
        return;
    }
    w.kill_count += 1;

    let elapsed_minutes = w.elapsed_minutes();
    let mut value = roll_kill_value(&mut w.spawn_rng, elapsed_minutes);
    if is_boss {
        value += 3;
    }
    for tier in orb_split(value) {
        w.orbs.spawn(x, y, tier, &mut w.combat_rng);
    }
    w.frame_events.push(FrameEvent::EnemyKilled { enemy: ei, x, y, is_boss });
}

/// 弾丸 vs 敵。敵グリッドで候補を絞り、円-円で判定する。
/// 同一ティック内で同じ敵に二度当たらない（グリッドのクエリ結果は重複なし）。
pub(crate) fn update_projectile_hits(w: &mut GameWorld) {
    for pi in 0..w.projectiles.len() {
        if !w.projectiles.alive(pi) {
            continue;
        }
        let bx = w.projectiles.positions_x[pi];
        let by = w.projectiles.positions_y[pi];
        let br = w.projectiles.radius[pi];

        w.collision
            .query_dynamic_into(&Aabb::around(bx, by, br, br), &mut w.enemy_query_buf);

        for k in 0..w.enemy_query_buf.len() {
            let ei = w.enemy_query_buf[k];
            if !w.enemies.alive(ei) {
                continue;
            }
            let (ex, ey) = (w.enemies.positions_x[ei], w.enemies.positions_y[ei]);
            if !circle_intersects_circle(bx, by, br, ex, ey, w.enemies.radius[ei]) {
                continue;
            }

            let crit = w.combat_rng.chance(w.projectiles.crit_chance[pi]);
            let mult = if crit { w.projectiles.crit_mult[pi] } else { 1.0 };
            let damage = (w.projectiles.damage[pi] * mult).clamp(0.0, SHOT_DAMAGE_CAP);

            w.enemies.hp[ei] -= damage;
            w.frame_events.push(FrameEvent::EnemyHit { enemy: ei, damage, crit });
            if w.enemies.hp[ei] <= 0.0 {
                kill_enemy(w, ei);
            }

            let left = w.projectiles.hits_left[pi].saturating_sub(1);
            w.projectiles.hits_left[pi] = left;
            if left == 0 {
                w.projectiles.kill(pi);
                break;
            }
        }
    }
}
