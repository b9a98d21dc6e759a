//! Path: native/swarm_core/src/physics/obstacle_resolve.rs
//! Summary: 軸分離 AABB 衝突解決（プレイヤー・敵共通の移動 + 押し出し、壁沿いスライド）

use super::geometry::Aabb;
use super::spatial_hash::{CollisionWorld, StaticObstacle};

/// 本体中心からのオフセットで表したコライダー
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collider {
    pub w:  f32,
    pub h:  f32,
    pub ox: f32,
    pub oy: f32,
}

impl Collider {
    /// 中心に置いた正方形コライダー
    pub fn centered(size: f32) -> Self {
        Self { w: size, h: size, ox: -size / 2.0, oy: -size / 2.0 }
    }
}

/// 運動学的な本体（位置は中心座標）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicBody {
    pub x:        f32,
    pub y:        f32,
    pub vx:       f32,
    pub vy:       f32,
    pub collider: Collider,
}

impl KinematicBody {
    pub fn new(x: f32, y: f32, collider: Collider) -> Self {
        Self { x, y, vx: 0.0, vy: 0.0, collider }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb {
            x: self.x + self.collider.ox,
            y: self.y + self.collider.oy,
            w: self.collider.w,
            h: self.collider.h,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ResolveParams {
    pub max_iterations: u32,
    pub epsilon:        f32,
    pub world_w:        f32,
    pub world_h:        f32,
}

/// 1 回の解決で何が起きたか
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveReport {
    pub blocked_x: bool,
    pub blocked_y: bool,
    pub clamped_x: bool,
    pub clamped_y: bool,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

const MAX_SUBSTEPS_PER_AXIS: u32 = 64;

/// 1 サブステップの移動量はその軸のコライダー幅の半分まで
fn axis_substeps(collider: &Collider, axis: Axis, motion: f32) -> u32 {
    let extent = match axis {
        Axis::X => collider.w,
        Axis::Y => collider.h,
    } * 0.5;
    if extent <= 0.0 {
        return 1;
    }
    ((motion.abs() / extent).ceil() as u32).clamp(1, MAX_SUBSTEPS_PER_AXIS)
}

/// 1 軸ぶんの移動と押し出しループ。反復上限に達したら、そのティックは多少の貫通を許容する。
fn resolve_axis(
    body: &mut KinematicBody,
    axis: Axis,
    motion: f32,
    candidates: &[usize],
    obstacles: &[StaticObstacle],
    params: &ResolveParams,
    zero_velocity: bool,
) -> bool {
    let mut blocked = false;
    let substeps = axis_substeps(&body.collider, axis, motion);
    let step = motion / substeps as f32;

    for _ in 0..substeps {
        match axis {
            Axis::X => body.x += step,
            Axis::Y => body.y += step,
        }
        let mut aabb = body.aabb();
        for _ in 0..params.max_iterations {
            let mut corrected = false;
            for &idx in candidates {
                let Some(o) = obstacles.get(idx) else { continue };
                if !o.solid || !aabb.intersects(&o.aabb) {
                    continue;
                }
                let mtv = match axis {
                    Axis::X => aabb.overlap_x(&o.aabb),
                    Axis::Y => aabb.overlap_y(&o.aabb),
                };
                if mtv == 0.0 {
                    continue;
                }
                let push = mtv + params.epsilon.copysign(mtv);
                match axis {
                    Axis::X => {
                        body.x += push;
                        if zero_velocity {
                            body.vx = 0.0;
                        }
                    }
                    Axis::Y => {
                        body.y += push;
                        if zero_velocity {
                            body.vy = 0.0;
                        }
                    }
                }
                aabb = body.aabb();
                corrected = true;
                blocked = true;
            }
            if !corrected {
                break;
            }
        }
    }
    blocked
}

fn resolve(
    body: &mut KinematicBody,
    dx: f32,
    dy: f32,
    collision: &mut CollisionWorld,
    buf: &mut Vec<usize>,
    params: &ResolveParams,
    zero_velocity: bool,
) -> ResolveReport {
    let mut report = ResolveReport::default();

    if dx != 0.0 || dy != 0.0 {
        // 1 回のクエリで X/Y 両パスの候補をまかなう
        let sweep = body.aabb().sweep(dx, dy);
        let obstacles = collision.query_static_into(&sweep, buf);

        if dx != 0.0 {
            report.blocked_x = resolve_axis(body, Axis::X, dx, buf, obstacles, params, zero_velocity);
        }
        if dy != 0.0 {
            report.blocked_y = resolve_axis(body, Axis::Y, dy, buf, obstacles, params, zero_velocity);
        }
    }

    let cx = body.x.clamp(0.0, params.world_w);
    let cy = body.y.clamp(0.0, params.world_h);
    if cx != body.x {
        body.x = cx;
        report.clamped_x = true;
        if zero_velocity {
            body.vx = 0.0;
        }
    }
    if cy != body.y {
        body.y = cy;
        report.clamped_y = true;
        if zero_velocity {
            body.vy = 0.0;
        }
    }
    report
}

/// 変位 (dx, dy) だけ動かし、solid 障害物から軸ごとに押し出す。押し出した軸の速度は 0 にする。
pub fn move_and_collide(
    body: &mut KinematicBody,
    dx: f32,
    dy: f32,
    collision: &mut CollisionWorld,
    buf: &mut Vec<usize>,
    params: &ResolveParams,
) -> ResolveReport {
    resolve(body, dx, dy, collision, buf, params, true)
}

/// 外部からの変位（分離・ノックバック）を同じ手順で適用する。速度には触れない。
pub fn push_by(
    body: &mut KinematicBody,
    dx: f32,
    dy: f32,
    collision: &mut CollisionWorld,
    buf: &mut Vec<usize>,
    params: &ResolveParams,
) -> ResolveReport {
    resolve(body, dx, dy, collision, buf, params, false)
}

/// 地形を無視する本体（すり抜け敵）の直進移動。ワールド境界へのクランプのみ行う。
pub fn move_phasing(body: &mut KinematicBody, dx: f32, dy: f32, params: &ResolveParams) {
    body.x = (body.x + dx).clamp(0.0, params.world_w);
    body.y = (body.y + dy).clamp(0.0, params.world_h);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::spatial_hash::ObstacleKind;
    use proptest::prelude::*;

    const EPS: f32 = 1e-3;

    fn params() -> ResolveParams {
        ResolveParams { max_iterations: 4, epsilon: EPS, world_w: 1000.0, world_h: 1000.0 }
    }

    fn world_with(boxes: &[Aabb]) -> CollisionWorld {
        let mut w = CollisionWorld::new(128.0, 64.0);
        w.rebuild_static(
            boxes
                .iter()
                .map(|&aabb| StaticObstacle { aabb, solid: true, kind: ObstacleKind::Rock })
                .collect(),
        );
        w
    }

    #[test]
    fn stops_at_obstacle_left_edge() {
        let mut world = world_with(&[Aabb::new(100.0, 100.0, 50.0, 50.0)]);
        // AABB {x:80, y:120, w:20, h:20} → 中心 (90, 130)
        let mut body = KinematicBody::new(90.0, 130.0, Collider::centered(20.0));
        body.vx = 2400.0;
        let mut buf = Vec::new();
        let report = move_and_collide(&mut body, 40.0, 0.0, &mut world, &mut buf, &params());
        let right = body.aabb().right();
        assert!(right <= 100.0 && right >= 100.0 - 2.0 * EPS, "right edge = {right}");
        assert_eq!(body.vx, 0.0);
        assert!((body.y - 130.0).abs() < 1e-6);
        assert!(report.blocked_x && !report.blocked_y);
    }

    #[test]
    fn slides_along_wall_on_diagonal_move() {
        // 縦長の壁に斜めに突っ込む → X は止まり Y はそのまま進む
        let mut world = world_with(&[Aabb::new(100.0, 0.0, 20.0, 400.0)]);
        let mut body = KinematicBody::new(85.0, 200.0, Collider::centered(20.0));
        let mut buf = Vec::new();
        move_and_collide(&mut body, 10.0, 10.0, &mut world, &mut buf, &params());
        assert!(body.aabb().right() <= 100.0);
        assert!((body.y - 210.0).abs() < 1e-4);
    }

    #[test]
    fn non_solid_obstacles_are_ignored() {
        let mut world = CollisionWorld::new(128.0, 64.0);
        world.rebuild_static(vec![StaticObstacle {
            aabb:  Aabb::new(100.0, 100.0, 50.0, 50.0),
            solid: false,
            kind:  ObstacleKind::Tree,
        }]);
        let mut body = KinematicBody::new(90.0, 130.0, Collider::centered(20.0));
        let mut buf = Vec::new();
        move_and_collide(&mut body, 40.0, 0.0, &mut world, &mut buf, &params());
        assert!((body.x - 130.0).abs() < 1e-4);
    }

    #[test]
    fn squeezed_between_two_obstacles() {
        let mut world = world_with(&[
            Aabb::new(0.0, 0.0, 100.0, 20.0),
            Aabb::new(0.0, 40.0, 100.0, 20.0),
        ]);
        let mut body = KinematicBody::new(50.0, 30.0, Collider::centered(16.0));
        let mut buf = Vec::new();
        move_and_collide(&mut body, 0.0, 10.0, &mut world, &mut buf, &params());
        let a = body.aabb();
        assert!(a.bottom() <= 40.0 + EPS);
        assert!(a.y >= 20.0 - EPS);
    }

    #[test]
    fn clamps_to_world_and_zeroes_velocity() {
        let mut world = world_with(&[]);
        let mut body = KinematicBody::new(995.0, 5.0, Collider::centered(10.0));
        body.vx = 100.0;
        body.vy = -100.0;
        let mut buf = Vec::new();
        let report = move_and_collide(&mut body, 20.0, -20.0, &mut world, &mut buf, &params());
        assert_eq!((body.x, body.y), (1000.0, 0.0));
        assert_eq!((body.vx, body.vy), (0.0, 0.0));
        assert!(report.clamped_x && report.clamped_y);
    }

    #[test]
    fn push_by_keeps_velocity() {
        let mut world = world_with(&[Aabb::new(100.0, 100.0, 50.0, 50.0)]);
        let mut body = KinematicBody::new(90.0, 130.0, Collider::centered(20.0));
        body.vx = 12.0;
        let mut buf = Vec::new();
        push_by(&mut body, 40.0, 0.0, &mut world, &mut buf, &params());
        assert_eq!(body.vx, 12.0);
        assert!(body.aabb().right() <= 100.0);
    }

    #[test]
    fn zero_displacement_is_idempotent() {
        let mut world = world_with(&[Aabb::new(100.0, 100.0, 50.0, 50.0)]);
        let mut body = KinematicBody::new(90.0, 130.0, Collider::centered(20.0));
        let mut buf = Vec::new();
        move_and_collide(&mut body, 40.0, 0.0, &mut world, &mut buf, &params());
        let settled = body;
        move_and_collide(&mut body, 0.0, 0.0, &mut world, &mut buf, &params());
        move_and_collide(&mut body, 0.0, 0.0, &mut world, &mut buf, &params());
        assert_eq!(body, settled);
    }

    #[test]
    fn phasing_move_ignores_obstacles() {
        let mut body = KinematicBody::new(90.0, 130.0, Collider::centered(20.0));
        move_phasing(&mut body, 40.0, 0.0, &params());
        assert!((body.x - 130.0).abs() < 1e-4);
        move_phasing(&mut body, 5000.0, -5000.0, &params());
        assert_eq!((body.x, body.y), (1000.0, 0.0));
    }

    #[test]
    fn long_move_does_not_tunnel_through_thin_wall() {
        let mut world = world_with(&[Aabb::new(200.0, 0.0, 8.0, 400.0)]);
        let mut body = KinematicBody::new(150.0, 200.0, Collider::centered(20.0));
        let mut buf = Vec::new();
        let report = move_and_collide(&mut body, 120.0, 0.0, &mut world, &mut buf, &params());
        assert!(report.blocked_x);
        assert!(body.aabb().right() <= 200.0);
    }

    proptest! {
        #[test]
        fn body_never_ends_inside_a_solid_obstacle(
            ox in 200.0f32..600.0, oy in 200.0f32..600.0,
            ow in 10.0f32..120.0, oh in 10.0f32..120.0,
            angle in 0.0f32..std::f32::consts::TAU,
            dist in 0.0f32..12.0,
        ) {
            let obstacle = Aabb::new(ox, oy, ow, oh);
            let mut world = world_with(&[obstacle]);
            // 障害物の外側（左上）から出発して 1 ティック分だけ動かす
            let start_x = ox - 15.0;
            let start_y = oy - 15.0;
            let mut body = KinematicBody::new(start_x, start_y, Collider::centered(16.0));
            let mut buf = Vec::new();
            move_and_collide(
                &mut body,
                angle.cos() * dist,
                angle.sin() * dist,
                &mut world,
                &mut buf,
                &params(),
            );
            let a = body.aabb();
            if a.intersects(&obstacle) {
                let pen = a.overlap_x(&obstacle).abs().min(a.overlap_y(&obstacle).abs());
                prop_assert!(pen <= EPS);
            }
            prop_assert!(body.x >= 0.0 && body.x <= 1000.0);
            prop_assert!(body.y >= 0.0 && body.y <= 1000.0);
        }
    }
}
