//! Path: native/swarm_core/src/physics/geometry.rs
//! Summary: AABB・軸ごとの貫通量（MTV）・円判定・ベクトル補助関数

/// 軸平行バウンディングボックス（x, y は左上）
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w: w.max(0.0), h: h.max(0.0) }
    }

    /// 中心と半径（半幅・半高）から作る
    pub fn around(cx: f32, cy: f32, half_w: f32, half_h: f32) -> Self {
        Self::new(cx - half_w, cy - half_h, half_w * 2.0, half_h * 2.0)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// 厳密な不等号: 辺が接しているだけなら重なりとみなさない
    #[inline]
    pub fn intersects(&self, o: &Aabb) -> bool {
        self.x < o.right() && self.right() > o.x && self.y < o.bottom() && self.bottom() > o.y
    }

    /// X 方向の符号付き貫通量。正なら右へ、負なら左へ押し出す。
    /// 2 方向のうち小さい方を選ぶ。
    #[inline]
    pub fn overlap_x(&self, o: &Aabb) -> f32 {
        let push_right = o.right() - self.x;
        let push_left = self.right() - o.x;
        if push_right < push_left { push_right } else { -push_left }
    }

    #[inline]
    pub fn overlap_y(&self, o: &Aabb) -> f32 {
        let push_down = o.bottom() - self.y;
        let push_up = self.bottom() - o.y;
        if push_down < push_up { push_down } else { -push_up }
    }

    /// 移動 (dx, dy) の始点と終点の両方を覆うボックス（broadphase 用）
    pub fn sweep(&self, dx: f32, dy: f32) -> Aabb {
        Aabb {
            x: self.x + dx.min(0.0),
            y: self.y + dy.min(0.0),
            w: self.w + dx.abs(),
            h: self.h + dy.abs(),
        }
    }

    pub fn expand(&self, margin: f32) -> Aabb {
        Aabb::new(self.x - margin, self.y - margin, self.w + margin * 2.0, self.h + margin * 2.0)
    }

    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

/// 円と AABB の判定（最近点までの距離で比較）
pub fn circle_intersects_aabb(cx: f32, cy: f32, r: f32, a: &Aabb) -> bool {
    let nx = cx.clamp(a.x, a.right());
    let ny = cy.clamp(a.y, a.bottom());
    let dx = cx - nx;
    let dy = cy - ny;
    dx * dx + dy * dy <= r * r
}

pub fn circle_intersects_circle(ax: f32, ay: f32, ar: f32, bx: f32, by: f32, br: f32) -> bool {
    let dx = bx - ax;
    let dy = by - ay;
    let rr = ar + br;
    dx * dx + dy * dy <= rr * rr
}

#[inline]
pub fn length(x: f32, y: f32) -> f32 {
    (x * x + y * y).sqrt()
}

/// 正規化。長さがほぼ 0 のときは `fallback` を返す（NaN を作らない）。
pub fn normalize_or(x: f32, y: f32, fallback: (f32, f32)) -> (f32, f32) {
    let len = length(x, y);
    if len > 1e-6 && len.is_finite() {
        (x / len, y / len)
    } else {
        fallback
    }
}

/// 摩擦による減速。速度の大きさを rate * dt だけ減らし、越えたらちょうど 0 にする。
pub fn move_toward_zero(vx: f32, vy: f32, rate: f32, dt: f32) -> (f32, f32) {
    let len = length(vx, vy);
    let dec = rate * dt;
    if len <= dec || len == 0.0 {
        return (0.0, 0.0);
    }
    let s = (len - dec) / len;
    (vx * s, vy * s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        let c = Aabb::new(9.99, 0.0, 10.0, 10.0);
        assert!(a.intersects(&c));
    }

    #[test]
    fn overlap_x_picks_smaller_push() {
        let obstacle = Aabb::new(100.0, 100.0, 50.0, 50.0);
        // 左から少しめり込んでいる → 左へ押し戻す
        let body = Aabb::new(85.0, 120.0, 20.0, 20.0);
        assert!((body.overlap_x(&obstacle) - -5.0).abs() < 1e-5);
        // 右から少しめり込んでいる → 右へ
        let body = Aabb::new(147.0, 120.0, 20.0, 20.0);
        assert!((body.overlap_x(&obstacle) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn overlap_y_picks_smaller_push() {
        let obstacle = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let body = Aabb::new(0.0, 8.0, 4.0, 4.0);
        assert!((body.overlap_y(&obstacle) - 2.0).abs() < 1e-5);
    }

    #[test]
    fn sweep_covers_start_and_end() {
        let a = Aabb::new(10.0, 10.0, 5.0, 5.0);
        let s = a.sweep(-4.0, 6.0);
        assert_eq!(s, Aabb::new(6.0, 10.0, 9.0, 11.0));
    }

    #[test]
    fn circle_vs_aabb() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(circle_intersects_aabb(12.0, 5.0, 2.5, &a));
        assert!(!circle_intersects_aabb(13.0, 5.0, 2.5, &a));
        assert!(circle_intersects_aabb(5.0, 5.0, 0.1, &a));
    }

    #[test]
    fn normalize_zero_vector_uses_fallback() {
        assert_eq!(normalize_or(0.0, 0.0, (1.0, 0.0)), (1.0, 0.0));
        let (x, y) = normalize_or(3.0, 4.0, (1.0, 0.0));
        assert!((x - 0.6).abs() < 1e-6 && (y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn friction_reaches_exact_zero_monotonically() {
        let (mut vx, mut vy) = (150.0_f32, -80.0_f32);
        let mut prev = length(vx, vy);
        for _ in 0..200 {
            let (nx, ny) = move_toward_zero(vx, vy, 1800.0, 1.0 / 60.0);
            vx = nx;
            vy = ny;
            let cur = length(vx, vy);
            if prev > 0.0 {
                assert!(cur < prev);
            } else {
                assert_eq!(cur, 0.0);
            }
            prev = cur;
        }
        assert_eq!((vx, vy), (0.0, 0.0));
    }
}
