//! Path: native/swarm_core/src/util.rs
//! Summary: 経験値カーブ・スポーン位置・撃破報酬オーブ分割などの共通ユーティリティ

use crate::constants::ORB_MAX_TIER;
use crate::physics::geometry::Aabb;
use crate::physics::rng::SimpleRng;

/// レベル 1 → 2 に必要な経験値
pub const XP_FIRST_LEVEL: u32 = 10;

/// 現在の閾値から次の閾値を返す（1.5 倍して切り捨て）
pub fn xp_for_next(current: u32) -> u32 {
    (current as u64 * 3 / 2).min(u32::MAX as u64) as u32
}

/// 撃破報酬を tier ≤ 3 のオーブに分割する（3 を並べ、余りを最後に 1 個）
pub fn orb_split(value: u32) -> impl Iterator<Item = u32> {
    let full = value.saturating_sub(1) / ORB_MAX_TIER;
    let rest = (value - full * ORB_MAX_TIER).max(1);
    std::iter::repeat(ORB_MAX_TIER).take(full as usize).chain(std::iter::once(rest))
}

/// 経過分数に応じて撃破時の XP 値（1〜3）を抽選する
pub fn roll_kill_value(rng: &mut SimpleRng, elapsed_minutes: f32) -> u32 {
    let p3 = (0.05 + 0.01 * elapsed_minutes).min(0.35);
    let p2 = (0.20 + 0.02 * elapsed_minutes).min(0.7);
    let r = rng.next_f32();
    if r < p3 {
        3
    } else if r < p3 + p2 {
        2
    } else {
        1
    }
}

/// カメラ視界内（`pad` だけ内側）で、`point` から `min_dist` 以上離れた位置を選ぶ。
/// `tries` 回で見つからなければ最後の候補をそのまま使う。
pub fn spawn_position_around(
    rng: &mut SimpleRng,
    px: f32,
    py: f32,
    viewport: &Aabb,
    min_dist: f32,
    pad: f32,
    tries: u32,
) -> (f32, f32) {
    let max_rx = (viewport.w / 2.0 - pad).max(0.0);
    let max_ry = (viewport.h / 2.0 - pad).max(0.0);
    let (lo_x, hi_x) = (viewport.x + pad, (viewport.right() - pad).max(viewport.x + pad));
    let (lo_y, hi_y) = (viewport.y + pad, (viewport.bottom() - pad).max(viewport.y + pad));
    let min_sq = min_dist * min_dist;

    let mut pos = (px, py);
    for _ in 0..tries.max(1) {
        let rx = rng.float(-1.0, 1.0) * max_rx;
        let ry = rng.float(-1.0, 1.0) * max_ry;
        pos = ((px + rx).clamp(lo_x, hi_x), (py + ry).clamp(lo_y, hi_y));
        let dx = pos.0 - px;
        let dy = pos.1 - py;
        if dx * dx + dy * dy >= min_sq {
            break;
        }
    }
    pos
}
