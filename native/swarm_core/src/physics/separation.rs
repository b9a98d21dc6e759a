//! Path: native/swarm_core/src/physics/separation.rs
//! Summary: 敵同士の重なり解消（Separation）トレイトと押し出し量の計算

use super::geometry::{normalize_or, Aabb};
use super::spatial_hash::SpatialHash;

/// 分離計算に必要な SoA へのアクセス
pub trait SeparationBodies {
    fn body_count(&self) -> usize;
    fn is_alive(&self, i: usize) -> bool;
    fn pos_x(&self, i: usize) -> f32;
    fn pos_y(&self, i: usize) -> f32;
    fn radius(&self, i: usize) -> f32;
    /// 出現演出中の個体は動かさない
    fn is_spawning(&self, i: usize) -> bool;
    fn sep_buf_x(&mut self) -> &mut Vec<f32>;
    fn sep_buf_y(&mut self) -> &mut Vec<f32>;
    fn neighbor_buf(&mut self) -> &mut Vec<usize>;
}

/// 重なっている敵ペアごとの押し出し量を `sep_buf_x/y` に積算する。
/// 各ペアは `j > i` の 1 回だけ処理し、貫通量 + `slop` を半分ずつ両者に配る。
/// 位置への反映は呼び出し側が地形を考慮して行う（`push_by`）。
///
/// `grid` はこのティックに再構築済みの敵グリッド。戻り値は押し出しが発生したペア数。
pub fn compute_separation<W: SeparationBodies>(world: &mut W, grid: &mut SpatialHash, slop: f32) -> usize {
    let len = world.body_count();
    world.sep_buf_x().clear();
    world.sep_buf_x().resize(len, 0.0);
    world.sep_buf_y().clear();
    world.sep_buf_y().resize(len, 0.0);
    if len < 2 {
        return 0;
    }

    let mut pairs = 0;
    for i in 0..len {
        if !world.is_alive(i) {
            continue;
        }
        let ix = world.pos_x(i);
        let iy = world.pos_y(i);
        let ir = world.radius(i);

        grid.query_into(&Aabb::around(ix, iy, ir * 2.0, ir * 2.0), world.neighbor_buf());
        let nb_len = world.neighbor_buf().len();
        for ni in 0..nb_len {
            let j = world.neighbor_buf()[ni];
            if j <= i || j >= len || !world.is_alive(j) {
                continue;
            }
            let dx = ix - world.pos_x(j);
            let dy = iy - world.pos_y(j);
            let min_dist = ir + world.radius(j);
            let dist_sq = dx * dx + dy * dy;
            if dist_sq >= min_dist * min_dist {
                continue;
            }

            let dist = dist_sq.sqrt();
            // 完全に重なった場合は右方向へ逃がす
            let (ux, uy) = normalize_or(dx, dy, (1.0, 0.0));
            let overlap = (min_dist - dist) + slop;
            let (share_i, share_j) = match (world.is_spawning(i), world.is_spawning(j)) {
                (false, false) => (0.5, 0.5),
                (true, false) => (0.0, 1.0),
                (false, true) => (1.0, 0.0),
                (true, true) => (0.0, 0.0),
            };
            world.sep_buf_x()[i] += ux * overlap * share_i;
            world.sep_buf_y()[i] += uy * overlap * share_i;
            world.sep_buf_x()[j] -= ux * overlap * share_j;
            world.sep_buf_y()[j] -= uy * overlap * share_j;
            pairs += 1;
        }
    }
    pairs
}
