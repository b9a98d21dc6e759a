//! Path: native/swarm_core/src/physics/spatial_hash.rs
//! Summary: 一様グリッドの空間ハッシュ（AABB 挿入・重複なしクエリ）と静的障害物ワールド

use rustc_hash::{FxHashMap, FxHashSet};

use super::geometry::Aabb;

/// 一様グリッドによる broadphase インデックス。所有権は持たず ID のみを保持する。
pub struct SpatialHash {
    pub cell_size: f32,
    cells:         FxHashMap<(i32, i32), Vec<usize>>,
    /// クエリごとに clear する訪問済み集合（複数セルにまたがる ID の重複排除）
    visited:       FxHashSet<usize>,
}

impl SpatialHash {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells:   FxHashMap::default(),
            visited: FxHashSet::default(),
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    #[inline]
    fn cell_coord(&self, v: f32) -> i32 {
        (v / self.cell_size).floor() as i32
    }

    /// AABB が覆うセル範囲 (min_cx, min_cy, max_cx, max_cy)
    pub fn cell_range(&self, a: &Aabb) -> (i32, i32, i32, i32) {
        (
            self.cell_coord(a.x),
            self.cell_coord(a.y),
            self.cell_coord(a.right()),
            self.cell_coord(a.bottom()),
        )
    }

    /// `aabb` が重なる全セルのバケットに `id` を追加する
    pub fn insert(&mut self, id: usize, aabb: &Aabb) {
        let (min_cx, min_cy, max_cx, max_cy) = self.cell_range(aabb);
        for cy in min_cy..=max_cy {
            for cx in min_cx..=max_cx {
                self.cells.entry((cx, cy)).or_default().push(id);
            }
        }
    }

    /// `aabb` と重なる可能性のある ID を `out` に書き込む（アロケーションなし・各 ID 1 回のみ）。
    /// 呼び出し前に `out` をクリアする必要はない（内部で `clear()` する）。
    /// 結果は候補集合なので、呼び出し側で narrow-phase 判定を行うこと。
    pub fn query_into(&mut self, aabb: &Aabb, out: &mut Vec<usize>) {
        out.clear();
        self.visited.clear();
        let (min_cx, min_cy, max_cx, max_cy) = self.cell_range(aabb);
        for cy in min_cy..=max_cy {
            for cx in min_cx..=max_cx {
                if let Some(ids) = self.cells.get(&(cx, cy)) {
                    for &id in ids {
                        if self.visited.insert(id) {
                            out.push(id);
                        }
                    }
                }
            }
        }
    }

    /// 円の外接ボックスでクエリする
    pub fn query_circle_into(&mut self, x: f32, y: f32, radius: f32, out: &mut Vec<usize>) {
        self.query_into(&Aabb::around(x, y, radius, radius), out);
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    Tree,
    Rock,
}

/// 静的障害物（ワールド生成時に一度だけ作られ、以後変更されない）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticObstacle {
    pub aabb:  Aabb,
    /// false の障害物は装飾のみ（衝突解決でスキップ）
    pub solid: bool,
    pub kind:  ObstacleKind,
}

/// 静的障害物グリッド（構築後は読み取り専用）と、毎ティック再構築する敵グリッド
pub struct CollisionWorld {
    pub dynamic:     SpatialHash,
    pub static_hash: SpatialHash,
    obstacles:       Vec<StaticObstacle>,
}

impl CollisionWorld {
    pub fn new(static_cell_size: f32, dynamic_cell_size: f32) -> Self {
        Self {
            dynamic:     SpatialHash::new(dynamic_cell_size),
            static_hash: SpatialHash::new(static_cell_size),
            obstacles:   Vec::new(),
        }
    }

    pub fn rebuild_static(&mut self, obstacles: Vec<StaticObstacle>) {
        self.static_hash.clear();
        for (idx, o) in obstacles.iter().enumerate() {
            self.static_hash.insert(idx, &o.aabb);
        }
        self.obstacles = obstacles;
    }

    pub fn obstacles(&self) -> &[StaticObstacle] {
        &self.obstacles
    }

    /// 静的グリッドの候補と障害物リストを同時に借用する（衝突解決用）
    pub fn query_static_into<'a>(
        &'a mut self,
        aabb: &Aabb,
        out: &mut Vec<usize>,
    ) -> &'a [StaticObstacle] {
        self.static_hash.query_into(aabb, out);
        &self.obstacles
    }

    /// 円が solid 障害物に触れているか（弾丸の地形判定）
    pub fn circle_hits_solid(&mut self, sweep: &Aabb, cx: f32, cy: f32, r: f32, buf: &mut Vec<usize>) -> bool {
        let obstacles = self.query_static_into(sweep, buf);
        buf.iter().any(|&idx| {
            obstacles
                .get(idx)
                .is_some_and(|o| o.solid && super::geometry::circle_intersects_aabb(cx, cy, r, &o.aabb))
        })
    }

    /// 敵グリッドを作り直す（毎ティック、クエリフェーズの前に呼ぶ）
    pub fn rebuild_dynamic<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = (usize, Aabb)>,
    {
        self.dynamic.clear();
        for (id, aabb) in items {
            self.dynamic.insert(id, &aabb);
        }
    }

    pub fn query_dynamic_into(&mut self, aabb: &Aabb, out: &mut Vec<usize>) {
        self.dynamic.query_into(aabb, out);
    }
}
