//! Path: native/swarm_sim/src/world/enemy.rs
//! Summary: 敵 SoA（EnemyWorld）と SeparationBodies の実装

use swarm_core::config::EnemyConfig;
use swarm_core::entity_params::EnemySpawn;
use swarm_core::physics::geometry::Aabb;
use swarm_core::physics::obstacle_resolve::{Collider, KinematicBody};
use swarm_core::physics::separation::SeparationBodies;
use swarm_core::pool::SlotPool;

/// 敵 SoA（Structure of Arrays）。全配列は容量ぶん確保済み。
#[derive(Clone)]
pub struct EnemyWorld {
    pub positions_x:    Vec<f32>,
    pub positions_y:    Vec<f32>,
    pub velocities_x:   Vec<f32>,
    pub velocities_y:   Vec<f32>,
    pub speeds:         Vec<f32>,
    pub hp:             Vec<f32>,
    pub hp_max:         Vec<f32>,
    pub damage:         Vec<f32>,
    pub radius:         Vec<f32>,
    /// コライダーの一辺（正方形）
    pub size:           Vec<f32>,
    pub ignore_terrain: Vec<bool>,
    /// 残り出現時間。0 より大きい間は静止・無害。
    pub spawn_timer:    Vec<f32>,
    pub is_boss:        Vec<bool>,
    /// 分離パス用の作業バッファ（毎フレーム再利用してアロケーションを回避）
    pub sep_x:          Vec<f32>,
    pub sep_y:          Vec<f32>,
    /// 近隣クエリ結果の再利用バッファ
    pub neighbor_buf:   Vec<usize>,
    slots:              SlotPool,
}

impl EnemyWorld {
    pub fn new(capacity: usize) -> Self {
        Self {
            positions_x:    vec![0.0; capacity],
            positions_y:    vec![0.0; capacity],
            velocities_x:   vec![0.0; capacity],
            velocities_y:   vec![0.0; capacity],
            speeds:         vec![0.0; capacity],
            hp:             vec![0.0; capacity],
            hp_max:         vec![0.0; capacity],
            damage:         vec![0.0; capacity],
            radius:         vec![0.0; capacity],
            size:           vec![0.0; capacity],
            ignore_terrain: vec![false; capacity],
            spawn_timer:    vec![0.0; capacity],
            is_boss:        vec![false; capacity],
            sep_x:          vec![0.0; capacity],
            sep_y:          vec![0.0; capacity],
            neighbor_buf:   Vec::new(),
            slots:          SlotPool::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.capacity()
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.slots.active_count()
    }

    #[inline]
    pub fn alive(&self, i: usize) -> bool {
        self.slots.is_alive(i)
    }

    pub fn iter_alive(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter_active()
    }

    #[inline]
    pub fn is_spawning(&self, i: usize) -> bool {
        self.spawn_timer[i] > 0.0
    }

    /// 基礎値に倍率を掛けてスポーンする。プール満杯、または `max_active` 到達
    /// （`ignore_cap` なしのとき）なら None。
    pub fn spawn(
        &mut self,
        x: f32,
        y: f32,
        params: &EnemySpawn,
        base: &EnemyConfig,
        max_active: usize,
    ) -> Option<usize> {
        if !params.ignore_cap && self.count() >= max_active {
            return None;
        }
        let i = self.slots.acquire()?;
        let size = base.size * params.size_mult;
        let hp = (base.hp * params.hp_mult).floor().max(1.0);
        self.positions_x[i]    = x;
        self.positions_y[i]    = y;
        self.velocities_x[i]   = 0.0;
        self.velocities_y[i]   = 0.0;
        self.speeds[i]         = base.speed * params.speed_mult;
        self.hp[i]             = hp;
        self.hp_max[i]         = hp;
        self.damage[i]         = base.damage * params.damage_mult;
        self.radius[i]         = size * 0.5;
        self.size[i]           = size;
        self.ignore_terrain[i] = params.ignore_terrain;
        self.spawn_timer[i]    = base.spawn_time;
        self.is_boss[i]        = params.is_boss;
        self.sep_x[i]          = 0.0;
        self.sep_y[i]          = 0.0;
        Some(i)
    }

    /// 冪等。既に死んでいれば false。
    pub fn kill(&mut self, i: usize) -> bool {
        self.slots.release(i)
    }

    pub fn body(&self, i: usize) -> KinematicBody {
        KinematicBody {
            x:        self.positions_x[i],
            y:        self.positions_y[i],
            vx:       self.velocities_x[i],
            vy:       self.velocities_y[i],
            collider: Collider::centered(self.size[i]),
        }
    }

    pub fn store_body(&mut self, i: usize, body: &KinematicBody) {
        self.positions_x[i]  = body.x;
        self.positions_y[i]  = body.y;
        self.velocities_x[i] = body.vx;
        self.velocities_y[i] = body.vy;
    }

    /// 円半径で作る AABB（敵グリッド・プレイヤー接触用）
    pub fn aabb(&self, i: usize) -> Aabb {
        let r = self.radius[i];
        Aabb::around(self.positions_x[i], self.positions_y[i], r, r)
    }
}

impl SeparationBodies for EnemyWorld {
    fn body_count(&self) -> usize                  { self.len() }
    fn is_alive(&self, i: usize) -> bool           { self.alive(i) }
    fn pos_x(&self, i: usize) -> f32               { self.positions_x[i] }
    fn pos_y(&self, i: usize) -> f32               { self.positions_y[i] }
    fn radius(&self, i: usize) -> f32              { self.radius[i] }
    fn is_spawning(&self, i: usize) -> bool        { EnemyWorld::is_spawning(self, i) }
    fn sep_buf_x(&mut self) -> &mut Vec<f32>       { &mut self.sep_x }
    fn sep_buf_y(&mut self) -> &mut Vec<f32>       { &mut self.sep_y }
    fn neighbor_buf(&mut self) -> &mut Vec<usize>  { &mut self.neighbor_buf }
}
