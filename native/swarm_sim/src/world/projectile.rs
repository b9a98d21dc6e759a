//! Path: native/swarm_sim/src/world/projectile.rs
//! Summary: 弾丸 SoA（ProjectileWorld）

use swarm_core::entity_params::{ProjectileBehavior, ProjectileSpawn};
use swarm_core::pool::SlotPool;

/// 弾丸 SoA（Structure of Arrays）。全配列は容量ぶん確保済み。
pub struct ProjectileWorld {
    pub positions_x:      Vec<f32>,
    pub positions_y:      Vec<f32>,
    pub velocities_x:     Vec<f32>,
    pub velocities_y:     Vec<f32>,
    pub lifetime:         Vec<f32>,
    /// 累積移動距離（Returning は折り返し時に 0 に戻す）
    pub travel:           Vec<f32>,
    pub max_distance:     Vec<f32>,
    pub damage:           Vec<f32>,
    pub radius:           Vec<f32>,
    /// 残りヒット数（1 + pierce）。0 になった同じティックで消える。
    pub hits_left:        Vec<u32>,
    /// 分裂した子弾に引き継ぐ貫通数
    pub pierce:           Vec<u32>,
    pub collides_terrain: Vec<bool>,
    pub crit_chance:      Vec<f32>,
    pub crit_mult:        Vec<f32>,
    pub behavior:         Vec<ProjectileBehavior>,
    /// Orbiting の経過時間
    pub orbit_time:       Vec<f32>,
    pub launched:         Vec<bool>,
    /// Returning の帰路フラグ
    pub returning:        Vec<bool>,
    slots:                SlotPool,
}

impl ProjectileWorld {
    pub fn new(capacity: usize) -> Self {
        Self {
            positions_x:      vec![0.0; capacity],
            positions_y:      vec![0.0; capacity],
            velocities_x:     vec![0.0; capacity],
            velocities_y:     vec![0.0; capacity],
            lifetime:         vec![0.0; capacity],
            travel:           vec![0.0; capacity],
            max_distance:     vec![0.0; capacity],
            damage:           vec![0.0; capacity],
            radius:           vec![0.0; capacity],
            hits_left:        vec![0; capacity],
            pierce:           vec![0; capacity],
            collides_terrain: vec![true; capacity],
            crit_chance:      vec![0.0; capacity],
            crit_mult:        vec![0.0; capacity],
            behavior:         vec![ProjectileBehavior::Straight; capacity],
            orbit_time:       vec![0.0; capacity],
            launched:         vec![false; capacity],
            returning:        vec![false; capacity],
            slots:            SlotPool::with_capacity(capacity),
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

    /// O(1) でスロットを取得する。満杯なら None（呼び出し側は黙って諦める）。
    #[allow(clippy::too_many_arguments)]
    pub fn spawn(
        &mut self,
        x: f32,
        y: f32,
        vx: f32,
        vy: f32,
        damage: f32,
        lifetime: f32,
        params: &ProjectileSpawn,
    ) -> Option<usize> {
        let Some(i) = self.slots.acquire() else {
            log::debug!("projectile pool exhausted ({} slots)", self.len());
            return None;
        };
        self.positions_x[i]      = x;
        self.positions_y[i]      = y;
        self.velocities_x[i]     = vx;
        self.velocities_y[i]     = vy;
        self.lifetime[i]         = lifetime;
        self.travel[i]           = 0.0;
        self.max_distance[i]     = params.max_distance.max(0.0);
        self.damage[i]           = damage;
        self.radius[i]           = params.radius;
        self.hits_left[i]        = params.pierce.saturating_add(1);
        self.pierce[i]           = params.pierce;
        self.collides_terrain[i] = params.collides_terrain;
        self.crit_chance[i]      = params.crit_chance;
        self.crit_mult[i]        = params.crit_mult;
        self.behavior[i]         = params.behavior;
        self.orbit_time[i]       = 0.0;
        self.launched[i]         = false;
        self.returning[i]        = false;
        Some(i)
    }

    /// 冪等。既に消えていれば false。
    pub fn kill(&mut self, i: usize) -> bool {
        self.slots.release(i)
    }
}
