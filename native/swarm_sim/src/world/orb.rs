//! Path: native/swarm_sim/src/world/orb.rs
//! Summary: 経験値オーブ SoA（OrbWorld）。満杯時は最古スロットを強制リサイクルする。

use swarm_core::constants::ORB_MAX_TIER;
use swarm_core::physics::rng::SimpleRng;
use swarm_core::pool::SlotPool;

/// 出現時のランダムドリフト速度の範囲
const DRIFT_SPEED_MIN: f32 = 20.0;
const DRIFT_SPEED_MAX: f32 = 50.0;

pub struct OrbWorld {
    pub positions_x:  Vec<f32>,
    pub positions_y:  Vec<f32>,
    pub velocities_x: Vec<f32>,
    pub velocities_y: Vec<f32>,
    /// 1..=3 の tier（= 経験値量）
    pub value:        Vec<u32>,
    slots:            SlotPool,
}

impl OrbWorld {
    pub fn new(capacity: usize) -> Self {
        Self {
            positions_x:  vec![0.0; capacity],
            positions_y:  vec![0.0; capacity],
            velocities_x: vec![0.0; capacity],
            velocities_y: vec![0.0; capacity],
            value:        vec![0; capacity],
            slots:        SlotPool::with_capacity(capacity),
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

    /// 失敗しないスポーン。満杯なら最小インデックスの生存オーブを上書きする。
    /// 容量 0 のプールは `validate()` で弾かれるのでここでは考慮しない。
    pub fn spawn(&mut self, x: f32, y: f32, value: u32, rng: &mut SimpleRng) -> usize {
        let i = match self.slots.acquire() {
            Some(i) => i,
            None => {
                let victim = self.slots.first_active().unwrap_or(0);
                log::debug!("orb pool full ({}), recycling slot {}", self.len(), victim);
                victim
            }
        };
        let angle = rng.float(0.0, std::f32::consts::TAU);
        let speed = rng.float(DRIFT_SPEED_MIN, DRIFT_SPEED_MAX);
        self.positions_x[i]  = x;
        self.positions_y[i]  = y;
        self.velocities_x[i] = angle.cos() * speed;
        self.velocities_y[i] = angle.sin() * speed;
        self.value[i]        = value.clamp(1, ORB_MAX_TIER);
        i
    }

    pub fn kill(&mut self, i: usize) -> bool {
        self.slots.release(i)
    }
}
