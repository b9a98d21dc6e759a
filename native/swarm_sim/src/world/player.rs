//! Path: native/swarm_sim/src/world/player.rs
//! Summary: プレイヤー状態（運動学ボディ・HP・無敵/接触タイマー・照準・経験値）

use swarm_core::config::PlayerConfig;
use swarm_core::physics::obstacle_resolve::{Collider, KinematicBody};
use swarm_core::util::{xp_for_next, XP_FIRST_LEVEL};

/// プレイヤー状態
#[derive(Clone, Debug)]
pub struct PlayerState {
    pub body:              KinematicBody,
    pub radius:            f32,
    pub hp:                f32,
    pub hp_max:            f32,
    pub invuln_timer:      f32,
    /// 0 以下になったら次の接触ダメージを適用できる
    pub contact_timer:     f32,
    /// 最後に向いていた方向（単位ベクトル）。初期値は右向き。
    pub aim_x:             f32,
    pub aim_y:             f32,
    pub xp:                f32,
    pub level:             u32,
    pub xp_for_next:       u32,
    pub max_speed:         f32,
    pub pickup_radius:     f32,
    pub magnet_radius:     f32,
    pub magnet_pull_speed: f32,
}

impl PlayerState {
    pub fn new(cfg: &PlayerConfig, x: f32, y: f32) -> Self {
        Self {
            body:              KinematicBody::new(x, y, Collider::centered(cfg.size)),
            radius:            cfg.size / 2.0,
            hp:                cfg.hp_max,
            hp_max:            cfg.hp_max,
            invuln_timer:      0.0,
            contact_timer:     0.0,
            aim_x:             1.0,
            aim_y:             0.0,
            xp:                0.0,
            level:             1,
            xp_for_next:       XP_FIRST_LEVEL,
            max_speed:         cfg.max_speed,
            pickup_radius:     cfg.pickup_radius,
            magnet_radius:     cfg.magnet_radius,
            magnet_pull_speed: cfg.magnet_pull_speed,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.body.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.body.y
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }

    /// 経験値を加算し、上がったレベル数を返す（閾値は 1.5 倍ずつ増える）
    pub fn add_xp(&mut self, value: f32) -> u32 {
        self.xp += value;
        let mut gained = 0;
        while self.xp_for_next > 0 && self.xp >= self.xp_for_next as f32 {
            self.xp -= self.xp_for_next as f32;
            self.level += 1;
            self.xp_for_next = xp_for_next(self.xp_for_next);
            gained += 1;
        }
        gained
    }

    /// 装甲を差し引いた被ダメージ（最低 1）を適用する。無敵中・死亡済みなら None。
    pub fn apply_damage(&mut self, amount: f32, armor: f32, invuln_time: f32) -> Option<f32> {
        if self.invuln_timer > 0.0 || self.is_dead() {
            return None;
        }
        let taken = (amount - armor).max(1.0);
        self.hp = (self.hp - taken).max(0.0);
        self.invuln_timer = invuln_time;
        Some(taken)
    }
}
