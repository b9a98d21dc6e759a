//! Path: native/swarm_core/src/entity_params.rs
//! Summary: 敵・弾丸のスポーンパラメータと、武器ショットの数値解決
//!
//! オプションの寄せ集めではなく種別ごとの構造体で受け渡す。
//! 武器カタログやアップグレード自体は外部にあり、ここには解決済みの数値だけが届く。

use crate::constants::{
    MAGNET_ORB_PULL_RADIUS, MAGNET_ORB_PULL_SPEED, PROJECTILE_RADIUS, SHOT_COOLDOWN, SHOT_CRIT_MULT,
    SHOT_DAMAGE, SHOT_LIFETIME, SHOT_MIN_COOLDOWN, SHOT_SPEED,
};

/// 敵スポーン時の倍率・フラグ
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySpawn {
    pub hp_mult:        f32,
    pub speed_mult:     f32,
    pub size_mult:      f32,
    pub damage_mult:    f32,
    /// 地形をすり抜ける（直進 + ワールド境界クランプのみ）
    pub ignore_terrain: bool,
    pub is_boss:        bool,
    /// 同時出現上限を無視する（イベント湧き用）
    pub ignore_cap:     bool,
}

impl Default for EnemySpawn {
    fn default() -> Self {
        Self {
            hp_mult:        1.0,
            speed_mult:     1.0,
            size_mult:      1.0,
            damage_mult:    1.0,
            ignore_terrain: false,
            is_boss:        false,
            ignore_cap:     false,
        }
    }
}

impl EnemySpawn {
    /// ボス: HP 80 倍・2.5 倍サイズ・やや遅い
    pub fn boss() -> Self {
        Self { hp_mult: 80.0, speed_mult: 0.9, size_mult: 2.5, is_boss: true, ignore_cap: true, ..Self::default() }
    }
}

/// 弾丸の飛び方
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProjectileBehavior {
    Straight,
    /// `max_distance` まで進んだらプレイヤーへ折り返し、近づいたら回収される
    Returning,
    /// `max_distance` 到達時に `split_count` 本の子弾へ分裂する
    Splitting { split_count: u32 },
    /// `launch_delay` 秒だけプレイヤーの周囲を回ってからランダム方向へ撃ち出される
    Orbiting { launch_delay: f32, orbit_angle: f32, launch_speed: f32 },
    /// Returning と同じ軌道を描きつつ、`pull_radius` 内の敵を毎秒 `pull_strength` だけ引き寄せる
    Magnet { pull_radius: f32, pull_strength: f32 },
}

impl ProjectileBehavior {
    /// 強さ倍率から磁力弾を作る（1.0 で半径 150・速度 100）
    pub fn magnet(strength: f32) -> Self {
        Self::Magnet {
            pull_radius:   MAGNET_ORB_PULL_RADIUS * strength,
            pull_strength: MAGNET_ORB_PULL_SPEED * strength,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSpawn {
    pub radius:           f32,
    /// 貫通数。hits_left = 1 + pierce
    pub pierce:           u32,
    pub collides_terrain: bool,
    /// 0 なら距離制限なし
    pub max_distance:     f32,
    pub crit_chance:      f32,
    pub crit_mult:        f32,
    pub behavior:         ProjectileBehavior,
}

impl Default for ProjectileSpawn {
    fn default() -> Self {
        Self {
            radius:           PROJECTILE_RADIUS,
            pierce:           0,
            collides_terrain: true,
            max_distance:     0.0,
            crit_chance:      0.0,
            crit_mult:        SHOT_CRIT_MULT,
            behavior:         ProjectileBehavior::Straight,
        }
    }
}

/// 武器 1 種の基礎値
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponBase {
    pub damage:       f32,
    pub cooldown:     f32,
    pub speed:        f32,
    pub lifetime:     f32,
    pub amount:       u32,
    /// 弾のサイズ倍率
    pub size:         f32,
    pub pierce:       u32,
    pub crit_chance:  f32,
    pub max_distance: f32,
    /// 複数弾の扇の全角（ラジアン）
    pub spread:       f32,
}

impl Default for WeaponBase {
    fn default() -> Self {
        Self {
            damage:       SHOT_DAMAGE,
            cooldown:     SHOT_COOLDOWN,
            speed:        SHOT_SPEED,
            lifetime:     SHOT_LIFETIME,
            amount:       1,
            size:         1.0,
            pierce:       0,
            crit_chance:  0.0,
            max_distance: 0.0,
            spread:       0.0,
        }
    }
}

/// プレイヤー側の戦闘ステータス（アップグレードで加算される）
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotModifiers {
    pub damage:            f32,
    /// 0.25 で 25% 速い（クールダウン / 1.25）
    pub attack_speed:      f32,
    pub projectile_speed:  f32,
    pub projectile_amount: i32,
    pub size:              f32,
    pub duration:          f32,
    pub pierce:            u32,
    pub crit_chance:       f32,
    pub crit_mult:         f32,
}

impl Default for ShotModifiers {
    fn default() -> Self {
        Self {
            damage:            1.0,
            attack_speed:      0.0,
            projectile_speed:  1.0,
            projectile_amount: 0,
            size:              1.0,
            duration:          1.0,
            pierce:            0,
            crit_chance:       0.0,
            crit_mult:         SHOT_CRIT_MULT,
        }
    }
}

/// 1 回の斉射に使う解決済みの数値
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotStats {
    pub damage:       f32,
    pub cooldown:     f32,
    pub speed:        f32,
    pub lifetime:     f32,
    pub amount:       u32,
    pub spread:       f32,
    pub radius:       f32,
    pub pierce:       u32,
    pub crit_chance:  f32,
    pub crit_mult:    f32,
    pub max_distance: f32,
}

impl ShotStats {
    pub fn resolve(base: &WeaponBase, m: &ShotModifiers) -> Self {
        let amount = (base.amount as i64 + m.projectile_amount as i64).max(1) as u32;
        let crit_mult = if m.crit_mult > 0.0 { m.crit_mult } else { SHOT_CRIT_MULT };
        Self {
            damage:       base.damage * m.damage,
            cooldown:     (base.cooldown / (1.0 + m.attack_speed)).max(SHOT_MIN_COOLDOWN),
            speed:        base.speed * m.projectile_speed,
            lifetime:     base.lifetime * m.duration,
            amount,
            spread:       base.spread,
            radius:       PROJECTILE_RADIUS * base.size * m.size,
            pierce:       base.pierce + m.pierce,
            crit_chance:  (base.crit_chance + m.crit_chance).clamp(0.0, 1.0),
            crit_mult,
            max_distance: base.max_distance,
        }
    }

    pub fn projectile_spawn(&self) -> ProjectileSpawn {
        ProjectileSpawn {
            radius:       self.radius,
            pierce:       self.pierce,
            max_distance: self.max_distance,
            crit_chance:  self.crit_chance,
            crit_mult:    self.crit_mult,
            ..ProjectileSpawn::default()
        }
    }

    /// 斉射の i 番目の弾の角度オフセット（扇を等分）
    pub fn spread_offset(&self, i: u32) -> f32 {
        if self.amount <= 1 {
            return 0.0;
        }
        let t = i as f32 / (self.amount - 1) as f32;
        self.spread * (t - 0.5)
    }
}

impl Default for ShotStats {
    fn default() -> Self {
        Self::resolve(&WeaponBase::default(), &ShotModifiers::default())
    }
}

/// ティックごとに外部から渡される数値倍率
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatSnapshot {
    pub move_speed:   f32,
    pub magnet:       f32,
    pub pickup:       f32,
    /// 敵の湧き速度・上限の倍率
    pub spawn_rate:   f32,
    pub enemy_hp:     f32,
    pub enemy_damage: f32,
    pub enemy_speed:  f32,
    pub xp_mult:      f32,
    /// 接触ダメージからの固定減算
    pub armor:        f32,
}

impl Default for StatSnapshot {
    fn default() -> Self {
        Self {
            move_speed:   1.0,
            magnet:       1.0,
            pickup:       1.0,
            spawn_rate:   1.0,
            enemy_hp:     1.0,
            enemy_damage: 1.0,
            enemy_speed:  1.0,
            xp_mult:      1.0,
            armor:        0.0,
        }
    }
}
