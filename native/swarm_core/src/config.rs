//! Path: native/swarm_core/src/config.rs
//! Summary: シミュレーション設定（不変の SimConfig と TOML 読み込み・検証）
//!
//! 各コンポーネントは構築時に設定のコピーを受け取る。実行時のチューニングは
//! フィールドを書き換えるのではなく、新しい `SimConfig` を丸ごと差し替える。

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world:      WorldConfig,
    pub scheduler:  SchedulerConfig,
    pub player:     PlayerConfig,
    pub enemy:      EnemyConfig,
    pub projectile: ProjectileConfig,
    pub orb:        OrbConfig,
    pub obstacle:   ObstacleConfig,
    pub resolver:   ResolverConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width:  f32,
    pub height: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub tick:            f32,
    pub max_frame_dt:    f32,
    pub max_substeps:    u32,
    pub frame_budget_ms: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub size:              f32,
    pub max_speed:         f32,
    /// 入力ゼロ時の減速（px/s²）
    pub friction:          f32,
    pub hp_max:            f32,
    pub invuln_time:       f32,
    pub contact_interval:  f32,
    pub pickup_radius:     f32,
    pub magnet_radius:     f32,
    pub magnet_pull_speed: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub capacity:           usize,
    pub max_active:         usize,
    pub size:               f32,
    pub hp:                 f32,
    pub speed:              f32,
    pub damage:             f32,
    pub spawn_interval:     f32,
    pub min_spawn_interval: f32,
    pub spawn_time:         f32,
    pub spawn_min_dist:     f32,
    pub spawn_pad:          f32,
    pub spawn_tries:        u32,
    pub cell_size:          f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub capacity:      usize,
    pub radius:        f32,
    pub bounds_margin: f32,
    pub aim_radius:    f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbConfig {
    pub capacity:      usize,
    pub radius:        f32,
    pub drift_damping: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    pub cell_size:        f32,
    pub min_count:        u32,
    pub max_count:        u32,
    pub tries:            u32,
    pub recency_window:   usize,
    pub protected_radius: f32,
    pub tree_ratio:       f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub epsilon:           f32,
    pub player_iterations: u32,
    pub enemy_iterations:  u32,
    pub separation_slop:   f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world:      WorldConfig::default(),
            scheduler:  SchedulerConfig::default(),
            player:     PlayerConfig::default(),
            enemy:      EnemyConfig::default(),
            projectile: ProjectileConfig::default(),
            orb:        OrbConfig::default(),
            obstacle:   ObstacleConfig::default(),
            resolver:   ResolverConfig::default(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { width: WORLD_WIDTH, height: WORLD_HEIGHT }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick:            FIXED_DT,
            max_frame_dt:    MAX_FRAME_DT,
            max_substeps:    MAX_SUBSTEPS,
            frame_budget_ms: FRAME_BUDGET_MS,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size:              PLAYER_SIZE,
            max_speed:         PLAYER_MAX_SPEED,
            friction:          PLAYER_FRICTION,
            hp_max:            PLAYER_HP,
            invuln_time:       PLAYER_INVULN_TIME,
            contact_interval:  CONTACT_INTERVAL,
            pickup_radius:     PICKUP_RADIUS,
            magnet_radius:     MAGNET_RADIUS,
            magnet_pull_speed: MAGNET_PULL_SPEED,
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            capacity:           ENEMY_POOL_CAPACITY,
            max_active:         ENEMY_MAX_ACTIVE,
            size:               ENEMY_SIZE,
            hp:                 ENEMY_HP,
            speed:              ENEMY_SPEED,
            damage:             ENEMY_DAMAGE,
            spawn_interval:     ENEMY_SPAWN_INTERVAL,
            min_spawn_interval: ENEMY_MIN_SPAWN_INTERVAL,
            spawn_time:         ENEMY_SPAWN_TIME,
            spawn_min_dist:     ENEMY_SPAWN_MIN_DIST,
            spawn_pad:          ENEMY_SPAWN_PAD,
            spawn_tries:        ENEMY_SPAWN_TRIES,
            cell_size:          ENEMY_CELL_SIZE,
        }
    }
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            capacity:      PROJECTILE_POOL_CAPACITY,
            radius:        PROJECTILE_RADIUS,
            bounds_margin: PROJECTILE_BOUNDS_MARGIN,
            aim_radius:    AIM_SEARCH_RADIUS,
        }
    }
}

impl Default for OrbConfig {
    fn default() -> Self {
        Self {
            capacity:      ORB_POOL_CAPACITY,
            radius:        ORB_RADIUS,
            drift_damping: ORB_DRIFT_DAMPING,
        }
    }
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            cell_size:        OBSTACLE_CELL_SIZE,
            min_count:        OBSTACLE_MIN_COUNT,
            max_count:        OBSTACLE_MAX_COUNT,
            tries:            OBSTACLE_TRIES,
            recency_window:   OBSTACLE_RECENCY_WINDOW,
            protected_radius: OBSTACLE_PROTECTED_RADIUS,
            tree_ratio:       OBSTACLE_TREE_RATIO,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            epsilon:           RESOLVE_EPSILON,
            player_iterations: PLAYER_RESOLVE_ITERATIONS,
            enemy_iterations:  ENEMY_RESOLVE_ITERATIONS,
            separation_slop:   SEPARATION_SLOP,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // NaN もここで弾く
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_zero(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::ZeroCapacity { field })
    } else {
        Ok(())
    }
}

impl SimConfig {
    /// TOML 文字列から読み込む（省略フィールドはデフォルト値）。読み込み後に検証する。
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config: SimConfig =
            toml::from_str(src).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("world.width", self.world.width)?;
        positive("world.height", self.world.height)?;
        positive("scheduler.tick", self.scheduler.tick)?;
        positive("scheduler.max_frame_dt", self.scheduler.max_frame_dt)?;
        non_zero("scheduler.max_substeps", self.scheduler.max_substeps as usize)?;
        positive("player.size", self.player.size)?;
        positive("player.hp_max", self.player.hp_max)?;
        positive("enemy.size", self.enemy.size)?;
        positive("enemy.cell_size", self.enemy.cell_size)?;
        positive("enemy.min_spawn_interval", self.enemy.min_spawn_interval)?;
        positive("obstacle.cell_size", self.obstacle.cell_size)?;
        positive("projectile.radius", self.projectile.radius)?;
        non_zero("enemy.capacity", self.enemy.capacity)?;
        non_zero("projectile.capacity", self.projectile.capacity)?;
        non_zero("orb.capacity", self.orb.capacity)?;
        non_zero("resolver.player_iterations", self.resolver.player_iterations as usize)?;
        non_zero("resolver.enemy_iterations", self.resolver.enemy_iterations as usize)?;
        if self.obstacle.min_count > self.obstacle.max_count {
            return Err(ConfigError::InvertedRange { field: "obstacle.min_count..max_count" });
        }
        if self.enemy.max_active > self.enemy.capacity {
            return Err(ConfigError::InvertedRange { field: "enemy.max_active..capacity" });
        }
        Ok(())
    }

    /// 実行中の差し替えで変更してはいけないフィールド（プール容量・ワールド形状）を比較する。
    pub fn check_reconfigure(&self, next: &SimConfig) -> Result<(), ConfigError> {
        next.validate()?;
        if self.world != next.world {
            return Err(ConfigError::Immutable { field: "world" });
        }
        if self.enemy.capacity != next.enemy.capacity {
            return Err(ConfigError::Immutable { field: "enemy.capacity" });
        }
        if self.projectile.capacity != next.projectile.capacity {
            return Err(ConfigError::Immutable { field: "projectile.capacity" });
        }
        if self.orb.capacity != next.orb.capacity {
            return Err(ConfigError::Immutable { field: "orb.capacity" });
        }
        if self.obstacle != next.obstacle {
            return Err(ConfigError::Immutable { field: "obstacle" });
        }
        Ok(())
    }
}
