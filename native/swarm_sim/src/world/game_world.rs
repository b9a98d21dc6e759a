//! Path: native/swarm_sim/src/world/game_world.rs
//! Summary: ゲームワールド（GameWorld）。1 セッション分の全シミュレーション状態を所有する。

use super::{EnemyWorld, FrameEvent, OrbWorld, PlayerState, ProjectileWorld};
use swarm_core::config::SimConfig;
use swarm_core::constants::{COMBAT_RNG_SALT, PLACEMENT_RNG_SALT, SPAWN_RNG_SALT};
use swarm_core::entity_params::ProjectileSpawn;
use swarm_core::physics::obstacle_resolve::ResolveParams;
use swarm_core::physics::rng::SimpleRng;
use swarm_core::physics::spatial_hash::CollisionWorld;
use swarm_core::placement::scatter_obstacles;

/// 分裂弾の保留スポーン（弾丸ループ後にまとめて生成する）
#[derive(Clone, Copy, Debug)]
pub(crate) struct PendingProjectile {
    pub x:        f32,
    pub y:        f32,
    pub vx:       f32,
    pub vy:       f32,
    pub damage:   f32,
    pub lifetime: f32,
    pub params:   ProjectileSpawn,
}

/// ゲームワールド内部状態
pub struct GameWorld {
    pub config:             SimConfig,
    pub tick_id:            u64,
    pub player:             PlayerState,
    pub enemies:            EnemyWorld,
    pub projectiles:        ProjectileWorld,
    pub orbs:               OrbWorld,
    pub collision:          CollisionWorld,
    /// 敵スポーン位置・撃破報酬の抽選
    pub spawn_rng:          SimpleRng,
    /// クリティカル判定・弾の散らばり・オーブのドリフト
    pub combat_rng:         SimpleRng,
    /// 障害物クエリ用バッファ（毎ティック再利用）
    pub obstacle_query_buf: Vec<usize>,
    /// 敵グリッドクエリ用バッファ
    pub enemy_query_buf:    Vec<usize>,
    pub(crate) pending_projectiles: Vec<PendingProjectile>,
    /// このティックで発生したイベント（drain されるまで溜まる。上限 FRAME_EVENT_CAP、超えた分は古い順に捨てる）
    pub frame_events:       Vec<FrameEvent>,
    /// セッション開始からの経過時間（秒）
    pub elapsed_seconds:    f32,
    /// 次の自動スポーンまでの残り時間
    pub spawn_timer:        f32,
    /// 次の斉射までの残り時間
    pub weapon_cooldown:    f32,
    pub kill_count:         u32,
    /// 直近ティックの処理時間（ミリ秒）
    pub last_tick_ms:       f64,
}

impl GameWorld {
    /// 障害物を散布し、静的グリッドを構築する。`config` は検証済みであること。
    pub fn new(config: SimConfig, seed: u64) -> Self {
        let (w, h) = (config.world.width, config.world.height);

        let mut placement_rng = SimpleRng::new(seed ^ PLACEMENT_RNG_SALT);
        let obstacles = scatter_obstacles(&mut placement_rng, &config.obstacle, w, h);
        let mut collision = CollisionWorld::new(config.obstacle.cell_size, config.enemy.cell_size);
        collision.rebuild_static(obstacles);

        Self {
            tick_id:             0,
            player:              PlayerState::new(&config.player, w / 2.0, h / 2.0),
            enemies:             EnemyWorld::new(config.enemy.capacity),
            projectiles:         ProjectileWorld::new(config.projectile.capacity),
            orbs:                OrbWorld::new(config.orb.capacity),
            collision,
            spawn_rng:           SimpleRng::new(seed ^ SPAWN_RNG_SALT),
            combat_rng:          SimpleRng::new(seed ^ COMBAT_RNG_SALT),
            obstacle_query_buf:  Vec::new(),
            enemy_query_buf:     Vec::new(),
            pending_projectiles: Vec::new(),
            frame_events:        Vec::new(),
            elapsed_seconds:     0.0,
            spawn_timer:         config.enemy.spawn_interval,
            weapon_cooldown:     0.0,
            kill_count:          0,
            last_tick_ms:        0.0,
            config,
        }
    }

    /// 敵グリッドを作り直す（クエリフェーズの前に毎ティック呼ぶ）
    pub(crate) fn rebuild_collision(&mut self) {
        let enemies = &self.enemies;
        self.collision
            .rebuild_dynamic(enemies.iter_alive().map(|i| (i, enemies.aabb(i))));
    }

    pub(crate) fn player_resolve_params(&self) -> ResolveParams {
        ResolveParams {
            max_iterations: self.config.resolver.player_iterations,
            epsilon:        self.config.resolver.epsilon,
            world_w:        self.config.world.width,
            world_h:        self.config.world.height,
        }
    }

    pub(crate) fn enemy_resolve_params(&self) -> ResolveParams {
        ResolveParams {
            max_iterations: self.config.resolver.enemy_iterations,
            ..self.player_resolve_params()
        }
    }

    #[inline]
    pub(crate) fn elapsed_minutes(&self) -> f32 {
        self.elapsed_seconds / 60.0
    }
}
