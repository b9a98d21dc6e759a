//! Path: native/swarm_sim/src/simulation.rs
//! Summary: 外部向けファサード（Simulation）とティック入力（TickInput）
//!
//! 描画・入力・UI 側はこの型だけを触る。状態は数値のみで、描画は
//! `snapshot()` を読み取り専用で引き出す。

use crate::game_logic::systems::spawn::spawn_enemy_around;
use crate::game_logic::{drain_frame_events_inner, physics_step_inner};
use crate::scheduler::FixedStepScheduler;
use crate::snapshot::{build_snapshot, visible_obstacles, WorldSnapshot};
use crate::world::{FrameEvent, GameWorld};
use swarm_core::config::SimConfig;
use swarm_core::constants::{DEFAULT_VIEW_HEIGHT, DEFAULT_VIEW_WIDTH};
use swarm_core::entity_params::{EnemySpawn, ProjectileSpawn, ShotStats, StatSnapshot};
use swarm_core::error::ConfigError;
use swarm_core::physics::geometry::Aabb;
use swarm_core::physics::obstacle_resolve::Collider;
use swarm_core::physics::spatial_hash::StaticObstacle;

/// 1 ティック分の外部入力
#[derive(Clone, Debug, PartialEq)]
pub struct TickInput {
    /// 正規化済みの移動方向（デッドゾーン処理済み）。(0, 0) で停止。
    pub move_dir: (f32, f32),
    /// カメラの視界（スポーン位置の計算にのみ使う）
    pub viewport: Aabb,
    pub stats:    StatSnapshot,
    /// None なら自動射撃しない
    pub shot:     Option<ShotStats>,
}

impl TickInput {
    /// 入力なし・射撃なし
    pub fn idle(viewport: Aabb) -> Self {
        Self {
            move_dir: (0.0, 0.0),
            viewport,
            stats:    StatSnapshot::default(),
            shot:     None,
        }
    }
}

pub struct Simulation {
    world:         GameWorld,
    scheduler:     FixedStepScheduler,
    /// 直近のティック入力の視界（外部からの敵スポーン用）
    last_viewport: Aabb,
    view_buf:      Vec<usize>,
}

impl Simulation {
    /// 設定を検証し、障害物の散布と静的グリッドの構築まで行う
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let scheduler = FixedStepScheduler::new(&config.scheduler);
        let world = GameWorld::new(config, seed);
        log::debug!(
            "simulation built: seed={} world={}x{} obstacles={}",
            seed,
            world.config.world.width,
            world.config.world.height,
            world.collision.obstacles().len()
        );
        let last_viewport = Aabb::around(
            world.player.x(),
            world.player.y(),
            DEFAULT_VIEW_WIDTH / 2.0,
            DEFAULT_VIEW_HEIGHT / 2.0,
        );
        Ok(Self { world, scheduler, last_viewport, view_buf: Vec::new() })
    }

    /// フレーム時間を渡し、必要な数だけ固定ティックを回す。回したティック数を返す。
    pub fn step_simulation(&mut self, dt: f32, input: &TickInput) -> u32 {
        let ticks = self.scheduler.advance(dt);
        for _ in 0..ticks {
            self.tick_once(input);
        }
        ticks
    }

    /// スケジューラを通さずに 1 ティックだけ進める（一時停止中でも進む）
    pub fn tick_once(&mut self, input: &TickInput) {
        self.last_viewport = input.viewport;
        physics_step_inner(&mut self.world, input);
    }

    // ── スポーン ─────────────────────────────────────────────────

    pub fn spawn_enemy_around(&mut self, point: (f32, f32), params: &EnemySpawn) -> Option<usize> {
        let viewport = self.last_viewport;
        let max_active = self.world.config.enemy.max_active;
        spawn_enemy_around(&mut self.world, point, &viewport, params, max_active)
    }

    pub fn spawn_projectile(
        &mut self,
        origin: (f32, f32),
        velocity: (f32, f32),
        damage: f32,
        lifetime: f32,
        params: &ProjectileSpawn,
    ) -> Option<usize> {
        self.world
            .projectiles
            .spawn(origin.0, origin.1, velocity.0, velocity.1, damage, lifetime, params)
    }

    /// 失敗しない。満杯なら最古のオーブを上書きする。
    pub fn spawn_orb(&mut self, point: (f32, f32), value: u32) -> usize {
        let w = &mut self.world;
        w.orbs.spawn(point.0, point.1, value, &mut w.combat_rng)
    }

    // ── 読み取り ─────────────────────────────────────────────────

    pub fn player_position(&self) -> (f32, f32) {
        (self.world.player.x(), self.world.player.y())
    }

    pub fn player_velocity(&self) -> (f32, f32) {
        (self.world.player.body.vx, self.world.player.body.vy)
    }

    pub fn player_hp(&self) -> f32 {
        self.world.player.hp
    }

    pub fn player_radius(&self) -> f32 {
        self.world.player.radius
    }

    pub fn player_level(&self) -> u32 {
        self.world.player.level
    }

    pub fn enemy_alive(&self, id: usize) -> bool {
        id < self.world.enemies.len() && self.world.enemies.alive(id)
    }

    pub fn enemy_position(&self, id: usize) -> Option<(f32, f32)> {
        let e = &self.world.enemies;
        self.enemy_alive(id).then(|| (e.positions_x[id], e.positions_y[id]))
    }

    pub fn enemy_velocity(&self, id: usize) -> Option<(f32, f32)> {
        let e = &self.world.enemies;
        self.enemy_alive(id).then(|| (e.velocities_x[id], e.velocities_y[id]))
    }

    pub fn enemy_hp(&self, id: usize) -> Option<f32> {
        self.enemy_alive(id).then(|| self.world.enemies.hp[id])
    }

    pub fn enemy_radius(&self, id: usize) -> Option<f32> {
        self.enemy_alive(id).then(|| self.world.enemies.radius[id])
    }

    pub fn projectile_alive(&self, id: usize) -> bool {
        id < self.world.projectiles.len() && self.world.projectiles.alive(id)
    }

    pub fn projectile_position(&self, id: usize) -> Option<(f32, f32)> {
        let p = &self.world.projectiles;
        self.projectile_alive(id).then(|| (p.positions_x[id], p.positions_y[id]))
    }

    pub fn projectile_velocity(&self, id: usize) -> Option<(f32, f32)> {
        let p = &self.world.projectiles;
        self.projectile_alive(id).then(|| (p.velocities_x[id], p.velocities_y[id]))
    }

    pub fn projectile_radius(&self, id: usize) -> Option<f32> {
        self.projectile_alive(id).then(|| self.world.projectiles.radius[id])
    }

    pub fn orb_alive(&self, id: usize) -> bool {
        id < self.world.orbs.len() && self.world.orbs.alive(id)
    }

    pub fn orb_position(&self, id: usize) -> Option<(f32, f32)> {
        let o = &self.world.orbs;
        self.orb_alive(id).then(|| (o.positions_x[id], o.positions_y[id]))
    }

    pub fn orb_velocity(&self, id: usize) -> Option<(f32, f32)> {
        let o = &self.world.orbs;
        self.orb_alive(id).then(|| (o.velocities_x[id], o.velocities_y[id]))
    }

    pub fn orb_value(&self, id: usize) -> Option<u32> {
        self.orb_alive(id).then(|| self.world.orbs.value[id])
    }

    pub fn orb_radius(&self) -> f32 {
        self.world.config.orb.radius
    }

    pub fn enemy_count(&self) -> usize {
        self.world.enemies.count()
    }

    pub fn projectile_count(&self) -> usize {
        self.world.projectiles.count()
    }

    pub fn orb_count(&self) -> usize {
        self.world.orbs.count()
    }

    pub fn kill_count(&self) -> u32 {
        self.world.kill_count
    }

    pub fn tick_id(&self) -> u64 {
        self.world.tick_id
    }

    pub fn elapsed_seconds(&self) -> f32 {
        self.world.elapsed_seconds
    }

    /// 直近ティックの処理時間（ミリ秒）
    pub fn last_tick_ms(&self) -> f64 {
        self.world.last_tick_ms
    }

    pub fn obstacles(&self) -> &[StaticObstacle] {
        self.world.collision.obstacles()
    }

    pub fn visible_obstacles(&mut self, viewport: &Aabb) -> Vec<StaticObstacle> {
        visible_obstacles(&mut self.world.collision, viewport, &mut self.view_buf)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        build_snapshot(&self.world, self.scheduler.alpha())
    }

    pub fn config(&self) -> &SimConfig {
        &self.world.config
    }

    pub fn world(&self) -> &GameWorld {
        &self.world
    }

    // ── 制御 ─────────────────────────────────────────────────────

    /// 溜まったイベントを発生順に取り出す。毎フレーム呼ぶ想定で、
    /// 呼ばれないまま上限（`FRAME_EVENT_CAP`）を超えた分は古い順に捨てられる。
    pub fn drain_events(&mut self) -> Vec<FrameEvent> {
        drain_frame_events_inner(&mut self.world)
    }

    /// 設定を丸ごと差し替える。プール容量・ワールド形状・障害物設定は変更できない。
    pub fn reconfigure(&mut self, config: SimConfig) -> Result<(), ConfigError> {
        self.world.config.check_reconfigure(&config)?;
        self.scheduler.reconfigure(&config.scheduler);

        let p = &mut self.world.player;
        p.max_speed = config.player.max_speed;
        p.pickup_radius = config.player.pickup_radius;
        p.magnet_radius = config.player.magnet_radius;
        p.magnet_pull_speed = config.player.magnet_pull_speed;
        p.radius = config.player.size / 2.0;
        p.body.collider = Collider::centered(config.player.size);

        self.world.config = config;
        log::debug!("simulation reconfigured at tick {}", self.world.tick_id);
        Ok(())
    }

    pub fn pause(&mut self) {
        self.scheduler.pause();
    }

    pub fn resume(&mut self) {
        self.scheduler.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.scheduler.is_paused()
    }
}
