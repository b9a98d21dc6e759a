//! Path: native/swarm_core/src/constants.rs
//! Summary: ワールドサイズ・固定ティック・プール容量・物理定数などのデフォルト値
//!
//! ここの値は `SimConfig::default()` の初期値としてのみ参照する。
//! 実行時のチューニングは `SimConfig` を差し替えて行う。

// World size
pub const WORLD_WIDTH:  f32 = 8000.0;
pub const WORLD_HEIGHT: f32 = 8000.0;

/// 最初のティック入力が来る前の仮の視界（スポーン位置の計算用）
pub const DEFAULT_VIEW_WIDTH:  f32 = 1280.0;
pub const DEFAULT_VIEW_HEIGHT: f32 = 720.0;

// Fixed step (60Hz)
pub const FIXED_DT: f32 = 1.0 / 60.0;
/// ヒッチ時に 1 フレームで受け付ける最大 dt（spiral of death 回避）
pub const MAX_FRAME_DT: f32 = 0.1;
pub const MAX_SUBSTEPS: u32 = 8;

/// 1 ティックの処理時間がこれを超えたら warn を出す
pub const FRAME_BUDGET_MS: f64 = 1000.0 / 60.0;

// Player
pub const PLAYER_SIZE:        f32 = 24.0;
pub const PLAYER_MAX_SPEED:   f32 = 220.0;
pub const PLAYER_FRICTION:    f32 = 1800.0;
pub const PLAYER_HP:          f32 = 100.0;
pub const PLAYER_INVULN_TIME: f32 = 0.5;
pub const PICKUP_RADIUS:      f32 = 28.0;
pub const MAGNET_RADIUS:      f32 = 180.0;
pub const MAGNET_PULL_SPEED:  f32 = 420.0;
/// 接触ダメージの適用間隔（秒）
pub const CONTACT_INTERVAL:   f32 = 0.35;

// Enemies
pub const ENEMY_SIZE:             f32 = 20.0;
pub const ENEMY_HP:               f32 = 20.0;
pub const ENEMY_SPEED:            f32 = 90.0;
pub const ENEMY_DAMAGE:           f32 = 3.0;
pub const ENEMY_POOL_CAPACITY:    usize = 800;
pub const ENEMY_MAX_ACTIVE:       usize = 600;
pub const ENEMY_SPAWN_INTERVAL:   f32 = 1.0;
pub const ENEMY_MIN_SPAWN_INTERVAL: f32 = 0.15;
/// スポーン演出中は静止・無害
pub const ENEMY_SPAWN_TIME:       f32 = 0.5;
pub const ENEMY_SPAWN_MIN_DIST:   f32 = 100.0;
pub const ENEMY_SPAWN_PAD:        f32 = 40.0;
pub const ENEMY_SPAWN_TRIES:      u32 = 12;

// Projectiles
pub const PROJECTILE_POOL_CAPACITY: usize = 300;
pub const PROJECTILE_RADIUS:        f32 = 4.0;
/// ワールド外に出た弾を消すまでの余白
pub const PROJECTILE_BOUNDS_MARGIN: f32 = 64.0;
pub const PROJECTILE_ORBIT_DIST:    f32 = 40.0;
pub const PROJECTILE_ORBIT_SPEED:   f32 = 5.0;
/// Returning 弾がプレイヤーに回収される距離
pub const PROJECTILE_CATCH_DIST:    f32 = 30.0;
/// 磁力弾の吸引半径・吸引速度（強さ 1.0 あたり）
pub const MAGNET_ORB_PULL_RADIUS:   f32 = 150.0;
pub const MAGNET_ORB_PULL_SPEED:    f32 = 100.0;
/// 最近接敵の探索半径（オートエイム）
pub const AIM_SEARCH_RADIUS:        f32 = 900.0;

// Default weapon (single straight shot)
pub const SHOT_DAMAGE:     f32 = 4.0;
pub const SHOT_SPEED:      f32 = 520.0;
pub const SHOT_LIFETIME:   f32 = 1.4;
pub const SHOT_COOLDOWN:   f32 = 0.35;
pub const SHOT_MIN_COOLDOWN: f32 = 0.1;
pub const SHOT_CRIT_MULT:  f32 = 2.0;
/// 1 ヒットあたりのダメージ上限
pub const SHOT_DAMAGE_CAP: f32 = 999.0;

// XP orbs
pub const ORB_POOL_CAPACITY: usize = 2000;
pub const ORB_RADIUS:        f32 = 6.0;
pub const ORB_DRIFT_DAMPING: f32 = 0.98;
pub const ORB_MAX_TIER:      u32 = 3;

// Obstacles / spatial hash
pub const OBSTACLE_CELL_SIZE:      f32 = 128.0;
pub const ENEMY_CELL_SIZE:         f32 = 64.0;
pub const OBSTACLE_MIN_COUNT:      u32 = 1500;
pub const OBSTACLE_MAX_COUNT:      u32 = 2500;
pub const OBSTACLE_TRIES:          u32 = 6;
pub const OBSTACLE_RECENCY_WINDOW: usize = 50;
/// ワールド中心（プレイヤー初期位置）周辺は障害物を置かない
pub const OBSTACLE_PROTECTED_RADIUS: f32 = 300.0;
pub const OBSTACLE_TREE_RATIO:     f32 = 0.6;

// Collision resolution
pub const RESOLVE_EPSILON:          f32 = 1e-3;
pub const PLAYER_RESOLVE_ITERATIONS: u32 = 4;
pub const ENEMY_RESOLVE_ITERATIONS:  u32 = 3;
/// 分離時に重なり量へ足す余白
pub const SEPARATION_SLOP:          f32 = 0.01;

// Events
/// drain されずに溜まるフレームイベントの上限（超えた分は古い順に捨てる）
pub const FRAME_EVENT_CAP: usize = 4096;

/// 配置用 RNG シード（Simulation::new のシードと XOR して使う）
pub const PLACEMENT_RNG_SALT: u64 = 0xdeca_fbad;
pub const SPAWN_RNG_SALT:     u64 = 0x1234_abcd;
pub const COMBAT_RNG_SALT:    u64 = 0xabad_1dea;
