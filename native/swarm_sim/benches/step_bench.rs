//! Path: native/swarm_sim/benches/step_bench.rs
//! Summary: 敵/弾/オーブ増量時の 1 ティックのベンチマーク

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use swarm_core::physics::geometry::Aabb;
use swarm_sim::{
    EnemySpawn, ProjectileSpawn, ShotStats, SimConfig, Simulation, StatSnapshot, TickInput,
};

#[derive(Clone, Copy)]
struct Scenario {
    name:        &'static str,
    enemies:     usize,
    projectiles: usize,
    orbs:        usize,
}

fn build_sim(s: Scenario) -> Simulation {
    let mut cfg = SimConfig::default();
    cfg.enemy.capacity = s.enemies.max(1);
    cfg.enemy.max_active = s.enemies.max(1);
    cfg.enemy.spawn_time = 0.0;
    cfg.projectile.capacity = (s.projectiles * 2).max(1);
    cfg.orb.capacity = s.orbs.max(1);
    let mut sim = match Simulation::new(cfg, 42) {
        Ok(sim) => sim,
        Err(e) => panic!("bench config rejected: {e}"),
    };

    let (px, py) = sim.player_position();
    let params = EnemySpawn::default();
    for _ in 0..s.enemies {
        sim.spawn_enemy_around((px, py), &params);
    }

    let shot = ProjectileSpawn::default();
    for i in 0..s.projectiles {
        let a = i as f32 * 0.017;
        sim.spawn_projectile((px, py), (a.cos() * 400.0, a.sin() * 400.0), 10.0, 2.0, &shot);
    }

    for i in 0..s.orbs {
        let t = i as f32;
        sim.spawn_orb((px + (t * 0.11).sin() * 600.0, py + (t * 0.07).cos() * 400.0), 1);
    }
    sim
}

fn input_for(sim: &Simulation) -> TickInput {
    let (px, py) = sim.player_position();
    TickInput {
        move_dir: (1.0, 0.0),
        viewport: Aabb::around(px, py, 640.0, 360.0),
        stats:    StatSnapshot::default(),
        shot:     Some(ShotStats::default()),
    }
}

fn bench_tick(c: &mut Criterion) {
    let scenarios = [
        Scenario { name: "tick_medium", enemies: 1_000, projectiles: 400, orbs: 200 },
        Scenario { name: "tick_high", enemies: 3_000, projectiles: 1_000, orbs: 300 },
        Scenario { name: "tick_extreme", enemies: 6_000, projectiles: 2_000, orbs: 300 },
    ];

    for scenario in scenarios {
        c.bench_function(scenario.name, |b| {
            b.iter_batched(
                || {
                    let sim = build_sim(scenario);
                    let input = input_for(&sim);
                    (sim, input)
                },
                |(mut sim, input)| {
                    sim.tick_once(&input);
                    sim
                },
                BatchSize::PerIteration,
            )
        });
    }
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
