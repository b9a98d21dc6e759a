//! Path: native/swarm_sim/src/scheduler.rs
//! Summary: 固定ステップスケジューラ（アキュムレータ + pause/resume）

use swarm_core::config::SchedulerConfig;

/// 可変フレーム時間を固定 dt のティック数に変換する
#[derive(Clone, Debug)]
pub struct FixedStepScheduler {
    tick:         f32,
    max_frame_dt: f32,
    max_substeps: u32,
    accumulator:  f32,
    paused:       bool,
}

impl FixedStepScheduler {
    pub fn new(cfg: &SchedulerConfig) -> Self {
        Self {
            tick:         cfg.tick,
            max_frame_dt: cfg.max_frame_dt,
            max_substeps: cfg.max_substeps,
            accumulator:  0.0,
            paused:       false,
        }
    }

    /// 設定の差し替え。溜まっている端数はそのまま持ち越す。
    pub fn reconfigure(&mut self, cfg: &SchedulerConfig) {
        self.tick = cfg.tick;
        self.max_frame_dt = cfg.max_frame_dt;
        self.max_substeps = cfg.max_substeps;
    }

    /// フレーム時間 `dt` を加算し、このフレームで回すティック数を返す。
    /// ヒッチは `max_frame_dt` に丸め、1 フレームのティック数は `max_substeps` で打ち切る。
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.paused {
            return 0;
        }
        let mut dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if dt > self.max_frame_dt {
            log::warn!("frame hitch: dt {:.3}s clamped to {:.3}s", dt, self.max_frame_dt);
            dt = self.max_frame_dt;
        }

        self.accumulator += dt;
        let mut ticks = 0;
        while self.accumulator >= self.tick && ticks < self.max_substeps {
            self.accumulator -= self.tick;
            ticks += 1;
        }
        if self.accumulator >= self.tick {
            log::warn!(
                "substep cap {} reached, dropping {:.3}s of backlog",
                self.max_substeps,
                self.accumulator
            );
            self.accumulator %= self.tick;
        }
        ticks
    }

    /// 描画補間用の係数 [0, 1)
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.tick
    }

    #[inline]
    pub fn tick(&self) -> f32 {
        self.tick
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}
