//! Path: native/swarm_core/src/physics/rng.rs
//! Summary: 決定論的 LCG 乱数ジェネレータ（配置・スポーン・戦闘で個別インスタンスを持つ）

/// Simple LCG (Linear Congruential Generator).
/// グローバルには置かず、必要なサブシステムが `&mut` で明示的に受け取る。
#[derive(Clone, Debug)]
pub struct SimpleRng(u64);

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self.0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    /// [0, 1) の一様乱数（上位 24bit を使うので 1.0 にはならない）
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// [min, max] の整数（両端含む）
    pub fn int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = (max as i64 - min as i64 + 1) as u64;
        (min as i64 + (self.next_u32() as u64 % span) as i64) as i32
    }

    /// [min, max) の実数
    pub fn float(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }
}
