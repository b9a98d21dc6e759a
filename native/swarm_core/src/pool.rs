//! Path: native/swarm_core/src/pool.rs
//! Summary: 固定容量 SoA プールのスロット管理（alive フラグ + フリーリスト）

/// SoA プールの割り当て部分。属性配列は各プールが `capacity` 長で持ち、
/// このスロット表が「どのインデックスが生きているか」を管理する。
#[derive(Clone, Debug)]
pub struct SlotPool {
    alive:     Vec<bool>,
    /// 空きスロットのインデックススタック。末尾から pop するので最初の取得は 0 になる。
    free_list: Vec<usize>,
    count:     usize,
}

impl SlotPool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            alive:     vec![false; capacity],
            free_list: (0..capacity).rev().collect(),
            count:     0,
        }
    }

    /// O(1) で空きスロットを取得する。満杯なら None。
    pub fn acquire(&mut self) -> Option<usize> {
        let id = self.free_list.pop()?;
        self.alive[id] = true;
        self.count += 1;
        Some(id)
    }

    /// スロットを返却する。既に空いている・範囲外なら何もせず false。
    pub fn release(&mut self, id: usize) -> bool {
        match self.alive.get_mut(id) {
            Some(alive) if *alive => {
                *alive = false;
                self.free_list.push(id);
                self.count -= 1;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn is_alive(&self, id: usize) -> bool {
        self.alive.get(id).copied().unwrap_or(false)
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.alive.len()
    }

    pub fn iter_active(&self) -> impl Iterator<Item = usize> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter_map(|(i, &a)| a.then_some(i))
    }

    /// 最も小さい生存インデックス（強制リサイクルの対象）
    pub fn first_active(&self) -> Option<usize> {
        self.alive.iter().position(|&a| a)
    }

    /// 全スロットを空きに戻す
    pub fn reset(&mut self) {
        self.alive.iter_mut().for_each(|a| *a = false);
        self.free_list.clear();
        self.free_list.extend((0..self.alive.len()).rev());
        self.count = 0;
    }
}
