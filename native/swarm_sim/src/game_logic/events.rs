//! Path: native/swarm_sim/src/game_logic/events.rs
//! Summary: フレームイベントの drain（描画・音声アダプタ用）と溜まりすぎの抑制

use crate::world::{FrameEvent, GameWorld};
use swarm_core::constants::FRAME_EVENT_CAP;

/// 溜まったイベントを発生順に取り出す
pub(crate) fn drain_frame_events_inner(w: &mut GameWorld) -> Vec<FrameEvent> {
    w.frame_events.drain(..).collect()
}

/// ホストが drain しない場合に備え、上限を超えた古いイベントを捨てる。ティック末尾で呼ぶ。
pub(crate) fn trim_frame_events(w: &mut GameWorld) {
    let len = w.frame_events.len();
    if len <= FRAME_EVENT_CAP {
        return;
    }
    let dropped = len - FRAME_EVENT_CAP;
    w.frame_events.drain(..dropped);
    log::debug!("frame events not drained: dropped {dropped} oldest (cap {FRAME_EVENT_CAP})");
}
