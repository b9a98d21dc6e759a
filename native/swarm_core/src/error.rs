//! Path: native/swarm_core/src/error.rs
//! Summary: 設定検証・読み込みのエラー型
//!
//! シミュレーション本体はエラーを返さない（プール枯渇・反復上限などは局所的に処理する）。
//! ここで扱うのは構築時・再設定時の設定エラーのみ。

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// 正の値でなければならないフィールドが 0 以下・NaN
    #[error("config field `{field}` must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    /// 容量が 0
    #[error("config field `{field}` must be non-zero")]
    ZeroCapacity { field: &'static str },

    /// min > max の範囲指定
    #[error("config range `{field}` has min > max")]
    InvertedRange { field: &'static str },

    /// 構築後に変更できないフィールド（プール容量・ワールドサイズ）を変えようとした
    #[error("config field `{field}` cannot change after the world is built")]
    Immutable { field: &'static str },

    /// TOML のパース・書き出し失敗（Clone/PartialEq のため文字列で保持）
    #[error("config parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        let e = ConfigError::NonPositive { field: "dt", value: -1.0 };
        assert_eq!(e.to_string(), "config field `dt` must be positive (got -1)");
        let e = ConfigError::Immutable { field: "world_width" };
        assert!(e.to_string().contains("world_width"));
    }

    #[test]
    fn boxes_as_std_error() {
        let boxed: Box<dyn std::error::Error> = Box::new(ConfigError::Parse("bad".into()));
        assert_eq!(boxed.to_string(), "config parse error: bad");
    }
}
