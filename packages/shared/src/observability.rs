//! # ログ出力の初期化
//!
//! `LOG_FORMAT` で出力形式、`RUST_LOG` でレベルを選ぶ。
//! サービス名は subscriber ではなく span のフィールドとして付与する
//! （`imoveis-api` の起動 span とリクエスト span を参照）。

use std::str::FromStr;

/// 未知の `LOG_FORMAT`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("LOG_FORMAT は json か pretty を指定してください: {0:?}")]
pub struct UnknownLogFormat(pub String);

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 イベントの JSON
    Json,
    /// 開発用
    #[default]
    Pretty,
}

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(UnknownLogFormat(other.to_string())),
        }
    }
}

impl LogFormat {
    /// 環境変数 `LOG_FORMAT` から読み取る
    ///
    /// 未設定なら [`Pretty`](LogFormat::Pretty)。不正な値は起動エラーにする。
    pub fn from_env() -> Result<Self, UnknownLogFormat> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, UnknownLogFormat> {
        lookup("LOG_FORMAT").map_or(Ok(Self::default()), |v| v.parse())
    }
}

/// グローバル subscriber を登録する
///
/// `RUST_LOG` 未設定時は `info,imoveis=debug`。
#[cfg(feature = "observability")]
pub fn init_tracing(format: LogFormat) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,imoveis=debug".into());

    // JSON では span のフィールド（service など）をイベントに含める
    let fmt_layer = match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();
}
