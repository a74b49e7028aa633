/// プロセス設定
///
/// 環境変数から起動時に一度だけ読み込み、以後は変更しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// 元画像と派生画像を置くバケット
    pub bucket: String,
    /// リダイレクト先の公開 URL
    pub base_url: String,
    /// HTTP サーバーの待ち受けアドレス
    pub listen_addr: String,
    /// S3 互換ストレージのエンドポイント（MinIO など）
    pub s3_endpoint: Option<String>,
}

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

impl Config {
    /// 環境変数から Config を作成する。
    ///
    /// 必須の環境変数:
    /// - BUCKET
    /// - URL
    ///
    /// 任意: LISTEN_ADDR, S3_ENDPOINT
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| format!("{name} is not set"))
        };
        let optional = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bucket = required("BUCKET")?;
        let base_url = required("URL")?;

        Ok(Self {
            bucket,
            base_url: base_url.trim_end_matches('/').to_string(),
            listen_addr: optional("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
            s3_endpoint: optional("S3_ENDPOINT"),
        })
    }
}
