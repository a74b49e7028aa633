/// 出力画像の最大ピクセル数（幅 × 高さ）
///
/// 明示された軸・比例計算した軸のどちらにも同じ上限を適用する。
pub const MAX_OUTPUT_PIXELS: u64 = 50_000_000;

/// デコードを許可する元画像の最大寸法（幅・高さ）
pub const MAX_SOURCE_DIMENSION: u32 = 20_000;

/// デコード時に確保できるメモリの上限（バイト）
pub const MAX_DECODE_ALLOC: u64 = 512 * 1024 * 1024;

/// デフォルト品質（1-100）
pub const DEFAULT_QUALITY: u8 = 80;

/// オブジェクトキーの最大長（S3 の上限に合わせる）
pub const MAX_KEY_LENGTH: usize = 1024;

/// 404 レスポンスの本文
pub const NOT_FOUND_BODY: &str = "404 - Not Found";

/// 400 レスポンスの本文
pub const BAD_REQUEST_BODY: &str = "400 - Bad Request";

/// 生成した派生画像に付与するユーザーメタデータ
pub const GENERATED_BY_KEY: &str = "generated-by";
pub const GENERATED_BY_VALUE: &str = "resize-core";
