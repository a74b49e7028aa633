use crate::constants::DEFAULT_QUALITY;
use crate::key::{FitMode, KeyDescriptor};

/// 出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    /// 元画像の Content-Type から出力フォーマットを決める
    ///
    /// JPEG と判定できたものだけ JPEG を維持し、それ以外（不明・未設定を含む）は PNG にする。
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let is_jpeg = content_type
            .and_then(|ct| ct.split(';').next())
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("image/jpeg"));

        if is_jpeg { Self::Jpeg } else { Self::Png }
    }

    /// Content-Type を取得
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

/// 変換パラメータ
#[derive(Debug, Clone)]
pub struct TransformParams {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fit: FitMode,
    pub format: OutputFormat,
    pub quality: u8,
}

impl TransformParams {
    /// デフォルトパラメータを作成
    pub fn new(
        width: Option<u32>,
        height: Option<u32>,
        fit: FitMode,
        format: OutputFormat,
        quality: Option<u8>,
    ) -> Self {
        Self {
            width,
            height,
            fit,
            format,
            quality: quality.unwrap_or(DEFAULT_QUALITY),
        }
    }

    /// キーの解析結果と元画像の Content-Type から作成
    pub fn from_descriptor(
        descriptor: &KeyDescriptor,
        content_type: Option<&str>,
        quality: Option<u8>,
    ) -> Self {
        Self::new(
            descriptor.width,
            descriptor.height,
            descriptor.fit,
            OutputFormat::from_content_type(content_type),
            quality,
        )
    }
}
