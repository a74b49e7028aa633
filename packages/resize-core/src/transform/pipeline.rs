use bytes::Bytes;

use crate::constants::{DEFAULT_QUALITY, MAX_OUTPUT_PIXELS};
use crate::errors::TransformError;
use crate::key::KeyDescriptor;
use crate::transform::{
    apply_orientation, decode_image, encode_image, plan_resize, read_orientation, resize_image,
    OutputFormat, TransformParams,
};

/// 変換結果
#[derive(Debug, Clone)]
pub struct Transformed {
    pub bytes: Bytes,
    pub format: OutputFormat,
}

/// 元画像から派生画像を作る変換エンジン
///
/// 同じ入力に対して同じ出力を返す純粋な処理であること。
/// 重複リクエストで同じキーに二重に書き込まれても内容が変わらないことを前提にしている。
pub trait Transformer: Send + Sync {
    fn transform(
        &self,
        input: &[u8],
        content_type: Option<&str>,
        descriptor: &KeyDescriptor,
    ) -> Result<Transformed, TransformError>;
}

/// `image` + `fast_image_resize` による変換エンジン
#[derive(Debug, Clone)]
pub struct ImageTransformer {
    quality: u8,
}

impl Default for ImageTransformer {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
        }
    }
}

impl ImageTransformer {
    /// 指定されたパラメータに従って画像バイト列を変換する。
    ///
    /// EXIF Orientation を適用してからリサイズするため、出力は常に正立している。
    /// メタデータ (EXIF) はデコード・エンコードで削除されるので、二重に回転されることはない。
    pub fn transform_with_params(
        &self,
        input: &[u8],
        params: &TransformParams,
    ) -> Result<Transformed, TransformError> {
        let img = decode_image(input)?;

        // EXIF Orientation を読み取って適用
        let orientation = read_orientation(input).unwrap_or_default();
        let img = apply_orientation(img, orientation);

        let (src_w, src_h) = (img.width(), img.height());
        let plan = plan_resize(src_w, src_h, params.width, params.height, params.fit);
        validate_output_dimensions(plan.width, plan.height)?;

        let resized = if plan.is_noop(src_w, src_h) {
            img
        } else {
            resize_image(&img, plan.width, plan.height, plan.crop)?
        };

        let bytes = encode_image(&resized, params.format, params.quality)?;

        Ok(Transformed {
            bytes: Bytes::from(bytes),
            format: params.format,
        })
    }
}

impl Transformer for ImageTransformer {
    fn transform(
        &self,
        input: &[u8],
        content_type: Option<&str>,
        descriptor: &KeyDescriptor,
    ) -> Result<Transformed, TransformError> {
        let params = TransformParams::from_descriptor(descriptor, content_type, Some(self.quality));
        self.transform_with_params(input, &params)
    }
}

/// 出力画像のサイズを検証する
///
/// 明示された寸法と比例計算した寸法を区別せず、出力の総ピクセル数だけで判定する。
fn validate_output_dimensions(width: u32, height: u32) -> Result<(), TransformError> {
    if width as u64 * height as u64 > MAX_OUTPUT_PIXELS {
        return Err(TransformError::ResolutionTooLarge { width, height });
    }
    Ok(())
}
