use crate::errors::TransformError;
use crate::transform::dimensions::CropBox;
use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, RgbImage, RgbaImage};

/// 画像をリサイズする
///
/// fast_image_resize の Lanczos3 フィルタを使用する。
/// `crop` が指定されている場合はその領域を切り出してから出力寸法に合わせる。
/// アルファを持つ画像は RGBA のまま処理する。
pub fn resize_image(
    img: &DynamicImage,
    target_w: u32,
    target_h: u32,
    crop: Option<CropBox>,
) -> Result<DynamicImage, TransformError> {
    let has_alpha = img.color().has_alpha();
    let (src_w, src_h) = (img.width(), img.height());
    let (raw, pixel_type) = if has_alpha {
        (img.to_rgba8().into_raw(), PixelType::U8x4)
    } else {
        (img.to_rgb8().into_raw(), PixelType::U8x3)
    };

    let src_image = Image::from_vec_u8(src_w, src_h, raw, pixel_type).map_err(|e| {
        TransformError::ProcessingFailed(format!("failed to create source image: {e}"))
    })?;
    let mut dst_image = Image::new(target_w, target_h, pixel_type);

    let mut options =
        ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));
    if let Some(c) = crop {
        options = options.crop(c.left, c.top, c.width, c.height);
    }

    Resizer::new()
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| TransformError::ProcessingFailed(format!("resize failed: {e}")))?;

    let buf = dst_image.into_vec();
    let resized = if has_alpha {
        RgbaImage::from_raw(target_w, target_h, buf).map(DynamicImage::ImageRgba8)
    } else {
        RgbImage::from_raw(target_w, target_h, buf).map(DynamicImage::ImageRgb8)
    };

    resized.ok_or_else(|| {
        TransformError::ProcessingFailed("failed to convert resized image".to_string())
    })
}
