use crate::key::FitMode;

/// リサイズ前にソース画像から切り出す領域（ソース座標系）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// 出力寸法とクロップ領域
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizePlan {
    pub width: u32,
    pub height: u32,
    pub crop: Option<CropBox>,
}

impl ResizePlan {
    /// ソース画像をそのまま使えるか
    pub fn is_noop(&self, src_w: u32, src_h: u32) -> bool {
        self.crop.is_none() && self.width == src_w && self.height == src_h
    }
}

/// 縮小倍率を計算する（withoutEnlargement: 拡大しない）
///
/// 両方の寸法が指定されている場合、アスペクト比を維持しつつ
/// 指定された領域に収まる最大の倍率を返す（最大1.0）
fn calculate_scale_factor(src_w: u32, src_h: u32, target_w: u32, target_h: u32) -> f64 {
    let scale_w = target_w as f64 / src_w as f64;
    let scale_h = target_h as f64 / src_h as f64;

    scale_w.min(scale_h).min(1.0)
}

/// 倍率を適用して新しい寸法を計算する
fn apply_scale(src_w: u32, src_h: u32, scale: f64) -> (u32, u32) {
    let new_w = (src_w as f64 * scale).round() as u32;
    let new_h = (src_h as f64 * scale).round() as u32;

    // 最小1pxを保証
    (new_w.max(1), new_h.max(1))
}

/// 片方の軸だけ指定された場合、もう一方をアスペクト比から求める（拡大あり）
fn proportional(src_a: u32, src_b: u32, target_a: u32) -> u32 {
    let b = (src_b as f64 * target_a as f64 / src_a as f64).round() as u32;
    b.max(1)
}

/// Contain モードの寸法を計算する
///
/// アスペクト比を維持しつつ、指定された領域に収まるようにリサイズ。
/// 元画像より大きくはしない
pub fn calculate_contain_dimensions(src_w: u32, src_h: u32, target_w: u32, target_h: u32) -> (u32, u32) {
    let scale = calculate_scale_factor(src_w, src_h, target_w, target_h);
    apply_scale(src_w, src_h, scale)
}

/// Exact モードの寸法を計算する
///
/// 指定のない軸はソースのアスペクト比から比例計算する。
pub fn calculate_exact_dimensions(
    src_w: u32,
    src_h: u32,
    target_w: Option<u32>,
    target_h: Option<u32>,
) -> (u32, u32) {
    match (target_w, target_h) {
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) => (w, proportional(src_w, src_h, w)),
        (None, Some(h)) => (proportional(src_h, src_w, h), h),
        (None, None) => (src_w, src_h),
    }
}

/// 出力のアスペクト比に合わせて、ソース中央から切り出す領域を計算する
///
/// ソースと出力のアスペクト比が一致する場合は `None`。
pub fn calculate_cover_crop(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> Option<CropBox> {
    let (sw, sh) = (src_w as f64, src_h as f64);
    let scale = (dst_w as f64 / sw).max(dst_h as f64 / sh);

    let crop_w = (dst_w as f64 / scale).min(sw);
    let crop_h = (dst_h as f64 / scale).min(sh);

    if (sw - crop_w).abs() < 0.5 && (sh - crop_h).abs() < 0.5 {
        return None;
    }

    Some(CropBox {
        left: (sw - crop_w) / 2.0,
        top: (sh - crop_h) / 2.0,
        width: crop_w,
        height: crop_h,
    })
}

/// フィットモードに従ってリサイズ計画を立てる
///
/// BoundedMax は両方の寸法が指定されているときだけ有効で、
/// それ以外は Exact として扱う。
pub fn plan_resize(
    src_w: u32,
    src_h: u32,
    target_w: Option<u32>,
    target_h: Option<u32>,
    fit: FitMode,
) -> ResizePlan {
    match (fit, target_w, target_h) {
        (FitMode::BoundedMax, Some(w), Some(h)) => {
            let (width, height) = calculate_contain_dimensions(src_w, src_h, w, h);
            ResizePlan { width, height, crop: None }
        }
        (_, Some(w), Some(h)) => ResizePlan {
            width: w,
            height: h,
            crop: calculate_cover_crop(src_w, src_h, w, h),
        },
        _ => {
            let (width, height) = calculate_exact_dimensions(src_w, src_h, target_w, target_h);
            ResizePlan { width, height, crop: None }
        }
    }
}
