//! 派生画像キーの解析
//!
//! キーの書式は `<prefix>-<width>x<height>[-m].<jpg|png>` で、
//! `<prefix>.<ext>` が元画像のキーになる。

mod parse;

pub use parse::parse_key;

/// リサイズのフィットモード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMode {
    /// 指定寸法ちょうどに合わせる（はみ出した部分は中央でクロップ）
    #[default]
    Exact,
    /// アスペクト比を維持して枠内に収める（拡大しない）
    BoundedMax,
}

/// キーで許可される拡張子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    Jpg,
    Png,
}

impl Extension {
    /// 大文字小文字を区別せずに拡張子を判定する
    pub fn from_str(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("jpg") {
            Some(Self::Jpg)
        } else if s.eq_ignore_ascii_case("png") {
            Some(Self::Png)
        } else {
            None
        }
    }
}

/// 派生画像リクエストの解析結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDescriptor {
    /// 派生画像のキー（デコード済みリクエストパス）
    pub key: String,
    /// 元画像の識別子（拡張子なし）
    pub original_id: String,
    /// 元画像のキー
    pub original_key: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fit: FitMode,
    pub extension: Extension,
}

/// キー解析の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedKey {
    /// 派生画像の生成対象
    Derivative(KeyDescriptor),
    /// 寸法が両方とも未指定。元画像そのものを指す
    Identity { original_key: String },
}
