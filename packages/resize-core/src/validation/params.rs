/// キーに含まれる寸法の数字列を解釈する
///
/// 空文字または 0 は「その軸は指定なし」として `None` を返す。
/// u32 に収まらない値は `u32::MAX` に丸め、出力サイズの判定は変換側に任せる。
/// 呼び出し側で ASCII 数字のみであることを確認済みであること。
pub fn parse_dimension(digits: &str) -> Option<u32> {
    if digits.is_empty() {
        return None;
    }

    let value = digits.parse::<u32>().unwrap_or(u32::MAX);
    (value != 0).then_some(value)
}
