use bigdecimal::{BigDecimal, One, Signed, Zero};

/// 1 Lakh = 10^5
pub const LAKH_EXPONENT: i64 = 5;

pub const DEFAULT_FRACTION_DIGITS: usize = 2;

/// 以 Lakh 为单位显示金额，保留两位小数
pub fn format_in_lakhs(value: &BigDecimal) -> String {
    format_in_lakhs_with(value, DEFAULT_FRACTION_DIGITS)
}

/// 以 Lakh 为单位显示金额；0 直接显示为 "0"，不带 L 后缀
///
/// 末位按四舍五入 (0.5 远离零进位)，与 JS `toFixed` 对精确 .5 的处理一致
pub fn format_in_lakhs_with(value: &BigDecimal, fraction_digits: usize) -> String {
    if value.is_zero() {
        return "0".to_string();
    }
    let digits = fraction_digits as i64;

    // 以末位为单位的整数部分 + 余数
    let units = shift_pow10(value, digits - LAKH_EXPONENT);
    let whole = units.with_scale(0);
    let rest = (&units - &whole).abs();
    let rounded = if &rest + &rest >= BigDecimal::one() {
        if units.is_negative() {
            whole - BigDecimal::one()
        } else {
            whole + BigDecimal::one()
        }
    } else {
        whole
    };

    format!("{} L", shift_pow10(&rounded, -digits).with_scale(digits))
}

/// 精确乘以 10^places (只改指数)
fn shift_pow10(value: &BigDecimal, places: i64) -> BigDecimal {
    let (digits, scale) = value.as_bigint_and_exponent();
    BigDecimal::new(digits, scale - places)
}

/// 分类名归一化 (去空白 + 小写)，用于目标值与实际值的匹配
pub fn norm_cat(s: &str) -> String {
    s.trim().to_lowercase()
}
