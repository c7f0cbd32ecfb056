use chrono::NaiveDate;

use crate::errors::{Result, VClassError};

/// 接受的日期格式：ISO（存储格式）与 DD/MM/YYYY（界面输入格式）
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// 解析日历日期，两种格式都失败时返回校验错误
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .ok_or_else(|| {
            VClassError::validation(format!(
                "Invalid date '{input}': expected YYYY-MM-DD or DD/MM/YYYY"
            ))
        })
}
