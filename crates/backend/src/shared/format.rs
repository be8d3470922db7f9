/// Форматирует число с разделителями тысяч (точками)
///
/// # Примеры
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Цена в формате Shopify Money: две цифры после точки, без разделителей
///
/// # Примеры
/// ```
/// use backend::shared::format::format_price;
/// assert_eq!(format_price(9.99), "9.99");
/// assert_eq!(format_price(19.5), "19.50");
/// ```
pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}
