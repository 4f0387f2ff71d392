//! Форматирование чисел для таблиц и печатных форм (формат es-PE: "1,234.50")

/// Число с разделителем тысяч (запятая) и заданным количеством знаков после точки
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);

    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer_part, decimal_part) = match unsigned.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, c) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    // "-0.00" после округления выглядит странно в итогах
    let sign = if grouped.chars().all(|c| c == '0' || c == ',')
        && decimal_part.map_or(true, |d| d.chars().all(|c| c == '0'))
    {
        ""
    } else {
        sign
    };

    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Денежная сумма: 2 знака после точки
pub fn format_money(value: f64) -> String {
    format_number_with_decimals(value, 2)
}

/// Сумма в солях для печатных форм: "S/ 1,234.50"
pub fn format_soles(value: f64) -> String {
    format!("S/ {}", format_money(value))
}

/// Количество: до 3 знаков, без хвостовых нулей ("12", "2.5", "0.125")
pub fn format_quantity(value: f64) -> String {
    let s = format_number_with_decimals(value, 3);
    match s.split_once('.') {
        Some((int, dec)) => {
            let dec = dec.trim_end_matches('0');
            if dec.is_empty() {
                int.to_string()
            } else {
                format!("{}.{}", int, dec)
            }
        }
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "1,234.56");
        assert_eq!(format_money(1234567.891), "1,234,567.89");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(-1234.5), "-1,234.50");
        assert_eq!(format_money(-0.001), "0.00");
    }

    #[test]
    fn test_format_quantity_trims_zeros() {
        assert_eq!(format_quantity(12.0), "12");
        assert_eq!(format_quantity(2.5), "2.5");
        assert_eq!(format_quantity(1500.125), "1,500.125");
    }

    #[test]
    fn test_format_soles() {
        assert_eq!(format_soles(540.0), "S/ 540.00");
    }
}
