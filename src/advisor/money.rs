/// Formats a euro amount the way the advisory texts quote money: rounded to
/// whole euros, thousands grouped with dots, e.g. `170.000 €`.
pub fn format_eur(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    let offset = digits.len() % 3;
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (index + 3 - offset) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-{grouped} €")
    } else {
        format!("{grouped} €")
    }
}
