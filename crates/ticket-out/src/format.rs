//! Number formatting in the Italian convention: `.` groups thousands, `,`
//! separates decimals.

/// Currency with at most two decimals, trailing zeros dropped:
/// `€780.800`, `€1.234,5`, `-€12,25`
pub fn euro(value: f64) -> String {
    let sign = if value < 0.0 && value.abs() >= 0.005 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let fraction = cents % 100;

    let decimals = if fraction == 0 {
        String::new()
    } else if fraction % 10 == 0 {
        format!(",{}", fraction / 10)
    } else {
        format!(",{:02}", fraction)
    };

    format!("{}€{}{}", sign, whole, decimals)
}

/// Thousands of euros, no decimals: `€781k`, `-€13k`
pub fn kilo_euro(value: f64) -> String {
    let thousands = (value / 1000.0).round() as i64;
    let sign = if thousands < 0 { "-" } else { "" };
    format!("{}€{}k", sign, thousands.unsigned_abs())
}

/// One decimal and a percent sign: `20.0%`
pub fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Whole number with grouped thousands: `80.000`
pub fn thousands(value: f64) -> String {
    let rounded = value.round();
    let grouped = group_thousands(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Shortest plain rendering, no trailing `.0`: `30`, `12.5`
pub fn plain(value: f64) -> String {
    format!("{}", value)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
