// Parse a positive, finite amount
pub fn parse_amount(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
}

// Format SOL balance for display
pub fn format_sol(amount: f64) -> String {
    format!("{:.4}", amount)
}

// Shorten address for display
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }

    let start: String = chars[..4].iter().collect();
    let end: String = chars[chars.len() - 4..].iter().collect();

    format!("{}...{}", start, end)
}
