//! Rupee amounts as the dashboard displays them ("₹15,50,000")

pub const RUPEE: char = '₹';

/// Formats a whole-rupee amount with Indian digit grouping: the last three
/// digits, then groups of two.
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("{}{}", RUPEE, digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2 + 4);
    out.push(RUPEE);
    for (i, c) in head.chars().enumerate() {
        if i != 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push(',');
    out.push_str(tail);
    out
}

/// Parses a display amount such as "₹15,50,000" or "8,25,000".
///
/// Returns `None` if the text has no digits, contains anything other than
/// an optional leading rupee sign, digits and commas, or overflows.
pub fn parse_inr(text: &str) -> Option<u64> {
    let text = text.trim();
    let text = text.strip_prefix(RUPEE).unwrap_or(text).trim_start();

    let mut digits = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '0'..='9' => digits.push(c),
            ',' => {}
            _ => return None,
        }
    }

    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
