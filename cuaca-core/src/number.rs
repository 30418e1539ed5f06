//! Display rounding that matches the browser widget's output.

/// Digits needed to print any finite `f64` exactly.
const EXACT_DIGITS: usize = 1100;

/// Nearest integer, halves rounded up (`-2.5` → `-2`, `2.5` → `3`).
pub(crate) fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

/// `value` with `digits` decimals; an exact tie rounds away from zero
/// (`1.25` → `"1.3"`, `-6.125` → `"-6.13"`).
pub(crate) fn fixed(value: f64, digits: usize) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    let exact = format!("{abs:.EXACT_DIGITS$}");
    let body = match exact.find('.') {
        Some(dot) if is_tie(&exact[dot + 1..], digits) => {
            round_up_last_digit(&exact[..dot + 1 + digits])
        }
        _ => format!("{abs:.digits$}"),
    };

    let body = body.trim_end_matches('.').to_string();
    format!("{sign}{body}")
}

/// True when the fraction is exactly a `5` right after `digits` places.
fn is_tie(fraction: &str, digits: usize) -> bool {
    let mut rest = fraction.chars().skip(digits);
    rest.next() == Some('5') && rest.all(|c| c == '0')
}

fn round_up_last_digit(truncated: &str) -> String {
    let mut chars: Vec<char> = truncated.chars().collect();
    let mut i = chars.len();
    loop {
        if i == 0 {
            chars.insert(0, '1');
            break;
        }
        i -= 1;
        match chars[i] {
            '.' => continue,
            '9' => chars[i] = '0',
            c => {
                chars[i] = char::from(c as u8 + 1);
                break;
            }
        }
    }
    chars.into_iter().collect()
}
