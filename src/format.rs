//! Display helpers for the metrics panel.

/// `850ms`, `2.345s` or `1m 5s`.
pub fn format_time(ms: u64) -> String {
	if ms < 1_000 {
		format!("{ms}ms")
	} else if ms < 60_000 {
		format!("{}.{:03}s", ms / 1_000, ms % 1_000)
	} else {
		format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1_000)
	}
}

/// Thousands separated with commas: `1234567` becomes `1,234,567`.
pub fn format_number(value: u64) -> String {
	let digits = value.to_string();
	let mut out = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, c) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(c);
	}
	out
}
