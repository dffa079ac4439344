use std::num::ParseFloatError;

/// Parses `"1.1, 0.2 0.3,1"` style input: commas and/or whitespace separate
/// values, empty pieces are skipped.
pub fn parse_number_list(line: &str) -> Result<Vec<f64>, ParseFloatError> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<f64>)
        .collect()
}

/// Inverse of [`parse_number_list`], used to pre-fill prompts.
pub fn format_number_list(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
