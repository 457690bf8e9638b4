use regex::Regex;

/// Whether `needle` sits on a line framed by `|` on both ends.
///
/// This is a line-shape check, not a table parser: any single line that
/// starts and ends with a pipe counts, and cells spanning lines do not. At
/// least one character must separate the needle from each framing pipe.
pub fn is_in_table(needle: &str, text: &str) -> bool {
    let pattern = format!(r"(?m)^\|.+{}.+\|\r?$", regex::escape(needle));
    Regex::new(&pattern).is_ok_and(|re| re.is_match(text))
}
