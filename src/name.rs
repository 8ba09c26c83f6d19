use once_cell::sync::Lazy;
use regex::Regex;

/// Name qualifiers that are never part of the family name.
const SUFFIXES: &[&str] = &["Jr.", "Sr.", "Jnr.", "Snr."];

/// Whether `numeral` reads as a Roman numeral, ignoring case.
///
/// NOTE: the pattern accepts the empty string and any single numeral letter ("I", "V", "X", "L",
/// "C", "D", "M"). A trailing initial such as the "C" in "Arthur C" is therefore taken as a
/// suffix.
pub fn is_roman_numeral(numeral: &str) -> bool {
    static ROMAN_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^M{0,4}(CM|CD|D?C{0,3})(XC|XL|L?X{0,3})(IX|IV|V?I{0,3})$").unwrap()
    });
    ROMAN_RE.is_match(&numeral.to_uppercase())
}

/// Whether `s` is a trailing name qualifier like "Jr." or "III".
pub fn is_suffix(s: &str) -> bool {
    SUFFIXES.contains(&s) || is_roman_numeral(s)
}

/// Reorder a "First Last[, Suffix]" display name into "Last, First[, Suffix]".
///
/// ```
/// use mla_cite::format_name;
///
/// assert_eq!(format_name("John Doe"), "Doe, John");
/// assert_eq!(format_name("Martin Luther King, Jr."), "King, Martin Luther, Jr.");
/// assert_eq!(format_name("Bob"), "Bob");
/// ```
///
/// Names that do not split into at least two tokens (including the repeated-author marker "---")
/// come back verbatim.
pub fn format_name(name: &str) -> String {
    let parts: Vec<String> = name.split(' ').map(|p| p.replace(',', "")).collect();
    let [rest @ .., last] = parts.as_slice() else {
        return name.to_string();
    };
    if rest.is_empty() {
        return name.to_string();
    }

    if is_suffix(last)
        && let Some((family, given)) = rest.split_last()
    {
        return format!("{}, {}, {}", family, given.join(" "), last);
    }
    format!("{}, {}", last, rest.join(" "))
}
