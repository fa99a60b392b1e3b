//! Roman numeral rendering for division tiers.

const NUMERALS: [(u64, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Render `n` in subtractive notation. 0 renders as an empty string and
/// values past 3999 repeat `M`.
pub fn romanize(mut n: u64) -> String {
    let mut out = String::new();
    for &(value, symbol) in NUMERALS.iter() {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    out
}
