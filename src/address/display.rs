//! Display helpers for addresses and address lists.

use super::classifier::{classify, AddressClassification};

/// Appended to text cut by [`truncate_for_display`].
pub const ELLIPSIS: &str = "...";

/// Canonical display form: IPv6 lowercased, everything else unchanged.
///
/// Never fails and is idempotent.
pub fn format_for_display(address: &str) -> String {
    match classify(address) {
        AddressClassification::IPv6 => address.to_lowercase(),
        AddressClassification::IPv4 | AddressClassification::Invalid => address.to_string(),
    }
}

/// Cut `text` to `max_length` characters and append [`ELLIPSIS`] when it is
/// longer than that.
pub fn truncate_for_display(text: &str, max_length: usize) -> String {
    match text.char_indices().nth(max_length) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_for_display() {
        assert_eq!(format_for_display("192.168.1.1"), "192.168.1.1");
        assert_eq!(format_for_display("2001:DB8::ABCD"), "2001:db8::abcd");
        assert_eq!(format_for_display("Not-An-IP"), "Not-An-IP");
        assert_eq!(format_for_display(""), "");
    }

    #[test]
    fn test_format_is_idempotent() {
        for input in ["10.0.0.1", "FE80::1", "::", "Garbage", "  spaced ", "1.2.3.4.5", "ÄÖ::1"] {
            let once = format_for_display(input);
            assert_eq!(format_for_display(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn test_truncate_for_display() {
        let list = "192.168.1.100, 192.168.1.101, 10.0.0.50";
        assert_eq!(truncate_for_display(list, 25), format!("{}...", &list[..25]));
        assert_eq!(truncate_for_display(list, list.len()), list);
        assert_eq!(truncate_for_display("", 0), "");
        assert_eq!(truncate_for_display("ab", 0), "...");
        assert_eq!(truncate_for_display("ab", 5), "ab");
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate_for_display("çğışöü", 3), "çğı...");
    }
}
