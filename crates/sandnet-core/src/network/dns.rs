//! DNS list splitting and order-preserving merge.

use sandnet_common::constants::DNS_LIST_SEPARATOR;

use super::Adapter;

/// Splits a comma-separated list into its entries.
///
/// Empty segments are dropped, so `""` yields no entries. Entries are not
/// trimmed or case-folded.
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(DNS_LIST_SEPARATOR)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Appends each entry of `incoming` to `merged` unless already present.
///
/// The first occurrence keeps its position; later duplicates are dropped.
pub fn merge_values<I>(merged: &mut Vec<String>, incoming: I)
where
    I: IntoIterator<Item = String>,
{
    for value in incoming {
        if !merged.contains(&value) {
            merged.push(value);
        }
    }
}

/// Search domains and servers merged across every adapter of a namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedDns {
    /// Ordered, duplicate-free search domains.
    pub searches: Vec<String>,
    /// Ordered, duplicate-free server addresses.
    pub servers: Vec<String>,
}

impl MergedDns {
    /// Merges the DNS fragments of `adapters` in iteration order.
    pub fn from_adapters<'a, I>(adapters: I) -> Self
    where
        I: IntoIterator<Item = &'a Adapter>,
    {
        let mut merged = Self::default();
        for adapter in adapters {
            merge_values(&mut merged.searches, adapter.search_domains());
            merge_values(&mut merged.servers, adapter.dns_servers());
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_empty_yields_nothing() {
        assert!(split_list("").is_empty());
    }

    #[test]
    fn split_drops_empty_segments() {
        assert_eq!(split_list("a,,b,"), vec!["a", "b"]);
    }

    #[test]
    fn split_keeps_whitespace_and_case() {
        assert_eq!(split_list(" A ,a"), vec![" A ", "a"]);
    }

    #[test]
    fn merge_keeps_first_occurrence() {
        let mut merged = vec!["b".to_string()];
        merge_values(&mut merged, ["a", "b", "c", "a"].map(String::from));
        assert_eq!(merged, vec!["b", "a", "c"]);
    }

    #[test]
    fn merge_across_adapters_is_ordered_and_deduplicated() {
        let adapters = [
            Adapter::new("n1", "a,b", "1.1.1.1,2.2.2.2"),
            Adapter::new("n2", "b,c", "2.2.2.2,3.3.3.3"),
        ];
        let merged = MergedDns::from_adapters(&adapters);
        assert_eq!(merged.searches, vec!["a", "b", "c"]);
        assert_eq!(merged.servers, vec!["1.1.1.1", "2.2.2.2", "3.3.3.3"]);
    }

    #[test]
    fn adapter_order_decides_position() {
        let adapters = [
            Adapter::new("n1", "c", "3.3.3.3"),
            Adapter::new("n2", "a,c", "1.1.1.1,3.3.3.3"),
        ];
        let merged = MergedDns::from_adapters(&adapters);
        assert_eq!(merged.searches, vec!["c", "a"]);
        assert_eq!(merged.servers, vec!["3.3.3.3", "1.1.1.1"]);
    }

    #[test]
    fn empty_suffix_contributes_nothing() {
        let adapters = [
            Adapter::new("n1", "", "1.1.1.1"),
            Adapter::new("n2", "corp.local", ""),
        ];
        let merged = MergedDns::from_adapters(&adapters);
        assert_eq!(merged.searches, vec!["corp.local"]);
        assert_eq!(merged.servers, vec!["1.1.1.1"]);
    }

    #[test]
    fn no_adapters_merge_to_empty() {
        let none: [Adapter; 0] = [];
        let merged = MergedDns::from_adapters(&none);
        assert_eq!(merged, MergedDns::default());
    }

    #[test]
    fn duplicates_within_one_adapter_collapse() {
        let adapters = [Adapter::new("n1", "a,a,b", "1.1.1.1,1.1.1.1")];
        let merged = MergedDns::from_adapters(&adapters);
        assert_eq!(merged.searches, vec!["a", "b"]);
        assert_eq!(merged.servers, vec!["1.1.1.1"]);
    }
}
