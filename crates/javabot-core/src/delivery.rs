//! Result delivery strategy.
//!
//! Small result sets are answered inline in the channel. Larger ones produce
//! a short public notice plus the full list in private messages.

use crate::{catalog::ApiEntry, resolver::MatchResult};

/// Largest result set answered inline by default.
pub const DEFAULT_INLINE_LIMIT: usize = 6;

/// Default upper bound for one outbound message, in bytes.
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 400;

/// Separator between rendered entries.
pub const ENTRY_SEPARATOR: &str = "; ";

/// Notice sent to the channel when results go to private messages.
pub fn overflow_notice(requester: &str) -> String {
    format!("{requester}, too many results found.  Please see your private messages for results")
}

/// Decides between inline and private overflow delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryStrategy {
    inline_limit: usize,
    max_message_len: usize,
}

impl Default for DeliveryStrategy {
    fn default() -> Self {
        Self {
            inline_limit: DEFAULT_INLINE_LIMIT,
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
        }
    }
}

impl DeliveryStrategy {
    pub fn new(inline_limit: usize) -> Self {
        Self {
            inline_limit,
            ..Self::default()
        }
    }

    pub fn with_max_message_len(mut self, max_message_len: usize) -> Self {
        self.max_message_len = max_message_len;
        self
    }

    pub fn inline_limit(&self) -> usize {
        self.inline_limit
    }

    pub fn max_message_len(&self) -> usize {
        self.max_message_len
    }

    /// Plans delivery of `matches` to `requester`.
    ///
    /// Returns `None` for an empty result; the caller reports "not found".
    pub fn plan<'a>(&self, matches: &MatchResult<'a>, requester: &str) -> Option<DeliveryPlan<'a>> {
        if matches.is_empty() {
            return None;
        }
        let entries = matches.entries().to_vec();
        let plan = if entries.len() <= self.inline_limit {
            DeliveryPlan {
                requester: requester.to_string(),
                inline_entries: entries,
                overflow_entries: Vec::new(),
                notice: None,
                max_message_len: self.max_message_len,
            }
        } else {
            DeliveryPlan {
                requester: requester.to_string(),
                inline_entries: Vec::new(),
                overflow_entries: entries,
                notice: Some(overflow_notice(requester)),
                max_message_len: self.max_message_len,
            }
        };
        Some(plan)
    }
}

/// Either an inline answer or a notice plus private payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryPlan<'a> {
    requester: String,
    inline_entries: Vec<&'a ApiEntry>,
    overflow_entries: Vec<&'a ApiEntry>,
    notice: Option<String>,
    max_message_len: usize,
}

impl<'a> DeliveryPlan<'a> {
    pub fn requester(&self) -> &str {
        &self.requester
    }

    pub fn inline_entries(&self) -> &[&'a ApiEntry] {
        &self.inline_entries
    }

    pub fn overflow_entries(&self) -> &[&'a ApiEntry] {
        &self.overflow_entries
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_overflow(&self) -> bool {
        self.notice.is_some()
    }

    /// `"<nick>: e1; e2"`, or `None` for an overflow plan.
    pub fn inline_reply(&self) -> Option<String> {
        if self.inline_entries.is_empty() {
            return None;
        }
        let body = join_entries(&self.inline_entries);
        Some(format!("{}: {}", self.requester, body))
    }

    /// Private payload chunks, in order. Empty for an inline plan.
    pub fn overflow_messages(&self) -> Vec<String> {
        chunk_entries(&self.overflow_entries, self.max_message_len)
    }
}

fn join_entries(entries: &[&ApiEntry]) -> String {
    entries
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(ENTRY_SEPARATOR)
}

/// Packs rendered entries into messages of at most `max_len` bytes.
///
/// An entry is never split; one longer than `max_len` gets a message of its
/// own.
fn chunk_entries(entries: &[&ApiEntry], max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for entry in entries {
        let rendered = entry.to_string();
        if current.is_empty() {
            current = rendered;
        } else if current.len() + ENTRY_SEPARATOR.len() + rendered.len() <= max_len {
            current.push_str(ENTRY_SEPARATOR);
            current.push_str(&rendered);
        } else {
            chunks.push(std::mem::replace(&mut current, rendered));
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{ApiCatalog, ApiIndex, TypeLookup},
        test_support::sample_catalog,
    };

    fn overloads<'a>(catalog: &'a ApiCatalog, ty: &str, method: &str) -> MatchResult<'a> {
        let TypeLookup::Found(ty) = catalog.lookup_type(&[ty.to_string()]) else {
            panic!("{ty} missing from sample catalog");
        };
        MatchResult::from_entries(catalog.lookup_overloads(ty, method))
    }

    #[test]
    fn test_small_result_is_inline() {
        let catalog = sample_catalog();
        let matches = overloads(&catalog, "String", "split");
        let plan = DeliveryStrategy::default().plan(&matches, "alice").unwrap();

        assert!(!plan.is_overflow());
        assert!(plan.overflow_messages().is_empty());
        assert_eq!(
            plan.inline_reply().unwrap(),
            "alice: http://is.gd/2ABgG [JDK: java.lang.String.split(String)]; \
             http://is.gd/2ABgH [JDK: java.lang.String.split(String,int)]"
        );
    }

    #[test]
    fn test_seven_overloads_overflow_by_default() {
        let catalog = sample_catalog();
        let matches = overloads(&catalog, "Cipher", "doFinal");
        let plan = DeliveryStrategy::default().plan(&matches, "alice").unwrap();

        assert!(plan.inline_reply().is_none());
        assert_eq!(
            plan.notice().unwrap(),
            "alice, too many results found.  Please see your private messages for results"
        );
        let joined = plan.overflow_messages().join(ENTRY_SEPARATOR);
        let entries: Vec<_> = joined.split(ENTRY_SEPARATOR).collect();
        assert_eq!(entries.len(), 7);
        assert_eq!(entries[0], "http://is.gd/igel [JDK: javax.crypto.Cipher.doFinal()]");
        assert_eq!(
            entries[6],
            "http://is.gd/igee [JDK: javax.crypto.Cipher.doFinal(byte[],int,int,byte[],int)]"
        );
    }

    #[test]
    fn test_limit_is_configurable() {
        let catalog = sample_catalog();
        let matches = overloads(&catalog, "Cipher", "doFinal");

        let plan = DeliveryStrategy::new(7).plan(&matches, "bob").unwrap();
        assert_eq!(plan.inline_entries().len(), 7);

        let plan = DeliveryStrategy::new(1)
            .plan(&overloads(&catalog, "String", "split"), "bob")
            .unwrap();
        assert!(plan.is_overflow());
    }

    #[test]
    fn test_chunks_respect_length_and_never_split_entries() {
        let catalog = sample_catalog();
        let matches = overloads(&catalog, "Cipher", "doFinal");
        let plan = DeliveryStrategy::default()
            .with_max_message_len(120)
            .plan(&matches, "alice")
            .unwrap();

        let chunks = plan.overflow_messages();
        assert!(chunks.len() > 1);
        let mut rebuilt = Vec::new();
        for chunk in &chunks {
            let parts: Vec<_> = chunk.split(ENTRY_SEPARATOR).collect();
            assert!(chunk.len() <= 120 || parts.len() == 1, "oversized chunk: {chunk}");
            rebuilt.extend(parts.into_iter().map(str::to_string));
        }
        let expected: Vec<_> = matches.iter().map(ToString::to_string).collect();
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn test_oversized_entry_is_sent_alone() {
        let catalog = sample_catalog();
        let matches = overloads(&catalog, "Cipher", "doFinal");
        let plan = DeliveryStrategy::new(0)
            .with_max_message_len(10)
            .plan(&matches, "alice")
            .unwrap();
        assert_eq!(plan.overflow_messages().len(), 7);
    }

    #[test]
    fn test_empty_matches_have_no_plan() {
        assert!(DeliveryStrategy::default()
            .plan(&MatchResult::default(), "alice")
            .is_none());
    }

    #[test]
    fn test_plans_are_deterministic() {
        let catalog = sample_catalog();
        let matches = overloads(&catalog, "Cipher", "doFinal");
        let strategy = DeliveryStrategy::default();
        let first = strategy.plan(&matches, "alice").unwrap();
        let second = strategy.plan(&matches, "alice").unwrap();
        assert_eq!(first.overflow_messages(), second.overflow_messages());
        assert_eq!(first, second);
    }
}
