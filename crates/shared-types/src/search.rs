//! Ordering guard for search-as-you-type.
//!
//! Every lookup takes a ticket before it is sent. When the answer comes back
//! it is applied only if its ticket is still the newest one handed out, so a
//! slow response for "du" can never overwrite the results for "dupont".

/// Issued per request; compare with [`SearchSequencer::is_current`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket(u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchSequencer {
    latest: u64,
}

impl SearchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> SearchTicket {
        self.latest += 1;
        SearchTicket(self.latest)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Make every outstanding ticket stale, e.g. when the query is cleared.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

/// Minimum number of characters before a lookup is worth sending.
pub const MIN_SEARCH_CHARS: usize = 1;

/// Normalized search term, or `None` when nothing should be sent.
pub fn search_term(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (trimmed.chars().count() >= MIN_SEARCH_CHARS).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_latest_ticket_is_current() {
        let mut seq = SearchSequencer::new();
        let first = seq.issue();
        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn out_of_order_responses_are_discarded() {
        let mut seq = SearchSequencer::new();
        let slow = seq.issue();
        let fast = seq.issue();

        let mut applied = Vec::new();
        for (ticket, label) in [(fast, "dupont"), (slow, "du")] {
            if seq.is_current(ticket) {
                applied.push(label);
            }
        }
        assert_eq!(applied, vec!["dupont"]);
    }

    #[test]
    fn invalidate_makes_pending_tickets_stale() {
        let mut seq = SearchSequencer::new();
        let pending = seq.issue();
        seq.invalidate();
        assert!(!seq.is_current(pending));
    }

    #[test]
    fn search_term_trims_and_skips_blank() {
        assert_eq!(search_term("  Ana "), Some("Ana".to_string()));
        assert_eq!(search_term("   "), None);
    }
}
