use std::collections::HashMap;

/// Running counters for one domain. Both only ever increment; they
/// accumulate from process start until process end.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DomainStats {
    pub total: u64,
    pub available: u64,
}

impl DomainStats {
    /// Availability as a percentage of all probes, 0 when nothing has
    /// been recorded yet.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.available as f64 / self.total as f64 * 100.0
    }
}

/// Per-domain availability counters, keyed by hostname.
///
/// Owned by the monitor loop; records are created lazily on first sight
/// and never removed. Reports iterate domains in first-seen order so the
/// same probe history always produces the same output.
#[derive(Debug, Default)]
pub struct StatsTracker {
    domains: HashMap<String, DomainStats>,
    order: Vec<String>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one probe outcome into the domain's counters.
    pub fn record(&mut self, domain: &str, available: bool) {
        if !self.domains.contains_key(domain) {
            self.order.push(domain.to_owned());
        }
        let stats = self.domains.entry(domain.to_owned()).or_default();
        stats.total += 1;
        if available {
            stats.available += 1;
        }
    }

    /// All domains seen so far, in first-seen order.
    pub fn report(&self) -> impl Iterator<Item = (&str, DomainStats)> {
        self.order
            .iter()
            .map(|domain| (domain.as_str(), self.domains[domain]))
    }

    #[cfg(test)]
    fn get(&self, domain: &str) -> Option<DomainStats> {
        self.domains.get(domain).copied()
    }
}
