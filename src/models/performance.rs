use {
    super::HistoryEntry,
    crate::{
        domain::{Language, Outcome},
        utils::local_year_month,
    },
    std::collections::BTreeMap,
    strum::IntoEnumIterator,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    pub wins: u32,
    pub losses: u32,
    pub break_evens: u32,
}

impl OutcomeTally {
    pub fn add(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Be => self.break_evens += 1,
            Outcome::Pending => {}
        }
    }

    /// Resolved setups only
    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.break_evens
    }

    /// Wins over all resolved setups, break-evens included. `None` when nothing
    /// is resolved yet.
    pub fn win_rate(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(f64::from(self.wins) / f64::from(total)),
        }
    }

    fn merge(&mut self, other: &OutcomeTally) {
        self.wins += other.wins;
        self.losses += other.losses;
        self.break_evens += other.break_evens;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyStats {
    pub year: i32,
    /// 1..=12
    pub month: u32,
    pub tally: OutcomeTally,
}

impl MonthlyStats {
    /// Sortable `YYYY-MM` key
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// `March 2026` / `mars 2026`
    pub fn display_name(&self, language: Language) -> String {
        match language.month_name(self.month) {
            Some(name) => format!("{} {}", name, self.year),
            None => self.label(),
        }
    }
}

/// Outcome statistics over the history ledger, grouped by local calendar month.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerformanceReport {
    /// Most recent month first. Months with nothing resolved are omitted.
    pub months: Vec<MonthlyStats>,
    pub global: OutcomeTally,
}

impl PerformanceReport {
    pub fn from_history(entries: &[HistoryEntry]) -> Self {
        let mut by_month: BTreeMap<(i32, u32), OutcomeTally> = BTreeMap::new();

        for entry in entries {
            let Some(month) = local_year_month(entry.timestamp) else {
                continue;
            };
            let mut tally = OutcomeTally::default();
            for slot in crate::domain::SetupSlot::iter() {
                tally.add(entry.data.setup(slot).user_result);
            }
            if tally.total() > 0 {
                by_month.entry(month).or_default().merge(&tally);
            }
        }

        let mut global = OutcomeTally::default();
        let months = by_month
            .into_iter()
            .rev()
            .map(|((year, month), tally)| {
                global.merge(&tally);
                MonthlyStats { year, month, tally }
            })
            .collect();

        Self { months, global }
    }

    pub fn is_empty(&self) -> bool {
        self.global.total() == 0
    }

    pub fn month(&self, year: i32, month: u32) -> Option<&MonthlyStats> {
        self.months
            .iter()
            .find(|stats| stats.year == year && stats.month == month)
    }
}
