// ============================================================================
// STATS - Datos agregados del dashboard admin (contadores y por mes)
// ============================================================================

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::models::crime::{CrimeReport, CrimeStatus};

/// Contadores por estado
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusBreakdown {
    pub pending: usize,
    pub investigating: usize,
    pub resolved: usize,
}

impl StatusBreakdown {
    pub fn from_reports(reports: &[CrimeReport]) -> Self {
        reports.iter().fold(Self::default(), |mut acc, report| {
            match report.status {
                CrimeStatus::Pending => acc.pending += 1,
                CrimeStatus::Investigating => acc.investigating += 1,
                CrimeStatus::Resolved => acc.resolved += 1,
            }
            acc
        })
    }

    pub fn count(&self, status: CrimeStatus) -> usize {
        match status {
            CrimeStatus::Pending => self.pending,
            CrimeStatus::Investigating => self.investigating,
            CrimeStatus::Resolved => self.resolved,
        }
    }

    pub fn total(&self) -> usize {
        self.pending + self.investigating + self.resolved
    }

    /// Solo los estados con datos, en el orden del ciclo
    pub fn non_empty(&self) -> Vec<(CrimeStatus, usize)> {
        CrimeStatus::ALL
            .into_iter()
            .map(|s| (s, self.count(s)))
            .filter(|(_, n)| *n > 0)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyCount {
    /// "Mar 2024"
    pub label: String,
    pub count: usize,
}

/// Reportes agrupados por mes de creación, en orden cronológico
pub fn monthly_counts(reports: &[CrimeReport]) -> Vec<MonthlyCount> {
    let mut buckets: BTreeMap<(i32, u32), (String, usize)> = BTreeMap::new();
    for report in reports {
        let date = report.created_at;
        let entry = buckets
            .entry((date.year(), date.month()))
            .or_insert_with(|| (date.format("%b %Y").to_string(), 0));
        entry.1 += 1;
    }
    buckets
        .into_values()
        .map(|(label, count)| MonthlyCount { label, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn report(id: &str, status: CrimeStatus, y: i32, m: u32) -> CrimeReport {
        CrimeReport {
            id: id.into(),
            title: "t".into(),
            description: "d".into(),
            location: "l".into(),
            status,
            created_at: Utc.with_ymd_and_hms(y, m, 10, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn breakdown_skips_empty_statuses() {
        let reports = vec![
            report("1", CrimeStatus::Pending, 2024, 1),
            report("2", CrimeStatus::Pending, 2024, 1),
            report("3", CrimeStatus::Resolved, 2024, 2),
        ];
        let breakdown = StatusBreakdown::from_reports(&reports);
        assert_eq!(breakdown.total(), 3);
        assert_eq!(
            breakdown.non_empty(),
            vec![(CrimeStatus::Pending, 2), (CrimeStatus::Resolved, 1)]
        );
    }

    #[test]
    fn months_are_chronological() {
        let reports = vec![
            report("1", CrimeStatus::Pending, 2024, 3),
            report("2", CrimeStatus::Pending, 2023, 12),
            report("3", CrimeStatus::Pending, 2024, 3),
        ];
        let months = monthly_counts(&reports);
        assert_eq!(
            months,
            vec![
                MonthlyCount { label: "Dec 2023".into(), count: 1 },
                MonthlyCount { label: "Mar 2024".into(), count: 2 },
            ]
        );
    }
}
