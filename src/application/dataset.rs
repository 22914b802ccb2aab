// Dataset - Read-only record table and the chart aggregations over it
use crate::application::dataset_source::DatasetSource;
use crate::domain::consultation::{ConsultationLabel, WITHOUT_COST_MARKER, WITH_COST_MARKER};
use crate::domain::filters::{ALL_PHYSICIANS, AttentionRange, CategoryChoice, Column, FilterOptions};
use crate::domain::record::Record;
use crate::domain::report::{AttentionCount, CancellationRate, ConsultationGroups, LabelCount};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    attention_counts: Vec<AttentionCount>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        let attention_counts = count_by_given_by(records.iter());
        Self {
            records,
            attention_counts,
        }
    }

    pub async fn load(source: &dyn DatasetSource) -> anyhow::Result<Self> {
        let records = source.load_records().await?;
        let undated = records.iter().filter(|r| r.month.is_none()).count();
        tracing::info!(
            rows = records.len(),
            undated,
            "Loaded call records"
        );
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Attentions per `given_by`, ascending by count.
    ///
    /// Without a month the counts computed at load are re-filtered; with a
    /// month they are recounted over the records of that month only.
    pub fn compute_attention_counts(
        &self,
        selected_name: Option<&str>,
        selected_range: Option<AttentionRange>,
        selected_month: Option<&str>,
    ) -> Vec<AttentionCount> {
        let counts = match selected_month {
            Some(month) => count_by_given_by(self.records.iter().filter(|r| r.in_month(month))),
            None => self.attention_counts.clone(),
        };

        counts
            .into_iter()
            .filter(|c| selected_name.is_none_or(|name| c.given_by == name))
            .filter(|c| selected_range.is_none_or(|range| range.contains(c.count)))
            .collect()
    }

    /// Mean of `is_cancelled` per physician, ascending by mean.
    /// Records without a physician are left out of the grouping.
    pub fn compute_cancellation_rates(
        &self,
        selected_physician: Option<&str>,
        selected_given_by: Option<&str>,
        selected_month: Option<&str>,
    ) -> Vec<CancellationRate> {
        let physician_filter = selected_physician.filter(|p| *p != ALL_PHYSICIANS);

        let mut groups: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
        for record in &self.records {
            let Some(physician) = record.physician.as_deref() else {
                continue;
            };
            if physician_filter.is_some_and(|p| p != physician) {
                continue;
            }
            if selected_given_by.is_some_and(|g| g != record.given_by) {
                continue;
            }
            if selected_month.is_some_and(|m| !record.in_month(m)) {
                continue;
            }
            let entry = groups.entry(physician).or_insert((0, 0));
            entry.0 += u64::from(record.is_cancelled);
            entry.1 += 1;
        }

        let mut rates: Vec<CancellationRate> = groups
            .into_iter()
            .map(|(physician, (cancelled, total))| {
                CancellationRate::new(physician.to_string(), cancelled as f64 / total as f64)
            })
            .collect();
        rates.sort_by(|a, b| a.mean_is_cancelled.total_cmp(&b.mean_is_cancelled));
        rates
    }

    /// Finished attentions per derived consultation label, split into the
    /// with-cost and without-cost series over one shared label axis.
    pub fn compute_consultation_groups(
        &self,
        selected_category: Option<CategoryChoice>,
        selected_month: Option<&str>,
    ) -> ConsultationGroups {
        let allowed = selected_category.and_then(|c| c.allowed_labels());

        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for record in self.records.iter().filter(|r| r.is_finished()) {
            if selected_month.is_some_and(|m| !record.in_month(m)) {
                continue;
            }
            let label = ConsultationLabel::classify(&record.consultation_type).to_string();
            if allowed.as_ref().is_some_and(|labels| !labels.contains(&label)) {
                continue;
            }
            *counts.entry(label).or_insert(0) += 1;
        }

        let series = |marker: &str| -> Vec<LabelCount> {
            counts
                .iter()
                .map(|(label, count)| {
                    let value = if label.contains(marker) { *count } else { 0 };
                    LabelCount::new(label.clone(), value)
                })
                .collect()
        };

        ConsultationGroups {
            with_cost: series(WITH_COST_MARKER),
            without_cost: series(WITHOUT_COST_MARKER),
            labels: counts.keys().cloned().collect(),
        }
    }

    /// Distinct non-empty values of a column over the whole dataset.
    /// Months come back in calendar order, everything else sorted.
    pub fn distinct_values(&self, column: Column) -> Vec<String> {
        if column == Column::Month {
            let months: BTreeSet<u32> = self
                .records
                .iter()
                .filter_map(|r| r.month)
                .map(|m| m.number_from_month())
                .collect();
            return months
                .into_iter()
                .filter_map(|n| chrono::Month::try_from(n as u8).ok())
                .map(|m| m.name().to_string())
                .collect();
        }

        let values: BTreeSet<&str> = self
            .records
            .iter()
            .filter_map(|r| match column {
                Column::GivenBy => Some(r.given_by.as_str()),
                Column::Physician => r.physician.as_deref(),
                Column::ConsultationType => Some(r.consultation_type.as_str()),
                Column::Status => Some(r.status.as_str()),
                Column::Month => None,
            })
            .filter(|v| !v.is_empty())
            .collect();
        values.into_iter().map(str::to_string).collect()
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::new(
            self.distinct_values(Column::GivenBy),
            self.distinct_values(Column::Physician),
            self.distinct_values(Column::Month),
            self.distinct_values(Column::ConsultationType),
        )
    }
}

/// Count per `given_by`, ascending by count, ties by name.
fn count_by_given_by<'a>(records: impl Iterator<Item = &'a Record>) -> Vec<AttentionCount> {
    let mut groups: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        *groups.entry(record.given_by.as_str()).or_insert(0) += 1;
    }
    let mut counts: Vec<AttentionCount> = groups
        .into_iter()
        .map(|(name, count)| AttentionCount::new(name.to_string(), count))
        .collect();
    counts.sort_by_key(|c| c.count);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    fn rec(given_by: &str, physician: Option<&str>, date: &str, status: &str, kind: &str) -> Record {
        Record::new(
            given_by.to_string(),
            physician.map(str::to_string),
            date.to_string(),
            status.to_string(),
            kind.to_string(),
        )
    }

    fn sample() -> Dataset {
        Dataset::new(vec![
            rec("A", Some("Dr. Soto"), "02-01-2024", "anulada", "Consulta con Costo"),
            rec("A", Some("Dr. Soto"), "03-01-2024", "finalizada", "Consulta con Costo extra"),
            rec("A", Some("Dr. Rojas"), "04-02-2024", "finalizada", "Control sin costo"),
            rec("B", Some("Dr. Rojas"), "05-02-2024", "anulada", "Consulta sin costo"),
            rec("B", None, "fecha mala", "finalizada", "Procedimiento"),
        ])
    }

    #[test]
    fn test_attention_counts_sorted_ascending() {
        let counts = sample().compute_attention_counts(None, None, None);
        assert_eq!(
            counts,
            vec![
                AttentionCount::new("B".to_string(), 2),
                AttentionCount::new("A".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_attention_counts_sum_to_dataset_len() {
        let dataset = sample();
        let total: u64 = dataset
            .compute_attention_counts(None, None, None)
            .iter()
            .map(|c| c.count)
            .sum();
        assert_eq!(total as usize, dataset.len());
    }

    #[test]
    fn test_attention_range_filter() {
        let mut records = Vec::new();
        for (name, n) in [("A", 5), ("B", 4000), ("C", 4001)] {
            for _ in 0..n {
                records.push(rec(name, None, "01-01-2024", "finalizada", ""));
            }
        }
        let dataset = Dataset::new(records);

        let low = dataset.compute_attention_counts(None, Some(AttentionRange::UpTo4000), None);
        let names: Vec<&str> = low.iter().map(|c| c.given_by.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);

        let mid = dataset.compute_attention_counts(None, Some(AttentionRange::From4001To8000), None);
        assert_eq!(mid, vec![AttentionCount::new("C".to_string(), 4001)]);

        for count in dataset.compute_attention_counts(None, None, None) {
            let buckets = AttentionRange::ALL.iter().filter(|r| r.contains(count.count)).count();
            assert_eq!(buckets, 1);
        }
    }

    #[test]
    fn test_attention_name_and_month_filters() {
        let dataset = sample();
        assert!(
            dataset
                .compute_attention_counts(Some("A"), Some(AttentionRange::Above8000), None)
                .is_empty()
        );
        assert_eq!(
            dataset.compute_attention_counts(Some("A"), None, Some("January")),
            vec![AttentionCount::new("A".to_string(), 2)]
        );
        assert_eq!(
            dataset.compute_attention_counts(None, None, Some("February")),
            vec![
                AttentionCount::new("A".to_string(), 1),
                AttentionCount::new("B".to_string(), 1),
            ]
        );
        assert!(dataset.compute_attention_counts(Some("Nadie"), None, None).is_empty());
    }

    #[test]
    fn test_cancellation_rates() {
        let rates = sample().compute_cancellation_rates(None, None, None);
        assert_eq!(
            rates,
            vec![
                CancellationRate::new("Dr. Rojas".to_string(), 0.5),
                CancellationRate::new("Dr. Soto".to_string(), 0.5),
            ]
        );
        assert!(rates.iter().all(|r| (0.0..=1.0).contains(&r.mean_is_cancelled)));
    }

    #[test]
    fn test_cancellation_rates_filters() {
        let dataset = sample();
        let by_given = dataset.compute_cancellation_rates(Some(ALL_PHYSICIANS), Some("A"), None);
        assert_eq!(
            by_given,
            vec![
                CancellationRate::new("Dr. Rojas".to_string(), 0.0),
                CancellationRate::new("Dr. Soto".to_string(), 0.5),
            ]
        );

        let soto_feb = dataset.compute_cancellation_rates(Some("Dr. Soto"), None, Some("February"));
        assert!(soto_feb.is_empty());

        let rojas = dataset.compute_cancellation_rates(Some("Dr. Rojas"), Some("B"), None);
        assert_eq!(rojas, vec![CancellationRate::new("Dr. Rojas".to_string(), 1.0)]);
    }

    #[test]
    fn test_consultation_groups_are_aligned() {
        let groups = sample().compute_consultation_groups(None, None);
        assert_eq!(
            groups.labels,
            vec!["Consulta con Costo", "Control sin costo", "Otros con Costo"]
        );
        let with_cost: Vec<u64> = groups.with_cost.iter().map(|c| c.count).collect();
        let without_cost: Vec<u64> = groups.without_cost.iter().map(|c| c.count).collect();
        assert_eq!(with_cost, vec![1, 0, 1]);
        assert_eq!(without_cost, vec![0, 1, 0]);
        assert_eq!(groups.with_cost[0].label, "Consulta con Costo");
        assert_eq!(groups.without_cost[1].label, "Control sin costo");
    }

    #[test]
    fn test_consultation_with_cost_scenario() {
        let dataset = Dataset::new(vec![rec(
            "A",
            None,
            "01-03-2024",
            "finalizada",
            "Consulta con Costo extra",
        )]);
        let groups = dataset.compute_consultation_groups(None, None);
        assert_eq!(groups.labels, vec!["Consulta con Costo"]);
        assert_eq!(groups.with_cost, vec![LabelCount::new("Consulta con Costo".to_string(), 1)]);
        assert_eq!(groups.without_cost, vec![LabelCount::new("Consulta con Costo".to_string(), 0)]);
    }

    #[test]
    fn test_consultation_category_and_month_filters() {
        let dataset = sample();
        let control = dataset.compute_consultation_groups(Some(CategoryChoice::Control), None);
        assert_eq!(control.labels, vec!["Control sin costo"]);

        let all = dataset.compute_consultation_groups(Some(CategoryChoice::Todas), None);
        assert_eq!(all, dataset.compute_consultation_groups(None, None));

        let january = dataset.compute_consultation_groups(None, Some("January"));
        assert_eq!(january.labels, vec!["Consulta con Costo"]);
    }

    #[test]
    fn test_absent_month_empties_every_chart() {
        let dataset = sample();
        assert!(dataset.compute_attention_counts(None, None, Some("December")).is_empty());
        assert!(dataset.compute_cancellation_rates(None, None, Some("December")).is_empty());
        assert!(dataset.compute_consultation_groups(None, Some("December")).is_empty());
        assert!(dataset.compute_attention_counts(None, None, Some("Smarch")).is_empty());
    }

    #[test]
    fn test_aggregations_are_idempotent() {
        let dataset = sample();
        assert_eq!(
            dataset.compute_attention_counts(Some("A"), None, None),
            dataset.compute_attention_counts(Some("A"), None, None)
        );
        assert_eq!(
            dataset.compute_cancellation_rates(None, Some("B"), Some("February")),
            dataset.compute_cancellation_rates(None, Some("B"), Some("February"))
        );
        assert_eq!(
            dataset.compute_consultation_groups(Some(CategoryChoice::Consulta), None),
            dataset.compute_consultation_groups(Some(CategoryChoice::Consulta), None)
        );
    }

    #[test]
    fn test_distinct_values() {
        let dataset = sample();
        assert_eq!(dataset.distinct_values(Column::GivenBy), vec!["A", "B"]);
        assert_eq!(dataset.distinct_values(Column::Physician), vec!["Dr. Rojas", "Dr. Soto"]);
        assert_eq!(dataset.distinct_values(Column::Month), vec!["January", "February"]);
        assert_eq!(dataset.distinct_values(Column::Status), vec!["anulada", "finalizada"]);

        // Options never shrink with filters
        let options = dataset.filter_options();
        assert_eq!(options.physicians, vec!["Todos", "Dr. Rojas", "Dr. Soto"]);
        assert_eq!(options.consultation_types.len(), 5);
    }

    struct FixedSource(Vec<Record>);

    #[async_trait]
    impl DatasetSource for FixedSource {
        async fn load_records(&self) -> anyhow::Result<Vec<Record>> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_load_from_source() {
        let source = FixedSource(sample().records().to_vec());
        let dataset = Dataset::load(&source).await.unwrap();
        assert_eq!(dataset.len(), 5);
        assert!(!dataset.is_empty());
    }
}
