//! Class-distribution summary of an assembled dataset

use crate::table::{Column, Dataset, SortOrder, ValueCounts};
use iegm_core::Partition;
use std::fmt;
use std::path::PathBuf;

/// Value counts over the Mode, Class and Label columns
#[derive(Debug, Clone)]
pub struct DatasetReport {
    pub total: usize,
    /// Rows per partition, most frequent first
    pub mode_counts: ValueCounts,
    /// Coarse classes within each partition
    pub class_counts: Vec<(Partition, ValueCounts)>,
    /// Fine labels within each partition
    pub label_counts: Vec<(Partition, ValueCounts)>,
    /// Fine labels within each coarse class
    pub class_label_counts: Vec<(u8, ValueCounts)>,
    /// Recordings listed in a manifest but absent on disk
    pub missing: Vec<PathBuf>,
}

impl DatasetReport {
    pub fn new(dataset: &Dataset, missing: &[PathBuf]) -> Self {
        let per_mode = |column: Column| -> Vec<(Partition, ValueCounts)> {
            [Partition::Train, Partition::Test]
                .into_iter()
                .map(|mode| {
                    let counts = ValueCounts::count(dataset.where_mode(mode), column, SortOrder::Ascending);
                    (mode, counts)
                })
                .collect()
        };

        let class_label_counts = dataset
            .classes()
            .into_iter()
            .map(|class| {
                let counts = ValueCounts::count(dataset.where_class(class), Column::Label, SortOrder::Ascending);
                (class, counts)
            })
            .collect();

        DatasetReport {
            total: dataset.len(),
            mode_counts: dataset.value_counts(Column::Mode, SortOrder::Descending),
            class_counts: per_mode(Column::Class),
            label_counts: per_mode(Column::Label),
            class_label_counts,
            missing: missing.to_vec(),
        }
    }

    /// Rows in one partition
    pub fn partition_total(&self, partition: Partition) -> usize {
        self.mode_counts.get(partition.as_str())
    }
}

impl fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Recordings: {}", self.total)?;
        writeln!(f)?;
        writeln!(f, "{}", self.mode_counts)?;

        for (mode, counts) in &self.class_counts {
            writeln!(f)?;
            writeln!(f, "[{}] classes", mode)?;
            writeln!(f, "{}", counts)?;
        }

        for (mode, counts) in &self.label_counts {
            writeln!(f)?;
            writeln!(f, "[{}] labels", mode)?;
            writeln!(f, "{}", counts)?;
        }

        for (class, counts) in &self.class_label_counts {
            writeln!(f)?;
            writeln!(f, "[class {}] labels", class)?;
            writeln!(f, "{}", counts)?;
        }

        if !self.missing.is_empty() {
            writeln!(f)?;
            writeln!(f, "Missing recordings: {}", self.missing.len())?;
            for path in &self.missing {
                writeln!(f, "  {}", path.display())?;
            }
        }
        Ok(())
    }
}
