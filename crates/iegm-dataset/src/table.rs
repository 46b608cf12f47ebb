//! Assembled dataset table and value counts

use iegm_core::{IegmSegment, Partition, RecordingName, RhythmLabel};
use std::collections::BTreeMap;
use std::fmt;

/// One recording with its metadata
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRow {
    pub file_name: String,
    pub patient_id: String,
    pub data: IegmSegment,
    pub mode: Partition,
    pub class: u8,
    pub label: RhythmLabel,
}

impl DatasetRow {
    pub fn new(name: RecordingName, data: IegmSegment, mode: Partition, class: u8) -> Self {
        DatasetRow {
            file_name: name.file_name,
            patient_id: name.patient_id,
            data,
            mode,
            class,
            label: name.label,
        }
    }

    /// Value of a categorical column, as used for counting
    pub fn value(&self, column: Column) -> String {
        match column {
            Column::FileName => self.file_name.clone(),
            Column::PatientId => self.patient_id.clone(),
            Column::Mode => self.mode.to_string(),
            Column::Class => self.class.to_string(),
            Column::Label => self.label.to_string(),
        }
    }
}

/// Categorical columns of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    FileName,
    PatientId,
    Mode,
    Class,
    Label,
}

impl Column {
    pub fn name(&self) -> &'static str {
        match self {
            Column::FileName => "File Name",
            Column::PatientId => "Patient ID",
            Column::Mode => "Mode",
            Column::Class => "Class",
            Column::Label => "Label",
        }
    }
}

/// Ordering of value counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Occurrences of each distinct value of one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCounts {
    pub column: Column,
    /// `(value, count)` sorted by count; ties by value
    pub counts: Vec<(String, usize)>,
}

impl ValueCounts {
    /// Count values of `column` over `rows`
    pub fn count<'a, I>(rows: I, column: Column, order: SortOrder) -> Self
    where
        I: IntoIterator<Item = &'a DatasetRow>,
    {
        let mut tally: BTreeMap<String, usize> = BTreeMap::new();
        for row in rows {
            *tally.entry(row.value(column)).or_insert(0) += 1;
        }

        let mut counts: Vec<(String, usize)> = tally.into_iter().collect();
        match order {
            SortOrder::Ascending => counts.sort_by_key(|&(_, count)| count),
            SortOrder::Descending => counts.sort_by_key(|&(_, count)| std::cmp::Reverse(count)),
        }

        ValueCounts { column, counts }
    }

    /// Count for one value (0 when absent)
    pub fn get(&self, value: &str) -> usize {
        self.counts
            .iter()
            .find(|(v, _)| v == value)
            .map(|&(_, count)| count)
            .unwrap_or(0)
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.counts.iter().map(|&(_, count)| count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl fmt::Display for ValueCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key_width = self.counts.iter().map(|(v, _)| v.len()).max().unwrap_or(0);
        let count_width = self.counts
            .iter()
            .map(|(_, c)| c.to_string().len())
            .max()
            .unwrap_or(0);

        for (value, count) in &self.counts {
            writeln!(f, "{:<key_width$}    {:>count_width$}", value, count)?;
        }
        write!(f, "Name: {}, dtype: int64", self.column.name())
    }
}

/// Read-only table of recordings
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<DatasetRow>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row
    pub fn push(&mut self, row: DatasetRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &DatasetRow> {
        self.rows.iter()
    }

    /// Row for a file name (first match)
    pub fn get(&self, file_name: &str) -> Option<&DatasetRow> {
        self.rows.iter().find(|row| row.file_name == file_name)
    }

    pub fn where_mode(&self, mode: Partition) -> impl Iterator<Item = &DatasetRow> {
        self.rows.iter().filter(move |row| row.mode == mode)
    }

    pub fn where_class(&self, class: u8) -> impl Iterator<Item = &DatasetRow> {
        self.rows.iter().filter(move |row| row.class == class)
    }

    /// Value counts of a column over the whole table
    pub fn value_counts(&self, column: Column, order: SortOrder) -> ValueCounts {
        ValueCounts::count(&self.rows, column, order)
    }

    /// Distinct coarse classes, ascending
    pub fn classes(&self) -> Vec<u8> {
        let mut classes: Vec<u8> = self.rows.iter().map(|row| row.class).collect();
        classes.sort_unstable();
        classes.dedup();
        classes
    }

    /// First row of every fine label within `class`, in label order
    pub fn first_per_label(&self, class: u8) -> Vec<&DatasetRow> {
        let mut firsts: BTreeMap<&RhythmLabel, &DatasetRow> = BTreeMap::new();
        for row in self.where_class(class) {
            firsts.entry(&row.label).or_insert(row);
        }

        firsts.into_values().collect()
    }
}
