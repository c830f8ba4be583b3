// src/series.rs

use ndarray::Array1;
use std::collections::HashMap;
use std::ops::Range;
use tracing::debug;

use crate::constants::TIME_COLUMN;
use crate::error::{AnalysisError, Result};

/// Ordered table of named `f64` columns sharing one time base.
///
/// Every column has the same length. Row order is sample order and rows are
/// always densely indexed from 0; removing rows (see [`Series::clean`])
/// compacts the remaining ones. Slices and fragments are owned copies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    columns: Vec<(String, Array1<f64>)>,
    len: usize,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a series from `(name, values)` pairs, checking equal lengths.
    pub fn from_columns<S, V, I>(columns: I) -> Result<Self>
    where
        S: Into<String>,
        V: Into<Array1<f64>>,
        I: IntoIterator<Item = (S, V)>,
    {
        let mut series = Series::new();
        for (name, values) in columns {
            series.set_column(name, values.into())?;
        }
        Ok(series)
    }

    /// Row count.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|(n, _)| n == name)
    }

    pub fn column(&self, name: &str) -> Result<&Array1<f64>> {
        self.position(name)
            .map(|i| &self.columns[i].1)
            .ok_or_else(|| AnalysisError::MissingColumn(name.to_string()))
    }

    pub fn column_mut(&mut self, name: &str) -> Result<&mut Array1<f64>> {
        match self.position(name) {
            Some(i) => Ok(&mut self.columns[i].1),
            None => Err(AnalysisError::MissingColumn(name.to_string())),
        }
    }

    /// The distinguished time column `t`.
    pub fn time(&self) -> Result<&Array1<f64>> {
        self.column(TIME_COLUMN)
    }

    pub fn value(&self, name: &str, row: usize) -> Result<f64> {
        let column = self.column(name)?;
        column.get(row).copied().ok_or_else(|| AnalysisError::DataIntegrity {
            operation: "row lookup",
            rows: column.len(),
            required: row + 1,
        })
    }

    /// Assigns (or replaces) a column. The first column of an empty series
    /// fixes the row count.
    pub fn set_column(&mut self, name: impl Into<String>, values: Array1<f64>) -> Result<()> {
        let name = name.into();
        if self.columns.is_empty() {
            self.len = values.len();
        } else if values.len() != self.len {
            return Err(AnalysisError::LengthMismatch {
                column: name,
                expected: self.len,
                found: values.len(),
            });
        }
        match self.position(&name) {
            Some(i) => self.columns[i].1 = values,
            None => self.columns.push((name, values)),
        }
        Ok(())
    }

    pub fn remove_column(&mut self, name: &str) -> Result<Array1<f64>> {
        let i = self
            .position(name)
            .ok_or_else(|| AnalysisError::MissingColumn(name.to_string()))?;
        let (_, values) = self.columns.remove(i);
        if self.columns.is_empty() {
            self.len = 0;
        }
        Ok(values)
    }

    /// Applies `f` to every value of a column in place.
    pub fn map_column<F>(&mut self, name: &str, f: F) -> Result<()>
    where
        F: FnMut(f64) -> f64,
    {
        self.column_mut(name)?.mapv_inplace(f);
        Ok(())
    }

    /// Moves a column's values by `periods` rows. Positive periods move values
    /// towards later rows; vacated cells become NaN.
    pub fn shift(&mut self, name: &str, periods: isize) -> Result<()> {
        let len = self.len;
        let column = self.column_mut(name)?;
        let original = column.clone();
        for (i, value) in column.iter_mut().enumerate() {
            let source = i as isize - periods;
            *value = if source >= 0 && (source as usize) < len {
                original[source as usize]
            } else {
                f64::NAN
            };
        }
        Ok(())
    }

    /// Copies the half-open row range into a new series starting at row 0.
    pub fn slice(&self, rows: Range<usize>) -> Result<Series> {
        if rows.start > rows.end || rows.end > self.len {
            return Err(AnalysisError::InvalidParameter(format!(
                "row range {}..{} outside series of {} rows",
                rows.start, rows.end, self.len
            )));
        }
        Ok(self.take_rows(rows))
    }

    /// Copies the rows where `mask` is true, preserving order.
    pub fn select_rows(&self, mask: &[bool]) -> Result<Series> {
        if mask.len() != self.len {
            return Err(AnalysisError::LengthMismatch {
                column: "mask".to_string(),
                expected: self.len,
                found: mask.len(),
            });
        }
        Ok(self.take_rows(
            mask.iter()
                .enumerate()
                .filter_map(|(i, &keep)| keep.then_some(i)),
        ))
    }

    fn take_rows<I>(&self, rows: I) -> Series
    where
        I: IntoIterator<Item = usize>,
    {
        let rows: Vec<usize> = rows.into_iter().collect();
        let columns = self
            .columns
            .iter()
            .map(|(name, values)| {
                (
                    name.clone(),
                    rows.iter().map(|&r| values[r]).collect::<Array1<f64>>(),
                )
            })
            .collect();
        Series {
            columns,
            len: rows.len(),
        }
    }

    /// Drops every row holding a NaN or infinite cell in any column, plus rows
    /// whose `t` does not strictly increase over the previously kept row.
    /// Remaining rows are compacted in order. Returns the number of rows dropped.
    pub fn clean(&mut self) -> usize {
        let time_position = self.position(TIME_COLUMN);
        let mut keep = Vec::with_capacity(self.len);
        let mut last_time = f64::NEG_INFINITY;

        for row in 0..self.len {
            let finite = self.columns.iter().all(|(_, values)| values[row].is_finite());
            let increasing = match time_position {
                Some(p) => self.columns[p].1[row] > last_time,
                None => true,
            };
            let kept = finite && increasing;
            if kept {
                if let Some(p) = time_position {
                    last_time = self.columns[p].1[row];
                }
            }
            keep.push(kept);
        }

        let dropped = keep.iter().filter(|&&k| !k).count();
        if dropped > 0 {
            *self = self.take_rows(
                keep.iter()
                    .enumerate()
                    .filter_map(|(i, &k)| k.then_some(i)),
            );
            debug!("clean dropped {} rows, {} remain", dropped, self.len);
        }
        dropped
    }

    /// Rows whose `t` lies in `[start, end]`.
    pub fn filter_time_window(&self, start: f64, end: f64) -> Result<Series> {
        let mask: Vec<bool> = self.time()?.iter().map(|&t| t >= start && t <= end).collect();
        self.select_rows(&mask)
    }

    /// Inner join on identical `key` values. Left row order is kept and the
    /// first matching right row wins; the right key column is not duplicated.
    pub fn inner_join_on(&self, other: &Series, key: &str) -> Result<Series> {
        let left_key = self.column(key)?;
        let right_key = other.column(key)?;

        let mut right_rows: HashMap<u64, usize> = HashMap::with_capacity(right_key.len());
        for (row, value) in right_key.iter().enumerate() {
            right_rows.entry(value.to_bits()).or_insert(row);
        }

        let pairs: Vec<(usize, usize)> = left_key
            .iter()
            .enumerate()
            .filter_map(|(l, value)| right_rows.get(&value.to_bits()).map(|&r| (l, r)))
            .collect();

        let mut joined = self.take_rows(pairs.iter().map(|&(l, _)| l));
        for (name, values) in &other.columns {
            if name == key {
                continue;
            }
            let column: Array1<f64> = pairs.iter().map(|&(_, r)| values[r]).collect();
            joined.set_column(name.clone(), column)?;
        }
        Ok(joined)
    }
}
