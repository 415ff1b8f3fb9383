use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// SpectralIndex – one column of the observation table
// ---------------------------------------------------------------------------

/// Remote-sensing indices tracked for the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpectralIndex {
    Ndvi,
    Ndwi,
    Ndmi,
}

impl SpectralIndex {
    /// All indices in table column order.
    pub const ALL: [SpectralIndex; 3] = [SpectralIndex::Ndvi, SpectralIndex::Ndwi, SpectralIndex::Ndmi];

    /// Short column label, e.g. `"NDVI"`.
    pub fn label(self) -> &'static str {
        match self {
            SpectralIndex::Ndvi => "NDVI",
            SpectralIndex::Ndwi => "NDWI",
            SpectralIndex::Ndmi => "NDMI",
        }
    }

    pub fn long_name(self) -> &'static str {
        match self {
            SpectralIndex::Ndvi => "Normalized Difference Vegetation Index",
            SpectralIndex::Ndwi => "Normalized Difference Water Index",
            SpectralIndex::Ndmi => "Normalized Difference Moisture Index",
        }
    }

    /// Case-insensitive match against a column header.
    pub fn from_column(name: &str) -> Option<SpectralIndex> {
        Self::ALL
            .into_iter()
            .find(|idx| idx.label().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for SpectralIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Observation – one row of the table
// ---------------------------------------------------------------------------

/// Index values observed for a single year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub year: i32,
    pub ndvi: f64,
    pub ndwi: f64,
    pub ndmi: f64,
}

impl Observation {
    pub fn new(year: i32, ndvi: f64, ndwi: f64, ndmi: f64) -> Self {
        Self { year, ndvi, ndwi, ndmi }
    }

    pub fn value(&self, index: SpectralIndex) -> f64 {
        match index {
            SpectralIndex::Ndvi => self.ndvi,
            SpectralIndex::Ndwi => self.ndwi,
            SpectralIndex::Ndmi => self.ndmi,
        }
    }
}

// ---------------------------------------------------------------------------
// ObservationTable – the validated, immutable dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("observation table is empty")]
    Empty,
    #[error("year {year} appears more than once")]
    DuplicateYear { year: i32 },
    #[error("years are not ascending: {previous} is followed by {next}")]
    NotAscending { previous: i32, next: i32 },
    #[error("{index} value for {year} is not a finite number")]
    NonFinite { year: i32, index: SpectralIndex },
}

/// Annual observations keyed by year (unique, strictly ascending).
///
/// Rows are private so a constructed table always upholds its ordering
/// invariant; the app swaps whole tables rather than editing rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationTable {
    rows: Vec<Observation>,
}

impl ObservationTable {
    /// Validate and wrap a set of rows.
    pub fn new(rows: Vec<Observation>) -> Result<Self, DataError> {
        if rows.is_empty() {
            return Err(DataError::Empty);
        }
        for pair in rows.windows(2) {
            let (previous, next) = (pair[0].year, pair[1].year);
            if previous == next {
                return Err(DataError::DuplicateYear { year: next });
            }
            if previous > next {
                return Err(DataError::NotAscending { previous, next });
            }
        }
        for row in &rows {
            for index in SpectralIndex::ALL {
                if !row.value(index).is_finite() {
                    return Err(DataError::NonFinite { year: row.year, index });
                }
            }
        }
        Ok(Self { rows })
    }

    /// The monitored site's Sentinel-derived annual means.
    pub fn peatland_site() -> Self {
        Self {
            rows: vec![
                Observation::new(2018, 1.0, 0.711013, 0.3099),
                Observation::new(2021, 1.0, 0.626983, 0.3027745),
                Observation::new(2022, 0.665254, 0.614526, 0.295649),
                Observation::new(2023, 0.64197, 0.612952, 0.285479),
                Observation::new(2024, 0.702914, 0.499578, 0.269119),
            ],
        }
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    /// Number of observed years; never zero.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn years(&self) -> Vec<i32> {
        self.rows.iter().map(|r| r.year).collect()
    }

    /// One index column in year order.
    pub fn column(&self, index: SpectralIndex) -> Vec<f64> {
        self.rows.iter().map(|r| r.value(index)).collect()
    }

    pub fn first_year(&self) -> i32 {
        self.rows.first().map(|r| r.year).unwrap_or_default()
    }

    pub fn last_year(&self) -> i32 {
        self.rows.last().map(|r| r.year).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_table_is_valid_and_ordered() {
        let table = ObservationTable::peatland_site();
        assert_eq!(table.row_count(), 5);
        assert_eq!(table.years(), vec![2018, 2021, 2022, 2023, 2024]);
        // Re-validating the built-in rows must succeed.
        assert!(ObservationTable::new(table.rows().to_vec()).is_ok());
    }

    #[test]
    fn column_follows_year_order() {
        let table = ObservationTable::peatland_site();
        assert_eq!(
            table.column(SpectralIndex::Ndmi),
            vec![0.3099, 0.3027745, 0.295649, 0.285479, 0.269119]
        );
        assert_eq!(table.rows()[2].year, 2022);
        assert_eq!(table.rows()[2].ndvi, 0.665254);
        assert_eq!(table.first_year(), 2018);
        assert_eq!(table.last_year(), 2024);
    }

    #[test]
    fn rejects_duplicate_and_unordered_years() {
        let dup = vec![
            Observation::new(2020, 0.1, 0.2, 0.3),
            Observation::new(2020, 0.1, 0.2, 0.3),
        ];
        assert_eq!(
            ObservationTable::new(dup),
            Err(DataError::DuplicateYear { year: 2020 })
        );

        let unordered = vec![
            Observation::new(2021, 0.1, 0.2, 0.3),
            Observation::new(2019, 0.1, 0.2, 0.3),
        ];
        assert_eq!(
            ObservationTable::new(unordered),
            Err(DataError::NotAscending { previous: 2021, next: 2019 })
        );
    }

    #[test]
    fn rejects_empty_and_non_finite() {
        assert_eq!(ObservationTable::new(Vec::new()), Err(DataError::Empty));
        let bad = vec![Observation::new(2020, 0.1, f64::NAN, 0.3)];
        assert_eq!(
            ObservationTable::new(bad),
            Err(DataError::NonFinite { year: 2020, index: SpectralIndex::Ndwi })
        );
    }

    #[test]
    fn index_column_names_are_case_insensitive() {
        assert_eq!(SpectralIndex::from_column("ndvi"), Some(SpectralIndex::Ndvi));
        assert_eq!(SpectralIndex::from_column(" NDMI "), Some(SpectralIndex::Ndmi));
        assert_eq!(SpectralIndex::from_column("EVI"), None);
    }
}
