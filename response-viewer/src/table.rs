//! Readers for DRGen `CalcResults` CSV exports.
//!
//! An export has one row per calculation point. Listing needs the `energy`
//! and `point` columns; plotting needs `energy` and the 54 polynomial
//! coefficients `a00..a58` stored as six zones of nine coefficients, starting
//! at column `a00` and running contiguously.
//!
//! Energies in the table are in MeV.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use ndarray::Array2;
use response_math::compton::TABLE_ZONES;
use response_math::{Polynomial, ZoneLayout};
use thiserror::Error;

/// Coefficients per zone polynomial (degree 8)
pub const COEFFS_PER_ZONE: usize = 9;

/// Coefficients per table row
pub const COEFFICIENT_COUNT: usize = TABLE_ZONES * COEFFS_PER_ZONE;

pub const ENERGY_COLUMN: &str = "energy";
pub const POINT_COLUMN: &str = "point";
pub const FIRST_COEFFICIENT_COLUMN: &str = "a00";

/// Errors that can occur while reading a response table
#[derive(Error, Debug)]
pub enum TableError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed CSV in {table}: {source}")]
    Csv { table: String, source: csv::Error },
    #[error("there is no '{column}' column in file {table}")]
    MissingColumn { column: String, table: String },
    #[error("expected coefficient column '{expected}' at position {position} in {table}, found '{found}'")]
    CoefficientColumn {
        expected: String,
        found: String,
        position: usize,
        table: String,
    },
    #[error("row {row} has {found} fields, need at least {needed}")]
    ShortRow {
        row: usize,
        found: usize,
        needed: usize,
    },
    #[error("row {row}, column '{column}': cannot parse '{value}' as a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
    #[error("coefficient block has the wrong shape: {0}")]
    Shape(#[from] ndarray::ShapeError),
    #[error("point index {requested} is out of range, max index can be {max}")]
    IndexOutOfRange { requested: usize, max: usize },
}

/// One calculation point of a response table
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRow {
    /// Incident photon energy in MeV
    pub energy_mev: f64,
    /// Polynomial coefficients, shape (6, 9): row = zone, column = power
    pub coefficients: Array2<f64>,
}

impl ResponseRow {
    /// Incident photon energy in keV
    pub fn energy_kev(&self) -> f64 {
        self.energy_mev * 1000.0
    }

    /// Zone polynomials used by `layout`, in ascending energy order.
    ///
    /// The low-energy layout takes the trailing zones of the block.
    pub fn zone_polynomials(&self, layout: ZoneLayout) -> Vec<Polynomial> {
        self.coefficients
            .rows()
            .into_iter()
            .skip(layout.first_table_zone())
            .map(|zone| Polynomial::new(zone.to_vec()))
            .collect()
    }
}

/// Column name → index map of a table header.
///
/// When a name repeats, the last occurrence wins.
struct Header {
    table: String,
    columns: HashMap<String, usize>,
    names: Vec<String>,
}

impl Header {
    fn new(record: &StringRecord, table: &str) -> Self {
        let names: Vec<String> = record.iter().map(str::to_string).collect();
        let columns = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self {
            table: table.to_string(),
            columns,
            names,
        }
    }

    fn require(&self, column: &str) -> Result<usize, TableError> {
        self.columns
            .get(column)
            .copied()
            .ok_or_else(|| TableError::MissingColumn {
                column: column.to_string(),
                table: self.table.clone(),
            })
    }

    /// Index of `a00`, after checking the 54 columns from there on are
    /// named `a00..a08, a10..a18, ..., a50..a58` in order.
    fn coefficient_start(&self) -> Result<usize, TableError> {
        let start = self.require(FIRST_COEFFICIENT_COLUMN)?;
        for zone in 0..TABLE_ZONES {
            for power in 0..COEFFS_PER_ZONE {
                let position = start + zone * COEFFS_PER_ZONE + power;
                let expected = format!("a{zone}{power}");
                let found = self.names.get(position).map(String::as_str).unwrap_or("");
                if found != expected {
                    return Err(TableError::CoefficientColumn {
                        expected,
                        found: found.to_string(),
                        position,
                        table: self.table.clone(),
                    });
                }
            }
        }
        Ok(start)
    }
}

fn csv_error(table: &str) -> impl Fn(csv::Error) -> TableError + '_ {
    move |source| TableError::Csv {
        table: table.to_string(),
        source,
    }
}

fn open_table(path: &Path) -> Result<File, TableError> {
    File::open(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read the header, validate it with `check_header`, then hand every data
/// record with its 1-based row number to `visit`.
///
/// The header is checked before any data row, so a bad header fails even on
/// an empty table.
fn read_rows<R, T, H, F>(
    reader: R,
    table: &str,
    check_header: H,
    mut visit: F,
) -> Result<(), TableError>
where
    R: Read,
    H: FnOnce(&Header) -> Result<T, TableError>,
    F: FnMut(&Header, &T, usize, &StringRecord) -> Result<(), TableError>,
{
    let mut csv = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let header = Header::new(csv.headers().map_err(csv_error(table))?, table);
    let columns = check_header(&header)?;

    for (i, record) in csv.records().enumerate() {
        let record = record.map_err(csv_error(table))?;
        visit(&header, &columns, i + 1, &record)?;
    }
    Ok(())
}

fn parse_field(
    record: &StringRecord,
    index: usize,
    row: usize,
    column: &str,
) -> Result<f64, TableError> {
    let value = record.get(index).ok_or(TableError::ShortRow {
        row,
        found: record.len(),
        needed: index + 1,
    })?;
    value.parse().map_err(|_| TableError::InvalidNumber {
        row,
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Read the energy of every calculation point, in row order.
///
/// # Arguments
/// * `reader` - CSV source with a header row
/// * `table` - Name of the source, used in error messages
///
/// # Errors
/// `MissingColumn` if the header lacks `energy` or `point`, plus CSV framing
/// and number parsing failures.
pub fn energy_list_from_reader<R: Read>(reader: R, table: &str) -> Result<Vec<f64>, TableError> {
    let mut energies = Vec::new();

    read_rows(
        reader,
        table,
        require_listing_columns,
        |_, &energy_index, row, record| {
            energies.push(parse_field(record, energy_index, row, ENERGY_COLUMN)?);
            Ok(())
        },
    )?;

    debug!("Read {} energies from {table}", energies.len());
    Ok(energies)
}

fn require_listing_columns(header: &Header) -> Result<usize, TableError> {
    let energy = header.require(ENERGY_COLUMN)?;
    header.require(POINT_COLUMN)?;
    Ok(energy)
}

/// Read the energy list from a CSV file.
pub fn read_energy_list(path: &Path) -> Result<Vec<f64>, TableError> {
    let file = open_table(path)?;
    energy_list_from_reader(file, &path.display().to_string())
}

/// Read every row's energy and 6×9 coefficient block, in row order.
///
/// # Errors
/// `MissingColumn` if `energy` or `a00` is absent, `CoefficientColumn` if the
/// 54 columns from `a00` are not the expected run, `ShortRow` and
/// `InvalidNumber` for bad data rows.
pub fn coefficient_table_from_reader<R: Read>(
    reader: R,
    table: &str,
) -> Result<Vec<ResponseRow>, TableError> {
    let mut rows = Vec::new();

    read_rows(
        reader,
        table,
        coefficient_columns,
        |header, &(energy_index, start), row, record| {
            let energy_mev = parse_field(record, energy_index, row, ENERGY_COLUMN)?;
            let mut coeffs = Vec::with_capacity(COEFFICIENT_COUNT);
            for index in start..start + COEFFICIENT_COUNT {
                coeffs.push(parse_field(record, index, row, &header.names[index])?);
            }

            rows.push(ResponseRow {
                energy_mev,
                coefficients: Array2::from_shape_vec((TABLE_ZONES, COEFFS_PER_ZONE), coeffs)?,
            });
            Ok(())
        },
    )?;

    info!("Loaded {} response rows from {table}", rows.len());
    Ok(rows)
}

fn coefficient_columns(header: &Header) -> Result<(usize, usize), TableError> {
    Ok((header.require(ENERGY_COLUMN)?, header.coefficient_start()?))
}

/// Read the coefficient table from a CSV file.
pub fn read_coefficient_table(path: &Path) -> Result<Vec<ResponseRow>, TableError> {
    let file = open_table(path)?;
    coefficient_table_from_reader(file, &path.display().to_string())
}

/// Look up a calculation point by its 1-based index.
///
/// # Errors
/// `IndexOutOfRange` if `point` is 0 or past the last row; `max` reports the
/// highest valid index.
pub fn select_point(rows: &[ResponseRow], point: usize) -> Result<&ResponseRow, TableError> {
    let index = point_index(point, rows.len())?;
    Ok(&rows[index])
}

/// Convert a 1-based point into a row index for a table of `count` rows.
pub fn point_index(point: usize, count: usize) -> Result<usize, TableError> {
    point
        .checked_sub(1)
        .filter(|&index| index < count)
        .ok_or(TableError::IndexOutOfRange {
            requested: point,
            max: count,
        })
}

/// Count the calculation points of a table. Only `energy` is required.
pub fn point_count_from_reader<R: Read>(reader: R, table: &str) -> Result<usize, TableError> {
    let mut count = 0;
    read_rows(
        reader,
        table,
        |header| header.require(ENERGY_COLUMN),
        |_, _, _, _| {
            count += 1;
            Ok(())
        },
    )?;
    Ok(count)
}

/// Load a single calculation point from a CSV file.
///
/// The point is checked against the row count before the coefficient columns
/// are required, so a table without coefficients still reports
/// `IndexOutOfRange` for a point past its last row.
pub fn read_point(path: &Path, point: usize) -> Result<ResponseRow, TableError> {
    let table = path.display().to_string();
    let count = point_count_from_reader(open_table(path)?, &table)?;
    let index = point_index(point, count)?;

    let rows = coefficient_table_from_reader(open_table(path)?, &table)?;
    let max = rows.len();
    rows.into_iter()
        .nth(index)
        .ok_or(TableError::IndexOutOfRange {
            requested: point,
            max,
        })
}
