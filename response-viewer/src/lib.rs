//! response-viewer - Inspect DRGen detector response tables
//!
//! Reads the `CalcResults` CSV export of a detector response calculation,
//! lists the calculation points it contains and rebuilds the Compton response
//! curve of a single point from its zone polynomials.
//!
//! - **table** - CSV readers for the energy list and coefficient blocks
//! - **response** - zone layout selection and curve reconstruction
//! - **listing** - text listing of available energies
//! - **render** - PNG chart and CSV sample export

pub mod listing;
pub mod render;
pub mod response;
pub mod table;

pub use listing::write_energy_listing;
pub use render::{
    chart_ranges, plot_response, write_samples_csv, write_samples_csv_file, ChartOptions,
    RenderError,
};
pub use response::{reconstruct, ResponseCurve, ResponseError};
pub use table::{
    coefficient_table_from_reader, energy_list_from_reader, point_count_from_reader, point_index,
    read_coefficient_table, read_energy_list, read_point, select_point, ResponseRow, TableError,
};
