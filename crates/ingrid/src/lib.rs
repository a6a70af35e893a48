pub mod accuracy;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod row;
pub mod session;
pub mod stepper;
pub mod store;

// Re-export commonly used types for easier testing
pub use accuracy::Accuracy;
pub use config::Config;
pub use error::ReviewError;
pub use row::{row_style, Row, RowStyle};
pub use session::{Columns, Direction, ReviewSession};
pub use store::{ColumnNames, CsvStore};
