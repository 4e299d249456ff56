//! Static enumerations shared by the filename classifier and the crawler
//!
//! - [`rinex`] - RINEX versions and coarse data rates
//! - [`data_type`] - data types and data sources
//! - [`data_center`] - IGS data centers and their directory layouts
//! - [`set`] - explicit category sets used for filtering

pub mod data_center;
pub mod data_type;
pub mod rinex;
pub mod set;

pub use data_center::{DataCenter, DataCenterCategory, Directory, Protocol};
pub use data_type::{DataSource, DataType};
pub use rinex::{DataRate, RinexVersion};
pub use set::CategorySet;
