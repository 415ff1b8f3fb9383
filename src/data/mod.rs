//! Data layer: the observation table and how it gets loaded.
//!
//! Architecture:
//! ```text
//!  built-in site table     .parquet / .json / .csv
//!          │                        │
//!          │                        ▼
//!          │                  ┌──────────┐
//!          │                  │  loader   │  parse file → rows, sort by year
//!          │                  └──────────┘
//!          ▼                        │
//!   ┌──────────────────┐            │
//!   │ ObservationTable  │ ◄──────────┘  validated: unique ascending years
//!   └──────────────────┘
//! ```

pub mod loader;
pub mod model;
