//! Domain types shared by the dashboard catalog, core and front-ends.

pub mod domain;
pub mod error;
pub mod records;
