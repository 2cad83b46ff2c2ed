// Domain layer - dashboard data, selection and styling rules
pub mod analysis;
pub mod dashboard;
pub mod emphasis;
pub mod error;
pub mod panel;
pub mod selection;
pub mod series;
pub mod trace;
