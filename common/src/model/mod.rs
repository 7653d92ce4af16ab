pub mod fields;
pub mod item;
pub mod kpi;
pub mod money;
pub mod parse;
pub mod project;
pub mod totals;
