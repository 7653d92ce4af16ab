pub mod editor;
pub mod login;
pub mod project;
pub mod report;
