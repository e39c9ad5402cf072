pub mod pages;
pub mod form;
