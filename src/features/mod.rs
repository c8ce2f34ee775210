pub mod complaints;
pub mod pages;
