pub mod grid;
pub mod julia;
