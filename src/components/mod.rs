pub mod detail_panel;
pub mod molecule;
