/// Rendering layer: thin egui widgets over the pure core.
pub mod charts;
pub mod grid;
pub mod panels;
