/// UI layer: egui panels and charts consuming the data layer's outputs.
/// All chart math (quartiles, bar sums, pie shares, trendline regression)
/// lives in [`plot`]; nothing here feeds back into the data layer.
pub mod panels;
pub mod plot;
pub mod views;
