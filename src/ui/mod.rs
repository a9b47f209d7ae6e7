/// UI layer: sidebar controls, the four charts, and the summary table.
pub mod charts;
pub mod panels;
pub mod table;
