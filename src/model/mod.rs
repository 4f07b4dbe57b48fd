pub mod champion;
pub mod ids;
