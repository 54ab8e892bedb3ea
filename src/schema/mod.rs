pub mod concept;
pub mod creature;
pub mod sheet;
pub mod traits;
