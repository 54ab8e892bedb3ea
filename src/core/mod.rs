pub mod archetype;
pub mod distribute;
pub mod engine;
pub mod stages;
