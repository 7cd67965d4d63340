// Core utilities shared by the engine modules

pub mod math;
