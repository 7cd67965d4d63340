// Engine modules: physics

pub mod physics;
