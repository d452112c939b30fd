// Domain layer - Scenes, value objects and pure pipeline rules

pub mod model;
pub mod rules;
pub mod scene;
