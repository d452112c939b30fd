// Application layer - Use case interactors

pub mod ambient_interactor;
pub mod container;
pub mod generate_interactor;
pub mod mux_interactor;
pub mod probe_interactor;

// Re-export interactors
pub use ambient_interactor::AmbientInteractor;
pub use generate_interactor::GenerateInteractor;
pub use mux_interactor::MuxInteractor;
pub use probe_interactor::ProbeInteractor;
