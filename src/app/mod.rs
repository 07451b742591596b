// Application layer - Use case interactors

pub mod container;
pub mod reconcile_interactor;
pub mod validate_interactor;

// Re-export interactors
pub use reconcile_interactor::ReconcileInteractor;
pub use validate_interactor::ValidateInteractor;
