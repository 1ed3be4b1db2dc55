//! Standard actions.

pub mod dropping;
pub mod examining;
pub mod listening;
pub mod putting;
pub mod smelling;
pub mod taking;

pub use dropping::DroppingAction;
pub use examining::ExaminingAction;
pub use listening::ListeningAction;
pub use putting::PuttingAction;
pub use smelling::SmellingAction;
pub use taking::TakingAction;

use crate::action::ActionRegistry;

/// Registers the standard action set.
pub fn register_standard(registry: &mut ActionRegistry) {
    registry.register(Box::new(TakingAction::new()));
    registry.register(Box::new(DroppingAction::new()));
    registry.register(Box::new(PuttingAction::new()));
    registry.register(Box::new(ExaminingAction::new()));
    registry.register(Box::new(ListeningAction::new()));
    registry.register(Box::new(SmellingAction::new()));
}
