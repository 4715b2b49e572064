pub mod ai;
pub mod config;
pub mod counter;
pub mod defense;
pub mod energy;
pub mod formulas;
pub mod model;
pub mod paths;
pub mod resolvers;
pub mod rng;
pub mod round;
pub mod scheduler;
pub mod sync;
pub mod validation;

// Re-export the engine entry points for external access
pub use ai::{evaluate, EvaluateError};
pub use counter::{resolve_counter_chain, CounterChainResult};
pub use resolvers::{resolve_group, resolve_per_attack};
pub use round::{build_visual_info, run_round, VisualInfo};
pub use scheduler::sort_by_priority;
pub use sync::{end_combat, init_combat_state, sync_to_game_state, CombatResult, GameState};
pub use validation::{validate_declaration, ValidationResult};
