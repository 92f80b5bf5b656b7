//! Résumé enhancement: section keys and deltas, the review state machine,
//! the pluggable enhancement backend and the cancellable progress run.

pub mod runner;
pub mod scripted;
pub mod section;
pub mod session;

pub use runner::{run_enhancement, ProgressStep, ENHANCEMENT_STEPS};
pub use scripted::{EnhancementInput, EnhancementResult, ResumeEnhancer, ScriptedEnhancer};
pub use section::{DeltaTable, EntrySection, FixedSection, SectionKey, SectionState};
pub use session::{EnhancementOutcome, EnhancementSession};
