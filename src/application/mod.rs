//! Application services: the catalog store and the admin intake.

pub mod catalog;
pub mod intake;

pub use catalog::{ProjectStore, Rejection, WriteOutcome};
pub use intake::{
    FieldError, FormErrors, IdGenerator, Intake, ProjectForm, SubmitOutcome, TimeOrderedIds,
};
