//! Instruction step entity.
//!
//! Step numbers are caller-assigned. The aggregate neither renumbers nor
//! checks them for uniqueness or gaps.

use super::keys::{RecipeKey, StepId, StepKey};
use super::validation::ValidationError;
use serde::Serialize;

/// One timed cooking action.
#[derive(Debug, Serialize)]
pub struct InstructionStep {
    #[serde(skip)]
    key: StepKey,
    id: Option<StepId>,
    step_number: u32,
    description: String,
    duration_minutes: u32,
    #[serde(skip)]
    owner: Option<RecipeKey>,
}

impl InstructionStep {
    /// Creates a detached, never-persisted step.
    ///
    /// # Errors
    /// - `ZeroStepNumber` when `step_number == 0`.
    pub fn new(
        step_number: u32,
        description: impl Into<String>,
        duration_minutes: u32,
    ) -> Result<Self, ValidationError> {
        if step_number == 0 {
            return Err(ValidationError::ZeroStepNumber);
        }

        Ok(Self {
            key: StepKey::next(),
            id: None,
            step_number,
            description: description.into(),
            duration_minutes,
            owner: None,
        })
    }

    pub(crate) fn restore(
        id: StepId,
        step_number: u32,
        description: String,
        duration_minutes: u32,
    ) -> Result<Self, ValidationError> {
        let mut step = Self::new(step_number, description, duration_minutes)?;
        step.id = Some(id);
        Ok(step)
    }

    pub fn key(&self) -> StepKey {
        self.key
    }

    pub fn id(&self) -> Option<StepId> {
        self.id
    }

    pub fn step_number(&self) -> u32 {
        self.step_number
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn owner(&self) -> Option<RecipeKey> {
        self.owner
    }

    pub(crate) fn attach(&mut self, owner: RecipeKey) {
        self.owner = Some(owner);
    }

    pub(crate) fn detach(&mut self) {
        self.owner = None;
    }

    pub(crate) fn assign_id(&mut self, id: StepId) {
        self.id = Some(id);
    }

    /// Detached copy that keeps the persisted identity.
    pub(crate) fn snapshot(&self) -> Self {
        Self {
            key: StepKey::next(),
            id: self.id,
            step_number: self.step_number,
            description: self.description.clone(),
            duration_minutes: self.duration_minutes,
            owner: None,
        }
    }
}

/// Copies are detached and never persisted.
impl Clone for InstructionStep {
    fn clone(&self) -> Self {
        Self {
            id: None,
            ..self.snapshot()
        }
    }
}
