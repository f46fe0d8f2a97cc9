//! Scripted sequences of reconcile and clear steps.
//!
//! A script is a JSON array where each element is either
//! `{"reconcile": [<shape>, ...]}` or the string `"clear"`.

use crate::{Canvas, Shape, ShapeError};
use declmap_engine::{ClearReport, DeclarationMapper, ReconcileReport};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Reconcile(Vec<Shape>),
    Clear,
}

/// What a step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Reconciled(ReconcileReport),
    Cleared(ClearReport),
    Failed(String),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ShapeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Create two shapes, change the circle, drop the line, clear, then try
    /// a square, which fails unless a square mapping is registered.
    pub fn walkthrough() -> Self {
        Self {
            steps: vec![
                Step::Reconcile(vec![Shape::line("1", 10), Shape::circle("2", 5)]),
                Step::Reconcile(vec![Shape::line("1", 10), Shape::circle("2", 555)]),
                Step::Reconcile(vec![Shape::circle("2", 555)]),
                Step::Clear,
                Step::Reconcile(vec![Shape::square("3", 2)]),
            ],
        }
    }

    /// Runs every step. A failing step is recorded and the script continues.
    pub fn run(&self, mapper: &mut DeclarationMapper<Canvas, Shape>, canvas: &mut Canvas) -> Vec<Outcome> {
        self.steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let outcome = match step {
                    Step::Reconcile(shapes) => mapper
                        .reconcile(canvas, shapes.iter().cloned())
                        .map(Outcome::Reconciled),
                    Step::Clear => mapper.clear(canvas).map(Outcome::Cleared),
                };
                match outcome {
                    Ok(outcome) => {
                        info!("step {}: {:?}", index + 1, outcome);
                        outcome
                    }
                    Err(err) => {
                        warn!("step {} failed: {}", index + 1, err);
                        Outcome::Failed(err.to_string())
                    }
                }
            })
            .collect()
    }
}
