//! Compensating-Action Sequences
//!
//! No write here spans shards transactionally. Where a multi-step write
//! needs an undo path, it is modeled as an ordered list of steps, each with
//! an optional compensating action; on failure the compensations of the
//! already-applied steps run in reverse order.

use futures::future::BoxFuture;

use crate::common::ServiceResult;

/// One step of a compensating-action sequence
pub struct SagaStep<'a> {
    pub name: &'static str,
    pub action: BoxFuture<'a, ServiceResult<()>>,
    pub compensation: Option<BoxFuture<'a, ServiceResult<()>>>,
}

impl<'a> SagaStep<'a> {
    pub fn new(name: &'static str, action: BoxFuture<'a, ServiceResult<()>>) -> Self {
        Self {
            name,
            action,
            compensation: None,
        }
    }

    pub fn with_compensation(
        name: &'static str,
        action: BoxFuture<'a, ServiceResult<()>>,
        compensation: BoxFuture<'a, ServiceResult<()>>,
    ) -> Self {
        Self {
            name,
            action,
            compensation: Some(compensation),
        }
    }
}

/// Run the steps in order.
///
/// On the first failing step, run the compensations of every already-applied
/// step in reverse order, then return the original error. A compensation
/// that itself fails is logged and leaves residue behind — there is no
/// second-level undo.
pub async fn run(steps: Vec<SagaStep<'_>>) -> ServiceResult<()> {
    let mut applied: Vec<(&'static str, Option<BoxFuture<'_, ServiceResult<()>>>)> = Vec::new();

    for step in steps {
        let SagaStep {
            name,
            action,
            compensation,
        } = step;

        match action.await {
            Ok(()) => applied.push((name, compensation)),
            Err(err) => {
                tracing::warn!(step = name, error = %err, "Saga step failed, compensating");
                for (prev, comp) in applied.into_iter().rev() {
                    if let Some(comp) = comp
                        && let Err(comp_err) = comp.await
                    {
                        tracing::error!(
                            step = prev,
                            error = %comp_err,
                            "Compensation failed, residue remains"
                        );
                    }
                }
                return Err(err);
            }
        }
    }

    Ok(())
}
