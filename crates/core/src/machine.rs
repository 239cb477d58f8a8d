//! State machine trait for conversational domain models.

/// Decide/apply state machine (pure, deterministic).
///
/// - **Decision logic**: `handle(&self, ctx, input)` returns events.
/// - **State mutation**: `apply(&mut self, event)` evolves state.
///
/// Machines must not perform IO or side effects. They only return events
/// describing what happened; callers turn those into effects.
pub trait StateMachine {
    /// Read-only environment the decision depends on (catalogs, clock readings).
    type Context;
    type Input: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Evolve in-memory state from a single event.
    fn apply(&mut self, event: &Self::Event);

    /// Decide which events to emit given the current state and an input.
    ///
    /// This must not mutate state. State evolution is done through `apply`.
    fn handle(
        &self,
        ctx: &Self::Context,
        input: &Self::Input,
    ) -> Result<Vec<Self::Event>, Self::Error>;

    /// Handle an input and apply every resulting event, in order.
    fn step(
        &mut self,
        ctx: &Self::Context,
        input: &Self::Input,
    ) -> Result<Vec<Self::Event>, Self::Error> {
        let events = self.handle(ctx, input)?;
        for event in &events {
            self.apply(event);
        }
        Ok(events)
    }
}
