//! Reducer trait for ledger state transitions.
//!
//! A reducer takes the current state, an action and the environment, and
//! applies the action in place. Commands are validated first; a command that
//! passes is turned into one or more events, each applied to the state and
//! returned to the caller. Feeding an event back through `reduce` re-applies it,
//! which is how state is rebuilt from a recorded event sequence.

use crate::error::Result;

/// The Reducer trait - core abstraction for business logic
///
/// # Type Parameters
///
/// - `State`: The domain state this reducer operates on
/// - `Action`: Commands and events this reducer processes
/// - `Environment`: Injected dependencies (clock, id generator)
pub trait Reducer {
    /// The state type this reducer operates on
    type State;

    /// The action type this reducer processes
    type Action;

    /// The environment type with injected dependencies
    type Environment;

    /// Reduce an action into state changes
    ///
    /// # Returns
    ///
    /// The events produced by a command, already applied to `state`. Replayed
    /// events produce nothing new.
    ///
    /// # Errors
    ///
    /// Returns the [`LedgerError`](crate::LedgerError) that rejected a command.
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Result<Vec<Self::Action>>;
}
