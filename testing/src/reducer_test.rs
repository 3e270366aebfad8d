//! Given-When-Then harness for reducers.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use ticket_ledger_core::{Reducer, Result};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for outcome assertion functions
type OutcomeAssertion<A> = Box<dyn FnOnce(&Result<Vec<A>>)>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// # Example
///
/// ```ignore
/// use ticket_ledger_testing::{ReducerTest, test_environment};
///
/// ReducerTest::new(LedgerReducer::default())
///     .with_env(test_environment())
///     .given_state(LedgerState::new())
///     .when_action(LedgerAction::CreateEvent { payload: gig_payload() })
///     .then_state(|state| assert_eq!(state.ticket_count(), 3))
///     .then_outcome(|outcome| assert!(outcome.is_ok()))
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    action: Option<A>,
    state_assertions: Vec<StateAssertion<S>>,
    outcome_assertions: Vec<OutcomeAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            action: None,
            state_assertions: Vec::new(),
            outcome_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Set the action to test (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the produced events or the rejection (Then)
    #[must_use]
    pub fn then_outcome<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&Result<Vec<A>>) + 'static,
    {
        self.outcome_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertions fail.
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let action = self.action.expect("Action must be set with when_action()");

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        let outcome = self.reducer.reduce(&mut state, action, &env);

        for assertion in self.state_assertions {
            assertion(&state);
        }

        for assertion in self.outcome_assertions {
            assertion(&outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticket_ledger_core::LedgerError;

    #[derive(Clone, Debug, PartialEq)]
    enum CounterAction {
        Add(u32),
        Added(u32),
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = u32;
        type Action = CounterAction;
        type Environment = ();

        fn reduce(&self, state: &mut u32, action: CounterAction, (): &()) -> Result<Vec<CounterAction>> {
            match action {
                CounterAction::Add(0) => Err(LedgerError::validation("nothing to add")),
                CounterAction::Add(n) => {
                    *state += n;
                    Ok(vec![CounterAction::Added(n)])
                }
                CounterAction::Added(n) => {
                    *state += n;
                    Ok(Vec::new())
                }
            }
        }
    }

    #[test]
    fn runs_state_and_outcome_assertions() {
        ReducerTest::new(CounterReducer)
            .with_env(())
            .given_state(1)
            .when_action(CounterAction::Add(2))
            .then_state(|state| assert_eq!(*state, 3))
            .then_outcome(|outcome| assert_eq!(outcome, &Ok(vec![CounterAction::Added(2)])))
            .run();
    }

    #[test]
    fn rejected_commands_leave_state_alone() {
        ReducerTest::new(CounterReducer)
            .with_env(())
            .given_state(5)
            .when_action(CounterAction::Add(0))
            .then_state(|state| assert_eq!(*state, 5))
            .then_outcome(|outcome| assert!(outcome.is_err()))
            .run();
    }
}
