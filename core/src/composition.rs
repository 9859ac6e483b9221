//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers in various ways:
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Focus a child reducer on one field of a larger state,
//!   routing the child's actions in and its effects' actions back out
//!
//! An application keeps one owned state context with a slice per resource.
//! Each slice reducer is scoped into that context and the scoped reducers are
//! combined into the single reducer the store runs.

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence, and all effects are collected and concatenated.
///
/// # Examples
///
/// ```
/// use slicekit_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
/// use slicekit_core::composition::combine_reducers;
///
/// #[derive(Clone)]
/// struct AppState {
///     counter: i32,
///     logged: bool,
/// }
///
/// #[derive(Clone)]
/// enum AppAction {
///     Increment,
///     Log,
/// }
///
/// struct CounterReducer;
/// struct LoggingReducer;
///
/// impl Reducer for CounterReducer {
///     type State = AppState;
///     type Action = AppAction;
///     type Environment = ();
///
///     fn reduce(&self, state: &mut AppState, action: AppAction, _env: &()) -> SmallVec<[Effect<AppAction>; 4]> {
///         if matches!(action, AppAction::Increment) {
///             state.counter += 1;
///         }
///         smallvec![Effect::None]
///     }
/// }
///
/// impl Reducer for LoggingReducer {
///     type State = AppState;
///     type Action = AppAction;
///     type Environment = ();
///
///     fn reduce(&self, state: &mut AppState, action: AppAction, _env: &()) -> SmallVec<[Effect<AppAction>; 4]> {
///         if matches!(action, AppAction::Log) {
///             state.logged = true;
///         }
///         smallvec![Effect::None]
///     }
/// }
///
/// let combined = combine_reducers(vec![Box::new(CounterReducer), Box::new(LoggingReducer)]);
///
/// let mut state = AppState { counter: 0, logged: false };
/// let _ = combined.reduce(&mut state, AppAction::Increment, &());
/// assert_eq!(state.counter, 1);
/// ```
#[must_use]
pub fn combine_reducers<S, A, E>(
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
}

impl<S, A, E> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    /// Number of reducers in this combination
    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Whether the combination holds no reducers
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects.into_iter().filter(|e| !e.is_none()));
        }

        all_effects
    }
}

/// Scopes a child reducer to one field of a parent state and one case of a
/// parent action.
///
/// - `state`: borrows the child state out of the parent
/// - `extract`: returns the child action when the parent action targets this
///   child, `None` otherwise (the scoped reducer then does nothing)
/// - `embed`: wraps child actions produced by effects back into the parent
///   action so they are routed to the same child on feedback
///
/// # Examples
///
/// ```
/// use slicekit_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
/// use slicekit_core::composition::scope_reducer;
///
/// #[derive(Clone, Default)]
/// struct CounterState { count: i32 }
///
/// #[derive(Clone)]
/// enum CounterAction { Increment }
///
/// struct CounterReducer;
///
/// impl Reducer for CounterReducer {
///     type State = CounterState;
///     type Action = CounterAction;
///     type Environment = ();
///
///     fn reduce(&self, state: &mut CounterState, _action: CounterAction, _env: &()) -> SmallVec<[Effect<CounterAction>; 4]> {
///         state.count += 1;
///         smallvec![Effect::None]
///     }
/// }
///
/// #[derive(Clone, Default)]
/// struct AppState { counter: CounterState, title: String }
///
/// #[derive(Clone)]
/// enum AppAction { Counter(CounterAction), Rename(String) }
///
/// let scoped = scope_reducer(
///     CounterReducer,
///     |app: &mut AppState| &mut app.counter,
///     |action: AppAction| match action {
///         AppAction::Counter(a) => Some(a),
///         AppAction::Rename(_) => None,
///     },
///     AppAction::Counter,
/// );
///
/// let mut state = AppState::default();
/// let _ = scoped.reduce(&mut state, AppAction::Counter(CounterAction::Increment), &());
/// let _ = scoped.reduce(&mut state, AppAction::Rename("x".into()), &());
/// assert_eq!(state.counter.count, 1);
/// ```
pub fn scope_reducer<S, SubS, A, SubA, E, R>(
    reducer: R,
    state: fn(&mut S) -> &mut SubS,
    extract: fn(A) -> Option<SubA>,
    embed: fn(SubA) -> A,
) -> ScopedReducer<S, SubS, A, SubA, E, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
{
    ScopedReducer {
        reducer,
        state,
        extract,
        embed,
        _phantom: std::marker::PhantomData,
    }
}

/// A reducer that operates on a subset of state and actions.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, SubA, E, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
{
    reducer: R,
    state: fn(&mut S) -> &mut SubS,
    extract: fn(A) -> Option<SubA>,
    embed: fn(SubA) -> A,
    _phantom: std::marker::PhantomData<fn() -> E>,
}

impl<S, SubS, A, SubA, E, R> Reducer for ScopedReducer<S, SubS, A, SubA, E, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = E>,
    A: Send + 'static,
    SubA: Send + 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let Some(child_action) = (self.extract)(action) else {
            return SmallVec::new();
        };

        let child_state = (self.state)(state);
        self.reducer
            .reduce(child_state, child_action, env)
            .into_iter()
            .map(|effect| effect.map(self.embed))
            .collect()
    }
}
