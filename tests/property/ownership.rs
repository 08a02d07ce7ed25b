//! Property-based tests for lock and suppression bookkeeping
//!
//! Random sequences of lock, suppress and dispose operations by three contexts on
//! one shared group are checked against a simple model of holders and suppressor.

use ctxgate::group::ActionGroupState;
use ctxgate::{Context, ContextBehavior, ContextCore, ContextError, Session};
use proptest::prelude::*;
use std::sync::Arc;

const SHARED: &str = "application.shared";

macro_rules! member {
    ($name:ident) => {
        struct $name;

        impl ContextBehavior for $name {
            fn neutral_groups(&self) -> Vec<String> {
                vec![SHARED.to_string()]
            }

            fn create_context(&mut self, _ctx: &mut ContextCore) -> Result<(), ContextError> {
                Ok(())
            }

            fn dispose_context(&mut self, _ctx: &mut ContextCore) -> Result<(), ContextError> {
                Ok(())
            }
        }
    };
}

member!(Alpha);
member!(Beta);
member!(Gamma);

const NAMES: [&str; 3] = ["Alpha", "Beta", "Gamma"];

#[derive(Debug, Clone, Copy)]
enum Op {
    Lock(usize),
    Suppress(usize),
    Dispose(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..3usize).prop_map(Op::Lock),
        (0..3usize).prop_map(Op::Suppress),
        (0..3usize).prop_map(Op::Dispose),
    ]
}

struct Members {
    alpha: Context<Alpha>,
    beta: Context<Beta>,
    gamma: Context<Gamma>,
}

impl Members {
    fn new(session: &Arc<Session>) -> Self {
        Self {
            alpha: Context::new(session, Alpha).unwrap(),
            beta: Context::new(session, Beta).unwrap(),
            gamma: Context::new(session, Gamma).unwrap(),
        }
    }

    fn lock(&mut self, index: usize) -> bool {
        match index {
            0 => self.alpha.lock_group(SHARED).is_ok(),
            1 => self.beta.lock_group(SHARED).is_ok(),
            _ => self.gamma.lock_group(SHARED).is_ok(),
        }
    }

    fn suppress(&mut self, index: usize) -> bool {
        match index {
            0 => self.alpha.suppress_lock(SHARED).is_ok(),
            1 => self.beta.suppress_lock(SHARED).is_ok(),
            _ => self.gamma.suppress_lock(SHARED).is_ok(),
        }
    }

    /// Dispose one member and register a fresh instance in its place
    fn cycle(&mut self, session: &Arc<Session>, index: usize) {
        match index {
            0 => {
                self.alpha.dispose().unwrap();
                self.alpha = Context::new(session, Alpha).unwrap();
            }
            1 => {
                self.beta.dispose().unwrap();
                self.beta = Context::new(session, Beta).unwrap();
            }
            _ => {
                self.gamma.dispose().unwrap();
                self.gamma = Context::new(session, Gamma).unwrap();
            }
        }
    }
}

#[derive(Default)]
struct Model {
    holders: Vec<usize>,
    suppressor: Option<usize>,
}

impl Model {
    fn lock(&mut self, index: usize) -> bool {
        match self.suppressor {
            Some(s) if s == index => {
                self.suppressor = None;
                true
            }
            Some(_) => false,
            None if self.holders.contains(&index) => false,
            None => {
                self.holders.push(index);
                true
            }
        }
    }

    fn suppress(&mut self, index: usize) -> bool {
        if self.suppressor.is_some() {
            return false;
        }
        self.suppressor = Some(index);
        true
    }

    fn release(&mut self, index: usize) {
        self.holders.retain(|h| *h != index);
        if self.suppressor == Some(index) {
            self.suppressor = None;
        }
    }

    fn state(&self) -> ActionGroupState {
        if self.suppressor.is_some() {
            ActionGroupState::Suppressed
        } else if self.holders.is_empty() {
            ActionGroupState::Free
        } else {
            ActionGroupState::Locked
        }
    }
}

#[test]
fn test_group_bookkeeping_matches_model() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&proptest::collection::vec(op(), 1..40), |ops| {
            let session = Session::new();
            let mut members = Members::new(&session);
            let mut model = Model::default();

            for op in ops {
                match op {
                    Op::Lock(i) => prop_assert_eq!(members.lock(i), model.lock(i)),
                    Op::Suppress(i) => prop_assert_eq!(members.suppress(i), model.suppress(i)),
                    Op::Dispose(i) => {
                        members.cycle(&session, i);
                        model.release(i);
                    }
                }

                prop_assert_eq!(session.query_group_state(SHARED), model.state());
                prop_assert_eq!(
                    session.query_group([SHARED]).is_ok(),
                    model.state() != ActionGroupState::Locked
                );

                if let Some(container) = session.groups().get(SHARED) {
                    let holders: Vec<&str> =
                        container.holders().iter().map(|h| h.name.as_str()).collect();
                    let expected: Vec<&str> = model.holders.iter().map(|i| NAMES[*i]).collect();
                    prop_assert_eq!(holders, expected);
                    prop_assert_eq!(
                        container.suppressor().map(|s| s.name.as_str()),
                        model.suppressor.map(|i| NAMES[i])
                    );
                }
            }

            drop(members);
            prop_assert_eq!(session.query_group_state(SHARED), ActionGroupState::Free);
            prop_assert!(session.contexts().is_empty());

            Ok(())
        })
        .unwrap();
}
