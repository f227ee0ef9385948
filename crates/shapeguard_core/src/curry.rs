//! Automatic partial application for fixed-arity functions.
//!
//! # Invariants
//! - Every application copies the accumulated arguments; sibling partial
//!   chains never observe each other's arguments.
//! - The wrapped function runs exactly once per saturating call and receives
//!   exactly `arity` arguments. Extras are dropped.

use crate::value::{Function, Value};
use std::rc::Rc;

/// A function awaiting the rest of its arguments.
#[derive(Debug, Clone)]
pub struct Curried {
    target: Function,
    supplied: Rc<[Value]>,
}

/// Outcome of applying arguments to a `Curried`.
#[derive(Debug, Clone)]
pub enum Applied {
    /// Arity was reached and the wrapped function returned this value.
    Complete(Value),
    /// More arguments are needed.
    Partial(Curried),
}

impl Applied {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    pub fn complete(self) -> Option<Value> {
        match self {
            Self::Complete(value) => Some(value),
            Self::Partial(_) => None,
        }
    }

    pub fn partial(self) -> Option<Curried> {
        match self {
            Self::Complete(_) => None,
            Self::Partial(curried) => Some(curried),
        }
    }

    /// Collapses to a host value; partial results become callable functions.
    pub fn into_value(self) -> Value {
        match self {
            Self::Complete(value) => value,
            Self::Partial(curried) => Value::Function(curried.into_function()),
        }
    }
}

/// Wraps `function` for partial application against its declared arity.
pub fn curry(function: &Function) -> Curried {
    Curried {
        target: function.clone(),
        supplied: Rc::from(Vec::new()),
    }
}

/// Alias of [`curry`] under its host name.
pub fn func(function: &Function) -> Curried {
    curry(function)
}

impl Curried {
    /// Appends `args` to the accumulated arguments and decides whether to run.
    pub fn call(&self, args: &[Value]) -> Applied {
        let arity = self.target.arity();
        let mut next = Vec::with_capacity(self.supplied.len() + args.len());
        next.extend_from_slice(&self.supplied);
        next.extend_from_slice(args);

        if next.len() >= arity {
            next.truncate(arity);
            return Applied::Complete(self.target.call(&next));
        }
        Applied::Partial(Curried {
            target: self.target.clone(),
            supplied: Rc::from(next),
        })
    }

    /// Declared arity of the wrapped function.
    pub fn arity(&self) -> usize {
        self.target.arity()
    }

    pub fn remaining(&self) -> usize {
        self.target.arity().saturating_sub(self.supplied.len())
    }

    pub fn supplied(&self) -> &[Value] {
        &self.supplied
    }

    /// Converts into a plain `Function` whose arity is the remaining count.
    ///
    /// Calling it returns the wrapped result at saturation, or another
    /// curried function value otherwise.
    pub fn into_function(self) -> Function {
        let name = self.target.name().to_string();
        let remaining = self.remaining();
        Function::new(name, remaining, move |args| self.call(args).into_value())
    }
}
