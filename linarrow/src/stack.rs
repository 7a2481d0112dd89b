//! Stacks of binders.

/// A `Vec` that is used like an immutable linked list.
///
/// We use this to keep track of the binders
/// that we have passed while descending into a formula:
/// the innermost binder is the last element of the stack.
#[derive(Clone, Debug)]
pub struct Stack<A>(Vec<A>);

impl<A> Stack<A> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Default::default()
    }

    /// Push an element on the stack, run a function on it, then pop the element.
    ///
    /// This is to simulate function calls like `f(Cons(x, l))`,
    /// which assume that `l` is not changed in this call.
    pub fn with_pushed<F, Y>(&mut self, x: A, f: F) -> Y
    where
        F: FnOnce(&mut Stack<A>) -> Y,
    {
        self.0.push(x);
        let y = f(self);
        self.0.pop();
        y
    }
}

impl<A: PartialEq> Stack<A> {
    pub fn contains(&self, x: &A) -> bool {
        self.0.contains(x)
    }
}

impl<A> Default for Stack<A> {
    fn default() -> Self {
        Self(Vec::new())
    }
}
