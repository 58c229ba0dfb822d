//! The capability a domain object exposes to be driven by a machine.

/// Domain object whose lifecycle a machine governs.
///
/// The machine reads and writes only the state identifier; it never owns
/// the object. Calls against one context must be serialised by the caller
/// (for example one lock per [`context_uid`](Context::context_uid)).
///
/// # Example
///
/// ```rust
/// use waypoint::core::Context;
///
/// struct Ticket {
///     id: String,
///     status: String,
/// }
///
/// impl Context for Ticket {
///     fn context_uid(&self) -> &str {
///         &self.id
///     }
///
///     fn context_state(&self) -> &str {
///         &self.status
///     }
///
///     fn set_context_state(&mut self, state: &str) {
///         self.status = state.to_string();
///     }
/// }
/// ```
pub trait Context {
    /// Unique identifier of this context.
    fn context_uid(&self) -> &str;

    /// Identifier of the current state.
    fn context_state(&self) -> &str;

    /// Replace the current state identifier.
    fn set_context_state(&mut self, state: &str);
}
