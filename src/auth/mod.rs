pub mod handlers;
pub mod password;
pub mod session;

/// What the rest of the app needs to know about whoever sent a request.
pub trait SessionIdentity {
    /// Database id of the logged in user, if any.
    fn id(&self) -> Option<i64>;

    fn is_authenticated(&self) -> bool;
}
