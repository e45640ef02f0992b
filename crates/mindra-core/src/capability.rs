//! Capability checks consumed by authoring operations.

/// Something that can answer whether the current session may author content.
///
/// Implemented by the admin gate; authoring code only needs this trait so it
/// stays independent of how the capability is granted.
pub trait AdminCapability {
    /// Returns `true` if the session currently holds the admin capability.
    fn is_admin(&self) -> bool;
}

impl AdminCapability for bool {
    fn is_admin(&self) -> bool {
        *self
    }
}
