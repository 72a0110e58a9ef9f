/// Carts need no creation parameters: an ensure for an unknown user id makes
/// an empty cart owned by that user.
#[derive(Debug, Clone, Default)]
pub struct CartCreate;
