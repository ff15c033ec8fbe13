//! Association lookup.

use crate::specification::{Association, Associations};

/// Stateless lookup over a collection's declared associations.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssociationResolver;

impl AssociationResolver {
    /// Find the association called `name`, if it is declared.
    pub fn lookup<'s>(associations: &'s Associations, name: &str) -> Option<&'s Association> {
        associations.get(name)
    }

    /// Returns true if `name` is a declared association.
    pub fn declares(associations: &Associations, name: &str) -> bool {
        associations.contains_key(name)
    }
}
