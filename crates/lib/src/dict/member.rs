//! Member-style access to a dictionary.
//!
//! Member access is the `x.name` half of the dual interface. A member name
//! reaches an item through the alias table, or a direct attribute when no item
//! answers to it.

use crate::{AliasDict, Key, Result, dict::DictError};

/// Access by member name.
///
/// Items take priority over direct attributes on reads. Writes and deletes go
/// to a direct attribute only if the name is already registered as one.
pub trait MemberAccess<V> {
    /// Read the item `name` reaches, falling back to a direct attribute.
    fn get_member(&self, name: &str) -> Result<&V>;

    /// Store `value` under the member `name`.
    fn set_member(&mut self, name: &str, value: V) -> Result<()>;

    /// Delete the member `name`.
    fn delete_member(&mut self, name: &str) -> Result<()>;
}

impl<V> MemberAccess<V> for AliasDict<V> {
    fn get_member(&self, name: &str) -> Result<&V> {
        match self.get(name) {
            Ok(value) => Ok(value),
            Err(e) if e.is_not_found() => self.get_direct(name).map_err(|_| {
                DictError::AttributeNotFound {
                    name: name.to_string(),
                }
                .into()
            }),
            Err(e) => Err(e),
        }
    }

    fn set_member(&mut self, name: &str, value: V) -> Result<()> {
        if self.is_direct(name) {
            self.set_direct(name, value);
            return Ok(());
        }
        self.set(Key::from(name), value)
    }

    fn delete_member(&mut self, name: &str) -> Result<()> {
        if self.is_direct(name) {
            self.delete_direct(name)?;
            return Ok(());
        }
        match self.delete(name) {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => Err(DictError::AttributeNotFound {
                name: name.to_string(),
            }
            .into()),
            Err(e) => Err(e),
        }
    }
}
