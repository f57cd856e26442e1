/*!

The hash-consing table: maps a node's [`StructuralKey`] to the arena index already holding that shape, so
that constructing "the same" node twice returns the same handle instead of allocating a duplicate.

*/

use std::collections::HashMap;

use crate::core::node::StructuralKey;

pub(crate) struct HashCons {
  table: HashMap<StructuralKey, usize>,
}

impl HashCons {
  pub fn new() -> HashCons {
    HashCons { table: HashMap::new() }
  }

  pub fn lookup(&self, key: &StructuralKey) -> Option<usize> {
    self.table.get(key).copied()
  }

  pub fn insert(&mut self, key: StructuralKey, index: usize) {
    self.table.insert(key, index);
  }

  pub fn len(&self) -> usize {
    self.table.len()
  }

  pub fn is_empty(&self) -> bool {
    self.table.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::handle::Handle;

  #[test]
  fn lookup_before_insert_is_none() {
    let hc = HashCons::new();
    assert_eq!(hc.lookup(&StructuralKey::Or(vec![Handle::FALSE])), None);
  }

  #[test]
  fn insert_then_lookup_round_trips() {
    let mut hc = HashCons::new();
    let key = StructuralKey::Eq(Handle::FALSE, Handle::TRUE);
    hc.insert(key.clone(), 3);
    assert_eq!(hc.lookup(&key), Some(3));
  }
}
