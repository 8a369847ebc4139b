//! Keys given as UTF-16 code units.
//!
//! Labels are `char`s, so a UTF-16 key must decode cleanly before it can be
//! walked. A key holding an unpaired surrogate is rejected up front with
//! [`TrieError::InvalidKey`] and the tree is left untouched.

use crate::error::{Result, TrieError};
use crate::Trie;

fn decode(units: &[u16]) -> Result<String> {
    let mut key = String::with_capacity(units.len());
    let mut index = 0;
    for decoded in char::decode_utf16(units.iter().copied()) {
        match decoded {
            Ok(c) => {
                key.push(c);
                index += c.len_utf16();
            }
            Err(err) => {
                return Err(TrieError::InvalidKey {
                    index,
                    unit: err.unpaired_surrogate(),
                })
            }
        }
    }
    Ok(key)
}

impl<V> Trie<V> {
    pub fn insert_utf16(&mut self, key: &[u16], value: V) -> Result<Option<V>> {
        let key = decode(key)?;
        Ok(self.insert(&key, value))
    }

    pub fn get_utf16(&self, key: &[u16]) -> Result<Option<&V>> {
        let key = decode(key)?;
        Ok(self.get(&key))
    }

    pub fn contains_key_utf16(&self, key: &[u16]) -> Result<bool> {
        let key = decode(key)?;
        Ok(self.contains_key(&key))
    }

    pub fn remove_utf16(&mut self, key: &[u16]) -> Result<Option<V>> {
        let key = decode(key)?;
        Ok(self.remove(&key))
    }
}
