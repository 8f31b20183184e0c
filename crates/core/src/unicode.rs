//! Sequential code point assignment for icon names.

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Hands out consecutive code points starting at a fixed value.
///
/// Every call returns a new code point. Names keep the order in which they
/// were first allocated; allocating a name again moves its mapping to the
/// newer code point.
#[derive(Debug, Clone)]
pub struct UnicodeAllocator {
    next: u32,
    assignments: IndexMap<String, char>,
}

impl UnicodeAllocator {
    pub fn new(start: u32) -> Self {
        Self {
            next: start,
            assignments: IndexMap::new(),
        }
    }

    pub fn allocate(&mut self, name: &str) -> Result<char> {
        let c = char::from_u32(self.next).ok_or(Error::InvalidCodepoint(self.next))?;
        self.next += 1;
        self.assignments.insert(name.to_string(), c);
        Ok(c)
    }

    pub fn assignments(&self) -> &IndexMap<String, char> {
        &self.assignments
    }

    pub fn into_assignments(self) -> IndexMap<String, char> {
        self.assignments
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
