//! Singly-linked, ordered sequence of personnel records.
//!
//! Lookups and removals scan from the front and act on the first match, so
//! with duplicate names the record at the lowest index always wins.

use crate::types::{Personnel, cmp_names, same_name};

type Link = Option<Box<Node>>;

struct Node {
    record: Personnel,
    next: Link,
}

/// A record taken out of the sequence together with the index it held.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Removal {
    pub record: Personnel,
    pub index: usize,
}

/// Ordered personnel list with positional insert and name-keyed access.
pub struct RecordSequence {
    head: Link,
    len: usize,
}

impl RecordSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Insert at `position`, clamped to the current length. Returns the index used.
    pub fn insert_at(&mut self, record: Personnel, position: usize) -> usize {
        let index = position.min(self.len);
        let slot = self.link_at(index);
        let next = slot.take();
        *slot = Some(Box::new(Node { record, next }));
        self.len += 1;
        index
    }

    /// Append to the back.
    pub fn push_back(&mut self, record: Personnel) -> usize {
        self.insert_at(record, self.len)
    }

    /// Remove the first record whose name matches, ignoring case.
    pub fn remove_by_name(&mut self, name: &str) -> Option<Removal> {
        self.unlink_first(|record| same_name(&record.name, name))
    }

    /// Remove the first record whose id matches, ignoring case.
    pub fn remove_by_id(&mut self, id: &str) -> Option<Removal> {
        self.unlink_first(|record| same_name(record.id(), id))
    }

    /// Remove the record at `index`; out of range is a miss.
    pub fn remove_at(&mut self, index: usize) -> Option<Personnel> {
        if index >= self.len {
            return None;
        }
        let slot = self.link_at(index);
        let mut node = slot.take()?;
        *slot = node.next.take();
        self.len -= 1;
        Some(node.record)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Personnel> {
        self.iter().find(|record| same_name(&record.name, name))
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.iter().position(|record| same_name(&record.name, name))
    }

    /// Stable ascending sort by name, ignoring case. Nodes are relinked, not reallocated.
    pub fn sort_by_name(&mut self) {
        if self.len < 2 {
            return;
        }
        let mut nodes = Vec::with_capacity(self.len);
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
            nodes.push(node);
        }
        // slice::sort_by is stable; equal names keep their prior order.
        nodes.sort_by(|a, b| cmp_names(&a.record.name, &b.record.name));
        self.head = nodes.into_iter().rev().fold(None, |next, mut node| {
            node.next = next;
            Some(node)
        });
    }

    /// Owned copy of the records, front to back.
    pub fn to_vec(&self) -> Vec<Personnel> {
        self.iter().cloned().collect()
    }

    /// Discard the current contents and rebuild from `ordered`.
    pub fn replace_all(&mut self, ordered: Vec<Personnel>) {
        self.clear();
        self.len = ordered.len();
        self.head = ordered.into_iter().rev().fold(None, |next, record| {
            Some(Box::new(Node { record, next }))
        });
    }

    pub fn clear(&mut self) {
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// The link that currently holds the node at `index` (or the tail link).
    fn link_at(&mut self, index: usize) -> &mut Link {
        let mut link = &mut self.head;
        for _ in 0..index {
            match link {
                Some(node) => link = &mut node.next,
                None => break,
            }
        }
        link
    }

    fn unlink_first<F>(&mut self, matches: F) -> Option<Removal>
    where
        F: Fn(&Personnel) -> bool,
    {
        let index = self.iter().position(matches)?;
        let record = self.remove_at(index)?;
        Some(Removal { record, index })
    }
}

impl Default for RecordSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RecordSequence {
    fn drop(&mut self) {
        // Unlink iteratively so long chains do not recurse in Box's drop.
        self.clear();
    }
}

/// Front-to-back iterator over a [`RecordSequence`].
pub struct Iter<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Personnel;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(&node.record)
    }
}

impl<'a> IntoIterator for &'a RecordSequence {
    type Item = &'a Personnel;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
