// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mark list of a single drawing surface.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Rect;

use crate::{Mark, MarkId};

/// A flat list of marks for one surface.
///
/// Marks are keyed by [`MarkId`]: pushing a mark whose id is already present replaces it in
/// place. A redraw is `clear` followed by `extend` (or [`Scene::replace`]).
#[derive(Clone, Debug, Default)]
pub struct Scene {
    marks: Vec<Mark>,
    index: HashMap<MarkId, usize>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every mark.
    pub fn clear(&mut self) {
        self.marks.clear();
        self.index.clear();
    }

    /// Inserts a mark, replacing any existing mark with the same id.
    pub fn push(&mut self, mark: Mark) {
        match self.index.get(&mark.id) {
            Some(&slot) => self.marks[slot] = mark,
            None => {
                self.index.insert(mark.id, self.marks.len());
                self.marks.push(mark);
            }
        }
    }

    /// Inserts every mark from `marks`.
    pub fn extend(&mut self, marks: impl IntoIterator<Item = Mark>) {
        for mark in marks {
            self.push(mark);
        }
    }

    /// Clears the scene and draws `marks` in its place.
    pub fn replace(&mut self, marks: impl IntoIterator<Item = Mark>) {
        self.clear();
        self.extend(marks);
    }

    /// Returns the number of marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if the scene holds no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Looks up a mark by id.
    pub fn get(&self, id: MarkId) -> Option<&Mark> {
        self.index.get(&id).map(|&slot| &self.marks[slot])
    }

    /// Iterates marks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Mark> {
        self.marks.iter()
    }

    /// Returns marks in paint order: by `(z_index, id)`.
    pub fn paint_order(&self) -> Vec<&Mark> {
        let mut out: Vec<&Mark> = self.marks.iter().collect();
        out.sort_by_key(|m| (m.z_index, m.id));
        out
    }

    /// Union of the geometric bounds of all non-text marks.
    pub fn bounds(&self) -> Option<Rect> {
        self.marks
            .iter()
            .filter_map(Mark::bounds)
            .reduce(|a, b| a.union(b))
    }
}
