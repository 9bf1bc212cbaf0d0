/// PPU processor - owner of a post-processing unit graph.
///
/// The processor is bound to the camera whose output it post-processes.
/// Units hang below the processor root; the graph is a DAG: an edge that
/// would close a cycle is rejected.

use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;
use crate::error::{Error, Result};
use crate::engine_error;
use crate::scene_graph::NodeKey;
use super::unit::{Unit, UnitKey};

const LOG_SOURCE: &str = "multipass::Processor";

pub struct Processor {
    camera: NodeKey,
    units: SlotMap<UnitKey, Unit>,
    roots: Vec<UnitKey>,
    dirty: bool,
}

impl Processor {
    /// Create an empty processor bound to `camera`
    pub fn new(camera: NodeKey) -> Self {
        Self {
            camera,
            units: SlotMap::with_key(),
            roots: Vec::new(),
            dirty: true,
        }
    }

    /// Camera whose output is processed
    pub fn camera(&self) -> NodeKey {
        self.camera
    }

    pub fn set_camera(&mut self, camera: NodeKey) {
        self.camera = camera;
        self.dirty = true;
    }

    // ===== UNITS =====

    /// Add a unit without any edge
    pub fn add_unit(&mut self, unit: Unit) -> UnitKey {
        self.dirty = true;
        let mut unit = unit;
        unit.children.clear();
        unit.parents.clear();
        self.units.insert(unit)
    }

    /// Add a unit directly under the processor root
    pub fn add_root_unit(&mut self, unit: Unit) -> UnitKey {
        let key = self.add_unit(unit);
        self.roots.push(key);
        key
    }

    /// Attach an existing unit under the processor root.
    ///
    /// Attaching a unit that already is a root is a no-op.
    pub fn add_to_root(&mut self, key: UnitKey) -> Result<()> {
        if !self.units.contains_key(key) {
            engine_error!(LOG_SOURCE, "Cannot attach unit to root: unit no longer exists");
            return Err(Error::InvalidGraph("unit no longer exists".to_string()));
        }
        if !self.roots.contains(&key) {
            self.roots.push(key);
            self.dirty = true;
        }
        Ok(())
    }

    /// Add the edge `parent -> child`.
    ///
    /// Adding an existing edge again is a no-op.
    ///
    /// # Errors
    ///
    /// - either unit is unknown
    /// - the edge would create a cycle
    pub fn add_child(&mut self, parent: UnitKey, child: UnitKey) -> Result<()> {
        if !self.units.contains_key(parent) || !self.units.contains_key(child) {
            engine_error!(LOG_SOURCE, "Cannot add child: unit no longer exists");
            return Err(Error::InvalidGraph("unit no longer exists".to_string()));
        }

        if parent == child || self.is_reachable(child, parent) {
            engine_error!(LOG_SOURCE,
                "Adding unit '{}' under '{}' would create a cycle",
                self.units[child].name, self.units[parent].name);
            return Err(Error::InvalidGraph(format!(
                "unit '{}' under '{}' would create a cycle",
                self.units[child].name, self.units[parent].name
            )));
        }

        if self.units[parent].children.contains(&child) {
            return Ok(());
        }

        self.units[parent].children.push(child);
        self.units[child].parents.push(parent);
        self.dirty = true;
        Ok(())
    }

    /// Remove a unit and every edge touching it. Its children stay alive.
    pub fn remove_unit(&mut self, key: UnitKey) -> Option<Unit> {
        let unit = self.units.remove(key)?;

        self.roots.retain(|&r| r != key);
        for &parent in &unit.parents {
            if let Some(p) = self.units.get_mut(parent) {
                p.children.retain(|&c| c != key);
            }
        }
        for &child in &unit.children {
            if let Some(c) = self.units.get_mut(child) {
                c.parents.retain(|&p| p != key);
            }
        }
        self.dirty = true;
        Some(unit)
    }

    /// Remove every unit, children before parents.
    ///
    /// Returns the names of the removed units in removal order.
    pub fn clear(&mut self) -> Vec<String> {
        let mut order = self.traversal_order();
        let ordered: FxHashSet<UnitKey> = order.iter().copied().collect();
        // Units unreachable from the root have no ordering constraint left
        order.extend(self.units.keys().filter(|key| !ordered.contains(key)));

        let mut removed = Vec::with_capacity(order.len());
        for key in order.into_iter().rev() {
            if let Some(unit) = self.remove_unit(key) {
                removed.push(unit.name);
            }
        }
        self.roots.clear();
        removed
    }

    // ===== ACCESS =====

    pub fn contains(&self, key: UnitKey) -> bool {
        self.units.contains_key(key)
    }

    pub fn unit(&self, key: UnitKey) -> Option<&Unit> {
        self.units.get(key)
    }

    pub fn unit_mut(&mut self, key: UnitKey) -> Option<&mut Unit> {
        self.dirty = true;
        self.units.get_mut(key)
    }

    /// Children of a unit (empty if the key is dead)
    pub fn children(&self, key: UnitKey) -> &[UnitKey] {
        self.units.get(key).map(|u| u.children.as_slice()).unwrap_or(&[])
    }

    /// Parents of a unit (empty if the key is dead)
    pub fn parents(&self, key: UnitKey) -> &[UnitKey] {
        self.units.get(key).map(|u| u.parents.as_slice()).unwrap_or(&[])
    }

    /// Units directly under the processor root
    pub fn roots(&self) -> &[UnitKey] {
        &self.roots
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// First unit with the given name, in traversal order
    pub fn find_unit_by_name(&self, name: &str) -> Option<UnitKey> {
        self.traversal_order()
            .into_iter()
            .find(|&key| self.units[key].name == name)
            .or_else(|| self.units.iter().find(|(_, u)| u.name == name).map(|(k, _)| k))
    }

    // ===== ORDER =====

    /// Units reachable from the root in execution order.
    ///
    /// Topological: a unit comes after all of its reachable parents.
    /// Ties keep root/child insertion order.
    pub fn traversal_order(&self) -> Vec<UnitKey> {
        let mut reachable = FxHashSet::default();
        let mut stack: Vec<UnitKey> = self.roots.iter().rev().copied().collect();
        while let Some(key) = stack.pop() {
            if reachable.insert(key) {
                stack.extend(self.children(key).iter().rev().copied());
            }
        }

        let mut pending: FxHashMap<UnitKey, usize> = reachable
            .iter()
            .map(|&key| {
                let parents = self.parents(key).iter().filter(|p| reachable.contains(*p)).count();
                (key, parents)
            })
            .collect();

        let mut order = Vec::with_capacity(reachable.len());
        let mut emitted = FxHashSet::default();
        let mut ready: std::collections::VecDeque<UnitKey> = self
            .roots
            .iter()
            .copied()
            .filter(|key| pending.get(key) == Some(&0))
            .collect();

        while let Some(key) = ready.pop_front() {
            if !emitted.insert(key) {
                continue;
            }
            order.push(key);
            for &child in self.children(key) {
                if let Some(count) = pending.get_mut(&child) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push_back(child);
                    }
                }
            }
        }
        order
    }

    /// Whether `to` can be reached from `from` by following child edges
    pub fn is_reachable(&self, from: UnitKey, to: UnitKey) -> bool {
        let mut stack = vec![from];
        let mut visited = FxHashSet::default();
        while let Some(key) = stack.pop() {
            if key == to {
                return true;
            }
            if visited.insert(key) {
                stack.extend_from_slice(self.children(key));
            }
        }
        false
    }

    // ===== DIRTY STATE =====

    /// Flag the unit subgraph for re-initialization before the next frame
    pub fn dirty_unit_subgraph(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Re-initialize the unit subgraph if needed.
    ///
    /// Returns the execution order of the units.
    pub fn init(&mut self) -> Vec<UnitKey> {
        self.dirty = false;
        self.traversal_order()
    }
}

#[cfg(test)]
#[path = "processor_tests.rs"]
mod tests;
