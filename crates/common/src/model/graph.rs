//! Collection operations for graph destinations. A graph serves as a
//! "virtual" destination: navigating to it lands on its start destination.

use std::rc::Rc;

use crate::error::{NavError, Result};
use crate::model::destination::{DestinationId, NavDestination};
use crate::model::display_name;

impl NavDestination {
    /// Add a child to this graph, taking ownership of it. Replacing an
    /// existing child with the same id detaches the old child first.
    pub fn add_destination(self: &Rc<Self>, node: Rc<NavDestination>) -> Result<()> {
        let body = self.graph_body()?;
        let id = node.id();
        if id == 0 {
            return Err(NavError::invalid_argument(
                "destinations must have an id; call set_id() before adding",
            ));
        }
        if id == self.id() {
            return Err(NavError::invalid_argument(format!(
                "destination {node} cannot have the same id as graph {self}"
            )));
        }
        let existing = body.nodes.borrow().get(&id).cloned();
        if let Some(existing) = &existing {
            if Rc::ptr_eq(existing, &node) {
                return Ok(());
            }
        }
        if node.parent().is_some() {
            return Err(NavError::invalid_state(
                "destination already has a parent; remove it from its graph first",
            ));
        }
        if let Some(existing) = existing {
            existing.set_parent(None);
        }
        node.set_parent(Some(self));
        body.nodes.borrow_mut().insert(id, node);
        Ok(())
    }

    pub fn add_destinations(
        self: &Rc<Self>,
        nodes: impl IntoIterator<Item = Rc<NavDestination>>,
    ) -> Result<()> {
        for node in nodes {
            self.add_destination(node)?;
        }
        Ok(())
    }

    /// Move every child of `other` into this graph. Destinations have at
    /// most one parent, so they are removed from `other` as they move.
    pub fn add_all(self: &Rc<Self>, other: &Rc<NavDestination>) -> Result<()> {
        let drained: Vec<_> = {
            let body = other.graph_body()?;
            let mut nodes = body.nodes.borrow_mut();
            let drained: Vec<_> = nodes.values().cloned().collect();
            nodes.clear();
            drained
        };
        for node in drained {
            node.set_parent(None);
            self.add_destination(node)?;
        }
        Ok(())
    }

    /// Remove a child from this graph, clearing its parent pointer. A node
    /// that is not a child is ignored.
    pub fn remove_node(self: &Rc<Self>, node: &Rc<NavDestination>) -> Result<()> {
        let body = self.graph_body()?;
        let removed = {
            let mut nodes = body.nodes.borrow_mut();
            match nodes.get(&node.id()) {
                Some(existing) if Rc::ptr_eq(existing, node) => nodes.remove(&node.id()),
                _ => None,
            }
        };
        if let Some(removed) = removed {
            removed.set_parent(None);
        }
        Ok(())
    }

    pub fn clear_nodes(self: &Rc<Self>) -> Result<()> {
        let body = self.graph_body()?;
        let drained: Vec<_> = {
            let mut nodes = body.nodes.borrow_mut();
            let drained: Vec<_> = nodes.values().cloned().collect();
            nodes.clear();
            drained
        };
        for node in drained {
            node.set_parent(None);
        }
        Ok(())
    }

    /// The children of this graph, ordered by id. Empty for non-graphs.
    pub fn children(&self) -> Vec<Rc<NavDestination>> {
        match &self.graph {
            Some(body) => body.nodes.borrow().values().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Find a destination by id, looking at local children first and then
    /// walking up through parent graphs.
    pub fn find_node(&self, id: DestinationId) -> Option<Rc<NavDestination>> {
        self.find_node_impl(id, true)
    }

    /// Find a direct child by id without consulting ancestors.
    pub fn find_node_scoped(&self, id: DestinationId) -> Option<Rc<NavDestination>> {
        self.find_node_impl(id, false)
    }

    fn find_node_impl(&self, id: DestinationId, search_parents: bool) -> Option<Rc<NavDestination>> {
        let local = self
            .graph
            .as_ref()
            .and_then(|body| body.nodes.borrow().get(&id).cloned());
        if local.is_some() {
            return local;
        }
        if search_parents {
            self.parent().and_then(|parent| parent.find_node(id))
        } else {
            None
        }
    }

    /// The destination shown when navigating to this graph. 0 when unset or
    /// when this is not a graph.
    pub fn start_destination(&self) -> DestinationId {
        self.graph
            .as_ref()
            .map_or(0, |body| body.start_destination.get())
    }

    pub fn set_start_destination(self: &Rc<Self>, start_id: DestinationId) -> Result<()> {
        let body = self.graph_body()?;
        if start_id == self.id() {
            return Err(NavError::invalid_argument(format!(
                "start destination {} cannot use the same id as graph {self}",
                display_name(start_id)
            )));
        }
        body.start_destination.set(start_id);
        Ok(())
    }
}
