//! BSP tree node structure and the build, clip, and invert operations
//! boolean composition is made of.

use crate::plane::Plane;
use crate::polygon::Polygon;
use std::fmt::Debug;

/// A BSP tree node, containing polygons plus optional front/back subtrees
#[derive(Debug, Clone)]
pub struct Node<S: Clone> {
    /// Splitting plane for this node *or* **None** for a leaf that
    /// only stores polygons.
    pub plane: Option<Plane>,

    /// Subtree in *front* of `plane`.
    pub front: Option<Box<Node<S>>>,

    /// Subtree in *back* of `plane`.
    pub back: Option<Box<Node<S>>>,

    /// Polygons that lie *exactly* on `plane`
    /// (after the node has been built).
    pub polygons: Vec<Polygon<S>>,
}

impl<S: Clone + Send + Sync + Debug> Default for Node<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send + Sync + Debug> Node<S> {
    /// Create a new empty BSP node
    pub const fn new() -> Self {
        Self {
            plane: None,
            front: None,
            back: None,
            polygons: Vec::new(),
        }
    }

    /// Build a BSP tree from the given polygons
    pub fn from_polygons(polygons: &[Polygon<S>]) -> Self {
        let mut node = Node::new();
        node.build(polygons);
        node
    }

    /// Convert solid space to empty space and vice versa: flip every
    /// polygon and plane, then swap each node's subtrees.
    pub fn invert(&mut self) {
        for p in &mut self.polygons {
            p.flip();
        }
        if let Some(ref mut plane) = self.plane {
            plane.flip();
        }
        if let Some(ref mut front) = self.front {
            front.invert();
        }
        if let Some(ref mut back) = self.back {
            back.invert();
        }
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Return the subset of `polygons` that lies outside the solid this
    /// tree represents.
    ///
    /// An empty node clips nothing. A node with no back subtree is solid
    /// everywhere behind its plane, so polygons routed there are inside
    /// the solid and are dropped.
    pub fn clip_polygons(&self, polygons: &[Polygon<S>]) -> Vec<Polygon<S>> {
        let Some(plane) = &self.plane else {
            return polygons.to_vec();
        };

        let mut front: Vec<Polygon<S>> = Vec::new();
        let mut back: Vec<Polygon<S>> = Vec::new();

        for polygon in polygons {
            // Coplanar polygons ride the matching front/back channel.
            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();
            plane.split_polygon(
                polygon,
                &mut coplanar_front,
                &mut coplanar_back,
                &mut front,
                &mut back,
            );
            front.append(&mut coplanar_front);
            back.append(&mut coplanar_back);
        }

        let mut front = if let Some(ref f) = self.front {
            f.clip_polygons(&front)
        } else {
            front
        };

        let back = if let Some(ref b) = self.back {
            b.clip_polygons(&back)
        } else {
            Vec::new()
        };

        front.extend(back);
        front
    }

    /// Remove all polygons in this BSP tree that are inside the other
    /// BSP tree `bsp`.
    pub fn clip_to(&mut self, bsp: &Node<S>) {
        self.polygons = bsp.clip_polygons(&self.polygons);
        if let Some(ref mut front) = self.front {
            front.clip_to(bsp);
        }
        if let Some(ref mut back) = self.back {
            back.clip_to(bsp);
        }
    }

    /// Return all polygons in this BSP tree
    pub fn all_polygons(&self) -> Vec<Polygon<S>> {
        let mut result = Vec::new();
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            result.extend_from_slice(&node.polygons);
            stack.extend(
                [&node.front, &node.back]
                    .iter()
                    .filter_map(|child| child.as_ref().map(|boxed| boxed.as_ref())),
            );
        }
        result
    }

    /// Build a BSP tree out of `polygons`. When called on an existing
    /// tree, the new polygons are filtered down to the bottom of the tree
    /// and become new nodes there. The first polygon inserted into an
    /// empty node decides that node's splitting plane.
    pub fn build(&mut self, polygons: &[Polygon<S>]) {
        if polygons.is_empty() {
            return;
        }

        let plane = self
            .plane
            .get_or_insert_with(|| polygons[0].plane.clone())
            .clone();

        let mut front: Vec<Polygon<S>> = Vec::new();
        let mut back: Vec<Polygon<S>> = Vec::new();

        for polygon in polygons {
            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();
            plane.split_polygon(
                polygon,
                &mut coplanar_front,
                &mut coplanar_back,
                &mut front,
                &mut back,
            );
            // Both coplanar orientations live on this node.
            self.polygons.append(&mut coplanar_front);
            self.polygons.append(&mut coplanar_back);
        }

        if !front.is_empty() {
            self.front
                .get_or_insert_with(|| Box::new(Node::new()))
                .build(&front);
        }
        if !back.is_empty() {
            self.back
                .get_or_insert_with(|| Box::new(Node::new()))
                .build(&back);
        }
    }
}
