//! Cumulative transform resolution over an element ancestor chain.
//!
//! The element tree proper belongs to the host; the core only needs parent
//! links, per-node transform lists, and a transform-capability test. That
//! seam is the [`ElementSource`] trait. [`ElementTree`] is an index-based
//! arena implementing it: children are owned top-down and parent links are
//! plain indices, never used for lifetime management.

use crate::connector::Connector;
use crate::errors::GeometryError;
use crate::path::BezierPath;

use super::{AffineTransform, TransformList};

/// Collaborator seam: what the resolver needs from an element tree.
pub trait ElementSource {
    type Id: Copy;

    /// Nearest parent, or `None` at the root.
    fn parent(&self, id: Self::Id) -> Option<Self::Id>;

    /// The node's own transform list, if it has one.
    fn transform(&self, id: Self::Id) -> Option<&TransformList>;

    /// Whether this node establishes its own coordinate system. Nodes that
    /// don't are still traversed for further ancestors but contribute no
    /// transform.
    fn is_transform_capable(&self, id: Self::Id) -> bool;
}

/// Compose the single transform mapping `id`'s local coordinates to the
/// outermost (root) container's coordinates.
///
/// The root ancestor's transform is outermost and the element's own
/// transform is innermost (closest to the point), matching "apply in
/// document order, root transform outermost" semantics. An element with no
/// transform and no transformed ancestor yields identity.
pub fn cumulative_transform<S: ElementSource>(source: &S, id: S::Id) -> AffineTransform {
    // Collect element-to-root, then walk in root-to-element order.
    let mut chain = vec![id];
    let mut current = id;
    while let Some(parent) = source.parent(current) {
        chain.push(parent);
        current = parent;
    }

    let mut acc = AffineTransform::IDENTITY;
    for node in chain.into_iter().rev() {
        if !source.is_transform_capable(node) {
            continue;
        }
        if let Some(list) = source.transform(node) {
            acc = acc.concatenating(&list.to_affine());
        }
    }
    acc
}

/// What a tree node is. The core synthesizes geometry for connectors only;
/// blocks and pictograms are converted by the host object model.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// Pure grouping node; no geometry of its own.
    Group,
    /// A connector line with arrowheads.
    Connector(Connector),
    /// Host-side block shape; out of scope here.
    Block,
    /// Host-side pictogram; out of scope here.
    Pictogram,
    /// Annotation overlay; inherits its parent's coordinate system unchanged.
    Annotation,
}

impl ElementKind {
    fn name(&self) -> &'static str {
        match self {
            ElementKind::Group => "group",
            ElementKind::Connector(_) => "connector",
            ElementKind::Block => "block",
            ElementKind::Pictogram => "pictogram",
            ElementKind::Annotation => "annotation",
        }
    }
}

/// Stable handle into an [`ElementTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Debug, Clone)]
struct ElementNode {
    parent: Option<ElementId>,
    kind: ElementKind,
    transform: Option<TransformList>,
}

/// Index-based arena of elements with non-owning parent back-references.
#[derive(Debug, Clone, Default)]
pub struct ElementTree {
    nodes: Vec<ElementNode>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, kind: ElementKind, transform: Option<TransformList>) -> ElementId {
        self.push(None, kind, transform)
    }

    pub fn add_child(
        &mut self,
        parent: ElementId,
        kind: ElementKind,
        transform: Option<TransformList>,
    ) -> ElementId {
        self.push(Some(parent), kind, transform)
    }

    fn push(
        &mut self,
        parent: Option<ElementId>,
        kind: ElementKind,
        transform: Option<TransformList>,
    ) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes.push(ElementNode { parent, kind, transform });
        id
    }

    pub fn kind(&self, id: ElementId) -> &ElementKind {
        &self.nodes[id.0].kind
    }

    /// Ancestors from nearest parent up to the root.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(self.parent(id), |&node| self.parent(node))
    }

    /// The transform mapping this element's local coordinates to the root's.
    pub fn cumulative_transform(&self, id: ElementId) -> AffineTransform {
        cumulative_transform(self, id)
    }

    /// Produce the drawable paths for an element, mapped into root
    /// coordinates through the cumulative transform.
    ///
    /// Groups contribute no geometry of their own. Kinds whose geometry the
    /// core does not convert are a caller error and are reported as such.
    pub fn paths(&self, id: ElementId) -> Result<Vec<BezierPath>, GeometryError> {
        let kind = &self.nodes[id.0].kind;
        match kind {
            ElementKind::Group | ElementKind::Annotation => Ok(Vec::new()),
            ElementKind::Connector(connector) => {
                let transform = self.cumulative_transform(id);
                Ok(connector
                    .paths()
                    .iter()
                    .map(|path| path.transformed(&transform))
                    .collect())
            }
            ElementKind::Block | ElementKind::Pictogram => {
                Err(GeometryError::UnsupportedElementKind { kind: kind.name() })
            }
        }
    }
}

impl ElementSource for ElementTree {
    type Id = ElementId;

    fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.nodes[id.0].parent
    }

    fn transform(&self, id: ElementId) -> Option<&TransformList> {
        self.nodes[id.0].transform.as_ref()
    }

    fn is_transform_capable(&self, id: ElementId) -> bool {
        !matches!(self.nodes[id.0].kind, ElementKind::Annotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::TransformOp;
    use glam::{DVec2, dvec2};

    fn assert_point_eq(actual: DVec2, expected: DVec2) {
        assert!(
            (actual - expected).length() < 1e-9,
            "point mismatch: {:?} != {:?}",
            actual,
            expected
        );
    }

    fn list(ops: Vec<TransformOp>) -> Option<TransformList> {
        Some(TransformList::new(ops))
    }

    #[test]
    fn root_without_transform_is_identity() {
        let mut tree = ElementTree::new();
        let root = tree.add_root(ElementKind::Group, None);
        assert!(tree.cumulative_transform(root).is_identity());
    }

    #[test]
    fn three_level_chain_composes_root_outermost() {
        let mut tree = ElementTree::new();
        let root = tree.add_root(
            ElementKind::Group,
            list(vec![TransformOp::Scale { sx: 2.0, sy: 2.0 }]),
        );
        let mid = tree.add_child(
            root,
            ElementKind::Group,
            list(vec![TransformOp::Translate { tx: 5.0, ty: 0.0 }]),
        );
        let leaf = tree.add_child(
            mid,
            ElementKind::Group,
            list(vec![TransformOp::Rotate { angle: 90.0, center: None }]),
        );

        let cumulative = tree.cumulative_transform(leaf);
        let manual = AffineTransform::scaling(2.0, 2.0)
            .concatenating(&AffineTransform::translation(5.0, 0.0))
            .concatenating(&AffineTransform::rotation(90f64.to_radians()));

        let p = dvec2(1.0, 0.0);
        assert_point_eq(cumulative.apply(p), manual.apply(p));
        // rotate(90): (1,0) -> (0,1); translate: (5,1); scale: (10,2)
        assert_point_eq(cumulative.apply(p), dvec2(10.0, 2.0));
    }

    #[test]
    fn non_capable_ancestors_are_traversed_but_skipped() {
        let mut tree = ElementTree::new();
        let root = tree.add_root(
            ElementKind::Group,
            list(vec![TransformOp::Translate { tx: 100.0, ty: 0.0 }]),
        );
        // annotations have a transform list attached but never contribute it
        let note = tree.add_child(
            root,
            ElementKind::Annotation,
            list(vec![TransformOp::Scale { sx: 50.0, sy: 50.0 }]),
        );
        let leaf = tree.add_child(note, ElementKind::Group, None);

        assert_point_eq(tree.cumulative_transform(leaf).apply(dvec2(0.0, 0.0)), dvec2(100.0, 0.0));
    }

    #[test]
    fn ancestors_walk_to_root() {
        let mut tree = ElementTree::new();
        let root = tree.add_root(ElementKind::Group, None);
        let mid = tree.add_child(root, ElementKind::Group, None);
        let leaf = tree.add_child(mid, ElementKind::Group, None);
        let chain: Vec<_> = tree.ancestors(leaf).collect();
        assert_eq!(chain, vec![mid, root]);
    }

    #[test]
    fn unsupported_kinds_error() {
        let mut tree = ElementTree::new();
        let block = tree.add_root(ElementKind::Block, None);
        assert_eq!(
            tree.paths(block),
            Err(GeometryError::UnsupportedElementKind { kind: "block" })
        );
        let group = tree.add_root(ElementKind::Group, None);
        assert_eq!(tree.paths(group), Ok(Vec::new()));
    }
}
