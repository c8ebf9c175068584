use glam::{Affine3A, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::bounds::{Aabb, Ray};

/// A named node in a mesh hierarchy.
///
/// Only nodes with `bounds` take part in ray intersection; group nodes just
/// carry a transform for their children.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Node name as authored in the source asset.
    pub name: String,
    /// Transform relative to the parent node.
    pub transform: Affine3A,
    /// Local-space extent of this node's own geometry, if it has any.
    pub bounds: Option<Aabb>,
    /// Hidden nodes are skipped by intersection along with their subtree.
    pub visible: bool,
    /// Child nodes.
    pub children: Vec<SceneNode>,
}

/// One ray hit reported by [`SceneNode::intersect`].
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    /// Name of the node that was hit.
    pub name: String,
    /// World-space distance from the ray origin.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

impl SceneNode {
    /// An empty group node.
    #[must_use]
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Affine3A::IDENTITY,
            bounds: None,
            visible: true,
            children: Vec::new(),
        }
    }

    /// A leaf node with geometry occupying `bounds`.
    #[must_use]
    pub fn mesh(name: impl Into<String>, bounds: Aabb) -> Self {
        Self {
            bounds: Some(bounds),
            ..Self::group(name)
        }
    }

    /// Replace the local transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Affine3A) -> Self {
        self.transform = transform;
        self
    }

    /// Translate relative to the parent.
    #[must_use]
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.transform = Affine3A::from_translation(translation) * self.transform;
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first search for the first node called `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Intersect a world-space ray with this subtree.
    ///
    /// `parent` is the world transform of this node's parent. When
    /// `recursive` is false only this node is tested. Results are sorted
    /// nearest-first; ties keep traversal order.
    #[must_use]
    pub fn intersect(
        &self,
        ray: &Ray,
        parent: &Affine3A,
        recursive: bool,
    ) -> Vec<Intersection> {
        let mut hits = Vec::new();
        self.collect_hits(ray, parent, recursive, &mut hits);
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn collect_hits(
        &self,
        ray: &Ray,
        parent: &Affine3A,
        recursive: bool,
        hits: &mut Vec<Intersection>,
    ) {
        if !self.visible {
            return;
        }
        let world = *parent * self.transform;

        if let Some(distance) =
            self.bounds.and_then(|b| b.intersect_world(ray, &world))
        {
            hits.push(Intersection {
                name: self.name.clone(),
                distance,
                point: ray.at(distance),
            });
        }

        if recursive {
            for child in &self.children {
                child.collect_hits(ray, &world, true, hits);
            }
        }
    }
}

// ── Serialized description ───────────────────────────────────────────────

/// Serialized form of a [`SceneNode`] hierarchy.
///
/// This is the interchange format the loaders read: the external engine
/// exports node names, transforms and bounds; geometry stays with the
/// engine.
///
/// ```json
/// {
///   "name": "root",
///   "children": [
///     { "name": "scheibe", "translation": [0, 1, 0],
///       "bounds": { "min": [-1, -1, -0.1], "max": [1, 1, 0.1] } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescription {
    /// Node name.
    pub name: String,
    /// Local translation.
    #[serde(default)]
    pub translation: Vec3,
    /// Local rotation as a quaternion `[x, y, z, w]`.
    #[serde(default = "identity_rotation")]
    pub rotation: Quat,
    /// Local scale.
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
    /// Local geometry extent.
    #[serde(default)]
    pub bounds: Option<Aabb>,
    /// Whether the node is visible.
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    /// Child nodes.
    #[serde(default)]
    pub children: Vec<NodeDescription>,
}

fn identity_rotation() -> Quat {
    Quat::IDENTITY
}

fn unit_scale() -> Vec3 {
    Vec3::ONE
}

fn visible_by_default() -> bool {
    true
}

impl From<NodeDescription> for SceneNode {
    fn from(desc: NodeDescription) -> Self {
        Self {
            name: desc.name,
            transform: Affine3A::from_scale_rotation_translation(
                desc.scale,
                desc.rotation.normalize(),
                desc.translation,
            ),
            bounds: desc.bounds,
            visible: desc.visible,
            children: desc.children.into_iter().map(Self::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(name: &str, at: Vec3) -> SceneNode {
        SceneNode::mesh(name, Aabb::from_center(Vec3::ZERO, Vec3::splat(0.5)))
            .with_translation(at)
    }

    fn forward_ray() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z)
    }

    #[test]
    fn hits_are_sorted_nearest_first() {
        let root = SceneNode::group("root")
            .with_child(cube("far", Vec3::new(0.0, 0.0, -5.0)))
            .with_child(cube("near", Vec3::new(0.0, 0.0, 2.0)));

        let hits = root.intersect(&forward_ray(), &Affine3A::IDENTITY, true);
        let names: Vec<_> = hits.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["near", "far"]);
        assert!((hits[0].distance - 7.5).abs() < 1e-5);
        assert!((hits[0].point.z - 2.5).abs() < 1e-5);
    }

    #[test]
    fn non_recursive_tests_only_the_root() {
        let root = SceneNode::group("root").with_child(cube("child", Vec3::ZERO));
        let hits = root.intersect(&forward_ray(), &Affine3A::IDENTITY, false);
        assert!(hits.is_empty());
    }

    #[test]
    fn parent_transform_moves_children() {
        let root = SceneNode::group("root")
            .with_translation(Vec3::new(5.0, 0.0, 0.0))
            .with_child(cube("child", Vec3::ZERO));
        let hits = root.intersect(&forward_ray(), &Affine3A::IDENTITY, true);
        assert!(hits.is_empty());

        let shifted = Ray::new(Vec3::new(5.0, 0.0, 10.0), Vec3::NEG_Z);
        let hits = root.intersect(&shifted, &Affine3A::IDENTITY, true);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn hidden_subtrees_are_skipped() {
        let mut hidden = SceneNode::group("hidden")
            .with_child(cube("inside", Vec3::ZERO));
        hidden.visible = false;
        let root = SceneNode::group("root").with_child(hidden);
        assert!(root
            .intersect(&forward_ray(), &Affine3A::IDENTITY, true)
            .is_empty());
    }

    #[test]
    fn collapsed_node_is_not_hit() {
        let collapsed = cube("scheibe", Vec3::ZERO)
            .with_transform(Affine3A::from_scale(Vec3::ZERO));
        let root = SceneNode::group("root").with_child(collapsed);

        let away = Ray::new(Vec3::new(100.0, 50.0, 10.0), Vec3::Z);
        assert!(root.intersect(&away, &Affine3A::IDENTITY, true).is_empty());
        assert!(root
            .intersect(&forward_ray(), &Affine3A::IDENTITY, true)
            .is_empty());
    }

    #[test]
    fn zero_scale_description_is_not_pickable() {
        let json = r#"{
            "name": "root",
            "children": [
                { "name": "scheibe", "scale": [0.0, 0.0, 0.0],
                  "bounds": { "min": [-1.0, -1.0, -1.0], "max": [1.0, 1.0, 1.0] } }
            ]
        }"#;
        let desc: NodeDescription = serde_json::from_str(json).unwrap();
        let node = SceneNode::from(desc);
        assert!(node
            .intersect(&forward_ray(), &Affine3A::IDENTITY, true)
            .is_empty());
    }

    #[test]
    fn find_walks_depth_first() {
        let root = SceneNode::group("root").with_child(
            SceneNode::group("desk").with_child(cube("scheibe", Vec3::ZERO)),
        );
        assert!(root.find("scheibe").is_some());
        assert!(root.find("missing").is_none());
        assert_eq!(root.node_count(), 3);
    }

    #[test]
    fn description_defaults_fill_missing_fields() {
        let json = r#"{
            "name": "root",
            "children": [
                { "name": "scheibe", "translation": [0.0, 1.0, 0.0],
                  "bounds": { "min": [-1.0, -1.0, -0.1], "max": [1.0, 1.0, 0.1] } }
            ]
        }"#;
        let desc: NodeDescription = serde_json::from_str(json).unwrap();
        let node = SceneNode::from(desc);
        assert!(node.visible);
        assert!(node.bounds.is_none());
        let scheibe = node.find("scheibe").unwrap();
        assert_eq!(Vec3::from(scheibe.transform.translation), Vec3::Y);
    }
}
