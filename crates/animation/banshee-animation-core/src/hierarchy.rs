//! Bone hierarchy and world-space pose composition.
//!
//! Composition walks the tree parent-before-child. Each bone's world transform
//! is its parent's world transform followed by its own local transform; scale
//! is multiplied component-wise. Bones the animation does not cover contribute
//! an identity local transform under the lenient lookup policy.

use indexmap::IndexMap;
use log::trace;

use crate::animation::{Animation, BoneHandle};
use crate::bone::BoneTransform;
use crate::config::{Config, LookupPolicy};
use crate::error::LookupError;
use crate::value::Vec3;

/// A bone in the static skeleton, owning its children.
///
/// Composition reads only `name` and `children`. Rotation pivots come from
/// the [`Animation`], which bakes them in at build time; `pivot` here is
/// informational, so an animation must be built against the geometry it is
/// composed over.
#[derive(Clone, Debug, PartialEq)]
pub struct BoneNode {
    pub name: String,
    pub pivot: Vec3,
    pub children: Vec<BoneNode>,
}

impl BoneNode {
    pub fn new(name: impl Into<String>, pivot: Vec3) -> Self {
        Self {
            name: name.into(),
            pivot,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<BoneNode>) -> Self {
        self.children = children;
        self
    }

    /// Pre-order traversal, parents before children.
    pub fn walk(&self) -> impl Iterator<Item = &BoneNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    pub fn find(&self, name: &str) -> Option<&BoneNode> {
        self.walk().find(|node| node.name == name)
    }

    /// Number of bones in this subtree, including `self`.
    pub fn len(&self) -> usize {
        self.walk().count()
    }
}

/// World-space transforms keyed by bone name, in traversal order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pose {
    bones: IndexMap<String, BoneTransform>,
}

impl Pose {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, bone: &str) -> Option<&BoneTransform> {
        self.bones.get(bone)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoneTransform)> {
        self.bones.iter().map(|(name, t)| (name.as_str(), t))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.bones.clear();
    }
}

/// Walks a bone tree and accumulates world transforms for one animation frame.
#[derive(Clone, Debug, Default)]
pub struct HierarchyComposer {
    config: Config,
}

impl HierarchyComposer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Composes world transforms for every bone under `root` at `time`.
    ///
    /// Bones rotate about the pivots stored in `animation`, not about
    /// [`BoneNode::pivot`].
    ///
    /// Under [`LookupPolicy::Strict`] any bone without animation data fails
    /// the whole frame with [`LookupError::MissingBones`]; the lenient policy
    /// never fails.
    pub fn compose(
        &self,
        root: &BoneNode,
        animation: &Animation,
        time: f32,
        root_transform: BoneTransform,
    ) -> Result<Pose, LookupError> {
        let mut pose = Pose::new();
        self.compose_into(&mut pose, root, animation, time, root_transform)?;
        Ok(pose)
    }

    /// Like [`compose`](Self::compose), reusing `pose`'s allocation. `pose`
    /// is cleared first; on error it is left empty.
    pub fn compose_into(
        &self,
        pose: &mut Pose,
        root: &BoneNode,
        animation: &Animation,
        time: f32,
        root_transform: BoneTransform,
    ) -> Result<(), LookupError> {
        pose.clear();

        if self.config.lookup == LookupPolicy::Strict {
            let missing = missing_bones(root, animation);
            if !missing.is_empty() {
                return Err(LookupError::MissingBones { bones: missing });
            }
        }

        let mut stack: Vec<(&BoneNode, BoneTransform)> = vec![(root, root_transform)];
        while let Some((node, parent)) = stack.pop() {
            let handle = animation.bone(&node.name);
            if let BoneHandle::Fallback = handle {
                trace!("bone '{}' has no animation data; using identity", node.name);
            }
            let world = parent.then(&handle.transform(time));
            pose.bones.insert(node.name.clone(), world);
            stack.extend(node.children.iter().rev().map(|child| (child, world)));
        }
        Ok(())
    }

    /// See [`missing_bones`].
    #[inline]
    pub fn missing_bones(&self, root: &BoneNode, animation: &Animation) -> Vec<String> {
        missing_bones(root, animation)
    }
}

/// Names of bones under `root` that `animation` has no data for, in traversal
/// order.
pub fn missing_bones(root: &BoneNode, animation: &Animation) -> Vec<String> {
    root.walk()
        .filter(|node| !animation.contains_bone(&node.name))
        .map(|node| node.name.clone())
        .collect()
}
