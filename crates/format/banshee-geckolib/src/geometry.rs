//! GeckoLib geometry (`*.geo.json`): bone names, parent links and pivots.

use banshee_animation_core::{BoneNode, Vec3};
use indexmap::IndexMap;
use log::{debug, warn};

use crate::config::LoaderConfig;
use crate::error::FormatError;
use crate::raw::RawGeometryFile;

/// A bone as declared in the geometry, pivot already in block units.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryBone {
    pub name: String,
    pub parent: Option<String>,
    pub pivot: Vec3,
}

/// Validated bone table of one geometry. Parent links resolve and are acyclic.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    identifier: Option<String>,
    bones: IndexMap<String, GeometryBone>,
}

impl Geometry {
    /// Parses the first `minecraft:geometry` entry of `json`.
    pub fn from_json(json: &str, config: &LoaderConfig) -> Result<Self, FormatError> {
        check_units(config.units_per_block)?;
        let file: RawGeometryFile = serde_json::from_str(json)?;
        if file.geometry.len() > 1 {
            warn!(
                "geometry document has {} entries; only the first is used",
                file.geometry.len()
            );
        }
        let raw = file
            .geometry
            .into_iter()
            .next()
            .ok_or(FormatError::EmptyGeometry)?;
        if raw.bones.is_empty() {
            return Err(FormatError::EmptyGeometry);
        }

        let mut bones: IndexMap<String, GeometryBone> = IndexMap::with_capacity(raw.bones.len());
        for bone in raw.bones {
            if bones.contains_key(&bone.name) {
                return Err(FormatError::DuplicateBone { bone: bone.name });
            }
            let pivot = Vec3::from(bone.pivot) / config.units_per_block;
            bones.insert(
                bone.name.clone(),
                GeometryBone {
                    name: bone.name,
                    parent: bone.parent,
                    pivot,
                },
            );
        }

        let geometry = Self {
            identifier: raw.description.and_then(|d| d.identifier),
            bones,
        };
        geometry.validate_links()?;
        debug!(
            "loaded geometry {:?} with {} bones",
            geometry.identifier.as_deref().unwrap_or("<unnamed>"),
            geometry.bones.len()
        );
        Ok(geometry)
    }

    #[inline]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Bones in declaration order.
    pub fn bones(&self) -> impl Iterator<Item = &GeometryBone> {
        self.bones.values()
    }

    #[inline]
    pub fn bone(&self, name: &str) -> Option<&GeometryBone> {
        self.bones.get(name)
    }

    #[inline]
    pub fn pivot(&self, name: &str) -> Option<Vec3> {
        self.bones.get(name).map(|b| b.pivot)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.bones.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Every parentless bone with its subtree, in declaration order. Children
    /// keep declaration order too.
    pub fn roots(&self) -> Vec<BoneNode> {
        let children = self.child_indices();
        self.bones
            .values()
            .enumerate()
            .filter(|(_, bone)| bone.parent.is_none())
            .map(|(idx, _)| self.node(idx, &children))
            .collect()
    }

    /// The single bone tree of this geometry.
    pub fn tree(&self) -> Result<BoneNode, FormatError> {
        let mut roots = self.roots();
        match roots.len() {
            1 => Ok(roots.remove(0)),
            // no root means a cycle, which validate_links rejects
            0 => Err(FormatError::EmptyGeometry),
            _ => Err(FormatError::MultipleRoots {
                roots: roots.into_iter().map(|r| r.name).collect(),
            }),
        }
    }

    fn child_indices(&self) -> Vec<Vec<usize>> {
        let mut children = vec![Vec::new(); self.bones.len()];
        for (idx, bone) in self.bones.values().enumerate() {
            if let Some(parent) = bone.parent.as_deref().and_then(|p| self.bones.get_index_of(p)) {
                children[parent].push(idx);
            }
        }
        children
    }

    fn node(&self, idx: usize, children: &[Vec<usize>]) -> BoneNode {
        let bone = &self.bones[idx];
        BoneNode::new(bone.name.clone(), bone.pivot).with_children(
            children[idx]
                .iter()
                .map(|&child| self.node(child, children))
                .collect(),
        )
    }

    fn validate_links(&self) -> Result<(), FormatError> {
        for bone in self.bones.values() {
            if let Some(parent) = &bone.parent {
                if !self.bones.contains_key(parent) {
                    return Err(FormatError::UnknownParent {
                        bone: bone.name.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }

        // anything not reachable from a root sits on a cycle or below one
        let children = self.child_indices();
        let mut reached = vec![false; self.bones.len()];
        let mut stack: Vec<usize> = self
            .bones
            .values()
            .enumerate()
            .filter(|(_, b)| b.parent.is_none())
            .map(|(idx, _)| idx)
            .collect();
        while let Some(idx) = stack.pop() {
            reached[idx] = true;
            stack.extend(children[idx].iter().copied());
        }
        match reached.iter().position(|r| !r) {
            Some(idx) => Err(FormatError::Cycle {
                bone: self.bones[idx].name.clone(),
            }),
            None => Ok(()),
        }
    }
}

pub(crate) fn check_units(units_per_block: f32) -> Result<(), FormatError> {
    if units_per_block.is_finite() && units_per_block > 0.0 {
        Ok(())
    } else {
        Err(FormatError::InvalidUnits {
            value: units_per_block,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(json: &str) -> Result<Geometry, FormatError> {
        Geometry::from_json(json, &LoaderConfig::default())
    }

    #[test]
    fn builds_tree_in_declaration_order() {
        let geo = load(
            r#"{ "minecraft:geometry": [ { "bones": [
                { "name": "root", "pivot": [0, 0, 0] },
                { "name": "body", "parent": "root", "pivot": [0, 16, 0] },
                { "name": "left", "parent": "body", "pivot": [4, 24, 0] },
                { "name": "right", "parent": "body", "pivot": [-4, 24, 0] }
            ] } ] }"#,
        )
        .unwrap();
        let tree = geo.tree().unwrap();
        let names: Vec<_> = tree.walk().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["root", "body", "left", "right"]);
        assert_eq!(geo.pivot("body"), Some(Vec3::new(0.0, 1.0, 0.0)));
        assert_eq!(geo.pivot("left"), Some(Vec3::new(0.25, 1.5, 0.0)));
    }

    #[test]
    fn rejects_bad_links() {
        let dup = load(r#"{ "minecraft:geometry": [ { "bones": [ {"name":"a"}, {"name":"a"} ] } ] }"#);
        assert!(matches!(dup, Err(FormatError::DuplicateBone { bone }) if bone == "a"));

        let orphan =
            load(r#"{ "minecraft:geometry": [ { "bones": [ {"name":"a","parent":"ghost"} ] } ] }"#);
        assert!(matches!(orphan, Err(FormatError::UnknownParent { parent, .. }) if parent == "ghost"));

        let cycle = load(
            r#"{ "minecraft:geometry": [ { "bones": [
                {"name":"root"}, {"name":"a","parent":"b"}, {"name":"b","parent":"a"}
            ] } ] }"#,
        );
        assert!(matches!(cycle, Err(FormatError::Cycle { bone }) if bone == "a"));

        assert!(matches!(
            load(r#"{ "minecraft:geometry": [] }"#),
            Err(FormatError::EmptyGeometry)
        ));
    }

    #[test]
    fn multiple_roots_form_a_forest() {
        let geo = load(
            r#"{ "minecraft:geometry": [ { "bones": [ {"name":"a"}, {"name":"b"} ] } ] }"#,
        )
        .unwrap();
        assert_eq!(geo.roots().len(), 2);
        assert!(matches!(geo.tree(), Err(FormatError::MultipleRoots { roots }) if roots == ["a", "b"]));
    }
}
