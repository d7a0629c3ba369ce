// SPDX-License-Identifier: MIT OR Apache-2.0
//! Ordered object lists shared by scenes and container objects.
//!
//! List order is paint order: index 0 is drawn first and sits at the bottom
//! of the outliner.

use crate::object::SceneObjectInfo;
use motion_animation::Uid;

/// Container errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContainerError {
    /// Index outside the valid range for the operation
    #[error("index out of bounds: {index} (out of {len})")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Number of objects in the container
        len: usize,
    },
    /// Object is not a direct member of this container
    #[error("object {0} does not belong to this container")]
    NotFound(Uid),
    /// Object with this UID is already a direct member
    #[error("object {0} is already in this container")]
    AlreadyMember(Uid),
}

/// Ordered list of scene object records
#[derive(Debug, Clone, Default)]
pub struct ObjectList {
    objects: Vec<SceneObjectInfo>,
}

impl ObjectList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Object at `index`
    pub fn at(&self, index: usize) -> Result<&SceneObjectInfo, ContainerError> {
        let len = self.objects.len();
        self.objects
            .get(index)
            .ok_or(ContainerError::IndexOutOfBounds { index, len })
    }

    /// Mutable object at `index`
    pub fn at_mut(&mut self, index: usize) -> Result<&mut SceneObjectInfo, ContainerError> {
        let len = self.objects.len();
        self.objects
            .get_mut(index)
            .ok_or(ContainerError::IndexOutOfBounds { index, len })
    }

    /// Position of a direct member, by UID
    pub fn index_of(&self, uid: &Uid) -> Option<usize> {
        self.objects.iter().position(|info| &info.uid == uid)
    }

    fn ensure_absent(&self, info: &SceneObjectInfo) -> Result<(), ContainerError> {
        match self.index_of(&info.uid) {
            Some(_) => Err(ContainerError::AlreadyMember(info.uid.clone())),
            None => Ok(()),
        }
    }

    /// Append on top of the paint order, returning the new index
    pub fn add(&mut self, info: SceneObjectInfo) -> Result<usize, ContainerError> {
        self.ensure_absent(&info)?;
        tracing::debug!(uid = %info.uid, name = %info.name, "Adding object");
        self.objects.push(info);
        Ok(self.objects.len() - 1)
    }

    /// Insert at `index` (`0..=len`), shifting later objects up
    pub fn insert(&mut self, index: usize, info: SceneObjectInfo) -> Result<(), ContainerError> {
        let len = self.objects.len();
        if index > len {
            return Err(ContainerError::IndexOutOfBounds { index, len });
        }
        self.ensure_absent(&info)?;
        tracing::debug!(uid = %info.uid, index, "Inserting object");
        self.objects.insert(index, info);
        Ok(())
    }

    /// Remove the object at `index`, shifting later objects down
    pub fn remove(&mut self, index: usize) -> Result<SceneObjectInfo, ContainerError> {
        let len = self.objects.len();
        if index >= len {
            return Err(ContainerError::IndexOutOfBounds { index, len });
        }
        let info = self.objects.remove(index);
        tracing::debug!(uid = %info.uid, index, "Removed object");
        Ok(info)
    }

    /// Remove a direct member by UID
    pub fn remove_object(&mut self, uid: &Uid) -> Result<SceneObjectInfo, ContainerError> {
        let index = self
            .index_of(uid)
            .ok_or_else(|| ContainerError::NotFound(uid.clone()))?;
        self.remove(index)
    }

    /// Move a direct member to a new index
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<(), ContainerError> {
        let info = self.remove(from)?;
        let len = self.objects.len();
        if to > len {
            // Put it back where it was before reporting.
            self.objects.insert(from, info);
            return Err(ContainerError::IndexOutOfBounds { index: to, len });
        }
        self.objects.insert(to, info);
        Ok(())
    }

    /// Objects visible at `time`, in paint order. Not recursive.
    pub fn collect(&self, time: f64) -> Vec<&SceneObjectInfo> {
        self.objects.iter().filter(|info| info.is_visible_at(time)).collect()
    }

    /// All objects in paint order
    pub fn iter(&self) -> std::slice::Iter<'_, SceneObjectInfo> {
        self.objects.iter()
    }

    /// All objects in paint order, mutably
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, SceneObjectInfo> {
        self.objects.iter_mut()
    }

    /// Find an object anywhere below this list
    pub fn find(&self, uid: &Uid) -> Option<&SceneObjectInfo> {
        self.objects.iter().find_map(|info| {
            if &info.uid == uid {
                return Some(info);
            }
            info.object.as_container().and_then(|c| c.objects().find(uid))
        })
    }

    /// Find an object anywhere below this list, mutably
    pub fn find_mut(&mut self, uid: &Uid) -> Option<&mut SceneObjectInfo> {
        for info in &mut self.objects {
            if &info.uid == uid {
                return Some(info);
            }
            if let Some(found) = info
                .object
                .as_container_mut()
                .and_then(|c| c.objects_mut().find_mut(uid))
            {
                return Some(found);
            }
        }
        None
    }

    /// Depth-first walk over every nested object with its depth
    pub fn walk(&self, visit: &mut dyn FnMut(usize, &SceneObjectInfo)) {
        self.walk_at(0, visit);
    }

    fn walk_at(&self, depth: usize, visit: &mut dyn FnMut(usize, &SceneObjectInfo)) {
        for info in &self.objects {
            visit(depth, info);
            if let Some(children) = info.object.as_container() {
                children.objects().walk_at(depth + 1, visit);
            }
        }
    }

    /// Latest `time_end` among direct members
    pub fn latest_end(&self) -> Option<f64> {
        self.objects.iter().map(|info| info.time_end).reduce(f64::max)
    }
}

impl<'a> IntoIterator for &'a ObjectList {
    type Item = &'a SceneObjectInfo;
    type IntoIter = std::slice::Iter<'a, SceneObjectInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}

impl FromIterator<SceneObjectInfo> for ObjectList {
    /// Later records whose UID is already present are dropped with a warning.
    fn from_iter<I: IntoIterator<Item = SceneObjectInfo>>(iter: I) -> Self {
        let mut list = Self::new();
        for info in iter {
            if let Err(err) = list.add(info) {
                tracing::warn!(%err, "Skipping duplicate object");
            }
        }
        list
    }
}

/// Anything that owns an [`ObjectList`]: scenes and container objects
pub trait ObjectContainer {
    /// The children
    fn objects(&self) -> &ObjectList;

    /// The children, mutably
    fn objects_mut(&mut self) -> &mut ObjectList;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{Box2D, Container};

    fn record(name: &str) -> SceneObjectInfo {
        SceneObjectInfo::new(name, Box::new(Box2D::default()))
    }

    fn names(list: &ObjectList) -> Vec<&str> {
        list.iter().map(|info| info.name.as_str()).collect()
    }

    #[test]
    fn test_add_returns_index() {
        let mut list = ObjectList::new();
        assert_eq!(list.add(record("a")).unwrap(), 0);
        assert_eq!(list.add(record("b")).unwrap(), 1);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_index_stability_after_removal() {
        let mut list = ObjectList::new();
        for name in ["a", "b", "c"] {
            list.add(record(name)).unwrap();
        }
        let c = list.at(2).unwrap().uid.clone();

        let removed = list.remove(1).unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(list.len(), 2);
        assert_eq!(list.index_of(&c), Some(1));
        assert_eq!(list.index_of(&removed.uid), None);
    }

    #[test]
    fn test_bounds() {
        let mut list = ObjectList::new();
        list.add(record("a")).unwrap();

        assert_eq!(
            list.at(1).unwrap_err(),
            ContainerError::IndexOutOfBounds { index: 1, len: 1 }
        );
        assert!(list.remove(1).is_err());
        assert!(list.insert(2, record("x")).is_err());
        list.insert(1, record("b")).unwrap();
        list.insert(0, record("c")).unwrap();
        assert_eq!(names(&list), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_remove_object_by_uid() {
        let mut list = ObjectList::new();
        list.add(record("a")).unwrap();
        let stranger = record("z");
        assert_eq!(
            list.remove_object(&stranger.uid).unwrap_err(),
            ContainerError::NotFound(stranger.uid.clone())
        );
        let uid = list.at(0).unwrap().uid.clone();
        assert_eq!(list.remove_object(&uid).unwrap().name, "a");
        assert!(list.is_empty());
    }

    #[test]
    fn test_duplicate_membership_rejected() {
        let mut list = ObjectList::new();
        let a = record("a");
        let clone = a.clone();
        list.add(a).unwrap();
        assert!(matches!(list.add(clone), Err(ContainerError::AlreadyMember(_))));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_collect_half_open_in_order() {
        let mut list = ObjectList::new();
        list.add(record("early").with_window(0.0, 100.0)).unwrap();
        list.add(record("late").with_window(100.0, 200.0)).unwrap();
        list.add(record("always").with_window(0.0, 1000.0)).unwrap();

        let at = |t: f64| -> Vec<String> { list.collect(t).iter().map(|i| i.name.clone()).collect() };
        assert_eq!(at(99.0), vec!["early", "always"]);
        assert_eq!(at(100.0), vec!["late", "always"]);
        assert_eq!(at(200.0), vec!["always"]);
    }

    #[test]
    fn test_move_to() {
        let mut list = ObjectList::new();
        for name in ["a", "b", "c"] {
            list.add(record(name)).unwrap();
        }
        list.move_to(0, 2).unwrap();
        assert_eq!(names(&list), vec!["b", "c", "a"]);
        assert!(list.move_to(0, 5).is_err());
        assert_eq!(names(&list), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_find_nested() {
        let mut group = Container::default();
        let inner = record("inner");
        let inner_uid = inner.uid.clone();
        group.objects_mut().add(inner).unwrap();

        let mut list = ObjectList::new();
        list.add(SceneObjectInfo::new("group", Box::new(group))).unwrap();

        assert_eq!(list.find(&inner_uid).map(|i| i.name.as_str()), Some("inner"));
        list.find_mut(&inner_uid).unwrap().name = "renamed".into();
        assert_eq!(list.find(&inner_uid).map(|i| i.name.as_str()), Some("renamed"));

        let mut seen = Vec::new();
        list.walk(&mut |depth: usize, info: &SceneObjectInfo| seen.push((depth, info.name.clone())));
        assert_eq!(seen, vec![(0, "group".to_owned()), (1, "renamed".to_owned())]);
        assert!(list.at(0).unwrap().object.as_container().is_some());
    }
}
