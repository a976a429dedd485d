use crate::fs::consts::PATH_ROOT;
use crate::fs::error::{FsError, FsResult};
use crate::fs::layout::{DescriptorId, FileNode, NodeId, NodeKind};
use crate::fs::path::{ParsedPath, TokenKind};

/// Outcome of walking a path from a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Directory the walk ended in.
    pub dir: NodeId,
    /// The final component named an existing directory and the walk moved
    /// into it.
    pub entered_terminal: bool,
}

/// The directory tree.
///
/// Nodes live in an arena and refer to each other by index: a directory
/// lists its children, every child records its parent. The registry keeps
/// every live node (root included) in creation order.
pub struct Namespace {
    nodes: Vec<Option<FileNode>>,
    registry: Vec<NodeId>,
    root: NodeId,
}

impl Namespace {
    pub fn new(root_descriptor: DescriptorId) -> Self {
        let root = FileNode::new(
            PATH_ROOT,
            root_descriptor,
            NodeKind::Directory {
                children: Vec::new(),
            },
        );
        Self {
            nodes: vec![Some(root)],
            registry: vec![0],
            root: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> FsResult<&FileNode> {
        self.nodes
            .get(id)
            .and_then(Option::as_ref)
            .ok_or_else(|| FsError::not_found(format!("node {id}")))
    }

    pub fn get_mut(&mut self, id: NodeId) -> FsResult<&mut FileNode> {
        self.nodes
            .get_mut(id)
            .and_then(Option::as_mut)
            .ok_or_else(|| FsError::not_found(format!("node {id}")))
    }

    /// Exact, case-sensitive match among the directory's children.
    pub fn find_child_by_name(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        let dir = self.get(dir).ok()?;
        dir.children()
            .iter()
            .copied()
            .find(|&c| self.get(c).is_ok_and(|n| n.name == name))
    }

    fn find_child_dir(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        let dir = self.get(dir).ok()?;
        dir.children()
            .iter()
            .copied()
            .find(|&c| self.get(c).is_ok_and(|n| n.is_dir() && n.name == name))
    }

    /// Appends `node` to `dir`'s children and to the registry.
    pub fn add_child(&mut self, dir: NodeId, mut node: FileNode) -> FsResult<NodeId> {
        let id = self.nodes.len();
        match &mut self.get_mut(dir)?.kind {
            NodeKind::Directory { children } => children.push(id),
            _ => return Err(FsError::invalid("parent is not a directory")),
        }
        node.parent = Some(dir);
        self.nodes.push(Some(node));
        self.registry.push(id);
        Ok(id)
    }

    /// Removes the child directory `name` of `dir`, refusing anything that
    /// is not an empty directory.
    pub fn remove_if_empty(&mut self, dir: NodeId, name: &str) -> FsResult<FileNode> {
        let child = self
            .find_child_by_name(dir, name)
            .ok_or_else(|| FsError::not_found(name))?;
        let node = self.get(child)?;
        if !node.is_dir() {
            return Err(FsError::invalid(format!("{name} is not a directory")));
        }
        if !node.children().is_empty() {
            return Err(FsError::invalid(format!("directory {name} is not empty")));
        }
        self.detach(child)
    }

    /// Registered nodes in creation order.
    pub fn registered(&self) -> impl Iterator<Item = (NodeId, &FileNode)> + '_ {
        self.registry
            .iter()
            .filter_map(|&id| self.get(id).ok().map(|n| (id, n)))
    }

    /// Drops the first registry entry named `name` and returns its node id.
    pub fn unlink_by_name(&mut self, name: &str) -> Option<NodeId> {
        let pos = self
            .registry
            .iter()
            .position(|&id| self.get(id).is_ok_and(|n| n.name == name))?;
        Some(self.registry.remove(pos))
    }

    /// Takes a node out of the tree: its parent's child list, the registry
    /// and the arena.
    pub fn detach(&mut self, id: NodeId) -> FsResult<FileNode> {
        if id == self.root {
            return Err(FsError::invalid("cannot remove root"));
        }
        let parent = self.get(id)?.parent;
        if let Some(parent) = parent {
            if let NodeKind::Directory { children } = &mut self.get_mut(parent)?.kind {
                children.retain(|&c| c != id);
            }
        }
        self.registry.retain(|&r| r != id);
        self.nodes[id]
            .take()
            .ok_or_else(|| FsError::not_found(format!("node {id}")))
    }

    /// Walks `path` from `cursor`. All-or-nothing: on error the caller's
    /// cursor is untouched since the walk runs on a copy.
    ///
    /// `..` fails at root. A name moves into the matching child directory;
    /// a missing name fails unless it is the final component, in which case
    /// the walk ends where it is.
    pub fn resolve(&self, cursor: NodeId, path: &ParsedPath) -> FsResult<Resolution> {
        let mut dir = if path.is_absolute { self.root } else { cursor };
        let mut entered_terminal = false;

        for token in &path.tokens {
            match token.kind {
                TokenKind::Current => {}
                TokenKind::Parent => {
                    dir = self
                        .get(dir)?
                        .parent
                        .ok_or_else(|| FsError::invalid("cannot go above root"))?;
                }
                TokenKind::Name => match self.find_child_dir(dir, &token.value) {
                    Some(child) => {
                        dir = child;
                        entered_terminal = token.is_last;
                    }
                    None if token.is_last => {}
                    None => return Err(FsError::not_found(token.value.clone())),
                },
            }
        }

        Ok(Resolution {
            dir,
            entered_terminal,
        })
    }

    /// Absolute path of a node, `root/a/b`.
    pub fn path_of(&self, id: NodeId) -> FsResult<String> {
        let mut parts = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id)?;
            parts.push(node.name.as_str());
            current = node.parent;
        }
        parts.reverse();
        Ok(parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::path::parse;

    fn dir(name: &str, desc: DescriptorId) -> FileNode {
        FileNode::new(
            name,
            desc,
            NodeKind::Directory {
                children: Vec::new(),
            },
        )
    }

    fn file(name: &str, desc: DescriptorId) -> FileNode {
        FileNode::new(name, desc, NodeKind::RegularFile)
    }

    // root/{a/{b}, f}
    fn sample() -> (Namespace, NodeId, NodeId, NodeId) {
        let mut ns = Namespace::new(0);
        let a = ns.add_child(ns.root(), dir("a", 1)).unwrap();
        let b = ns.add_child(a, dir("b", 2)).unwrap();
        let f = ns.add_child(ns.root(), file("f", 3)).unwrap();
        (ns, a, b, f)
    }

    #[test]
    fn children_keep_creation_order() {
        let (ns, a, _, f) = sample();
        assert_eq!(ns.get(ns.root()).unwrap().children(), &[a, f]);
        assert_eq!(ns.get(f).unwrap().parent, Some(ns.root()));
        assert_eq!(ns.find_child_by_name(ns.root(), "f"), Some(f));
        assert_eq!(ns.find_child_by_name(ns.root(), "F"), None);
    }

    #[test]
    fn cannot_add_under_a_file() {
        let (mut ns, _, _, f) = sample();
        assert!(ns.add_child(f, file("x", 9)).is_err());
    }

    #[test]
    fn resolve_descends_and_climbs() {
        let (ns, a, b, _) = sample();
        let r = ns.resolve(ns.root(), &parse("a/b").unwrap()).unwrap();
        assert_eq!(r.dir, b);
        assert!(r.entered_terminal);

        let r = ns.resolve(b, &parse("..").unwrap()).unwrap();
        assert_eq!(r.dir, a);
        assert!(!r.entered_terminal);

        let r = ns.resolve(b, &parse("root/a").unwrap()).unwrap();
        assert_eq!(r.dir, a);
    }

    #[test]
    fn dot_keeps_cursor() {
        let (ns, a, b, _) = sample();
        for cursor in [ns.root(), a, b] {
            assert_eq!(ns.resolve(cursor, &parse(".").unwrap()).unwrap().dir, cursor);
        }
    }

    #[test]
    fn parent_then_own_name_returns_home() {
        let (ns, a, b, _) = sample();
        for cursor in [a, b] {
            let name = ns.get(cursor).unwrap().name.clone();
            let r = ns.resolve(cursor, &parse(&format!("../{name}")).unwrap()).unwrap();
            assert_eq!(r.dir, cursor);
        }
    }

    #[test]
    fn missing_terminal_name_stays_put() {
        let (ns, a, _, _) = sample();
        let r = ns.resolve(ns.root(), &parse("a/new").unwrap()).unwrap();
        assert_eq!(r.dir, a);
        assert!(!r.entered_terminal);
        // a file is not a directory to walk into
        let r = ns.resolve(ns.root(), &parse("f").unwrap()).unwrap();
        assert_eq!(r.dir, ns.root());
    }

    #[test]
    fn failures_are_reported() {
        let (ns, _, _, _) = sample();
        assert!(matches!(
            ns.resolve(ns.root(), &parse("..").unwrap()),
            Err(FsError::InvalidOperation(_))
        ));
        assert!(matches!(
            ns.resolve(ns.root(), &parse("nope/x").unwrap()),
            Err(FsError::NotFound(_))
        ));
        assert!(matches!(
            ns.resolve(ns.root(), &parse("f/x").unwrap()),
            Err(FsError::NotFound(_))
        ));
    }

    #[test]
    fn remove_if_empty_refuses_files_and_full_dirs() {
        let (mut ns, a, b, _) = sample();
        assert!(ns.remove_if_empty(ns.root(), "f").is_err());
        assert!(ns.remove_if_empty(ns.root(), "a").is_err());
        assert!(ns.remove_if_empty(ns.root(), "zzz").is_err());
        let removed = ns.remove_if_empty(a, "b").unwrap();
        assert_eq!(removed.name, "b");
        assert!(ns.get(b).is_err());
        assert!(ns.get(a).unwrap().children().is_empty());
        assert!(ns.remove_if_empty(ns.root(), "a").is_ok());
    }

    #[test]
    fn unlink_by_name_drops_only_first_match() {
        let (mut ns, a, _, f) = sample();
        let twin = ns.add_child(a, file("f", 4)).unwrap();
        assert_eq!(ns.unlink_by_name("f"), Some(f));
        let names: Vec<_> = ns.registered().map(|(id, _)| id).collect();
        assert!(names.contains(&twin));
        assert!(!names.contains(&f));
        assert_eq!(ns.unlink_by_name("missing"), None);
    }

    #[test]
    fn path_of_renders_from_root() {
        let (ns, _, b, f) = sample();
        assert_eq!(ns.path_of(ns.root()).unwrap(), "root");
        assert_eq!(ns.path_of(b).unwrap(), "root/a/b");
        assert_eq!(ns.path_of(f).unwrap(), "root/f");
    }

    #[test]
    fn root_cannot_be_detached() {
        let (mut ns, _, _, _) = sample();
        assert!(ns.detach(ns.root()).is_err());
    }
}
