use crate::fs::handle::OpenHandle;
use std::fmt;

/// Index of a node in the namespace arena. Stable for the node's lifetime.
pub type NodeId = usize;
pub type DescriptorId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKind {
    File,
    Directory,
    Symlink,
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DescriptorKind::File => "FILE",
            DescriptorKind::Directory => "DIRECTORY",
            DescriptorKind::Symlink => "SYMLINK",
        })
    }
}

/// Content metadata shared by a file and the hard link made from it.
#[derive(Debug, Clone)]
pub struct Descriptor {
    pub id: DescriptorId,
    pub kind: DescriptorKind,
    pub size: u32,
    /// Extent-index key of the data, 0 when none. Every name sharing the
    /// descriptor reaches the same extent through it.
    pub content: u32,
    pub link_names: Vec<String>,
    // number of nodes naming this descriptor
    pub(crate) refs: u32,
}

impl Descriptor {
    pub fn new(id: DescriptorId, kind: DescriptorKind) -> Self {
        Self {
            id,
            kind,
            size: 0,
            content: 0,
            link_names: Vec::new(),
            refs: 1,
        }
    }

    pub fn stat(&self) -> DescriptorStat {
        DescriptorStat {
            id: self.id,
            kind: self.kind,
            size: self.size,
            link_names: self.link_names.clone(),
        }
    }
}

/// What `stat` hands back to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorStat {
    pub id: DescriptorId,
    pub kind: DescriptorKind,
    pub size: u32,
    pub link_names: Vec<String>,
}

impl fmt::Display for DescriptorStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "id: {}", self.id)?;
        writeln!(f, "file_size_in_bytes: {}", self.size)?;
        if !self.link_names.is_empty() {
            writeln!(f, "links: {}", self.link_names.join(", "))?;
        }
        write!(f, "type: {}", self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Data lives behind the node's descriptor.
    RegularFile,
    /// Children in creation order.
    Directory { children: Vec<NodeId> },
    /// Absolute path of the link target, e.g. `root/a/b`.
    Symlink { target: String },
}

#[derive(Debug, Clone)]
pub struct FileNode {
    pub name: String,
    pub descriptor: DescriptorId,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    /// Node was made by `link` and may only be unlinked, never opened.
    pub is_link: bool,
    /// Node already served as the source of a hard link.
    pub has_link: bool,
    pub open_handles: Vec<OpenHandle>,
}

impl FileNode {
    pub fn new(name: impl Into<String>, descriptor: DescriptorId, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            descriptor,
            kind,
            parent: None,
            is_link: false,
            has_link: false,
            open_handles: Vec::new(),
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Directory { children } => children,
            _ => &[],
        }
    }

    pub fn type_label(&self) -> &'static str {
        match self.kind {
            NodeKind::RegularFile if self.is_link => "LINK",
            NodeKind::RegularFile => "FILE",
            NodeKind::Directory { .. } => "DIR",
            NodeKind::Symlink { .. } => "SYMLINK",
        }
    }
}

/// One `ls` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub label: &'static str,
}

impl fmt::Display for DirEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_accessors_follow_kind() {
        let file = FileNode::new("a", 1, NodeKind::RegularFile);
        assert_eq!(file.type_label(), "FILE");
        assert!(file.children().is_empty());
        assert!(!file.is_dir());
        assert!(file.open_handles.is_empty());

        let dir = FileNode::new("d", 2, NodeKind::Directory { children: vec![3, 4] });
        assert!(dir.is_dir());
        assert_eq!(dir.children(), &[3, 4]);
        assert_eq!(dir.type_label(), "DIR");
    }

    #[test]
    fn stat_renders_links_only_when_present() {
        let mut d = Descriptor::new(3, DescriptorKind::File);
        assert_eq!(d.stat().to_string(), "id: 3\nfile_size_in_bytes: 0\ntype: FILE");
        d.link_names.push("b".into());
        d.size = 4;
        assert!(d.stat().to_string().contains("links: b"));
    }
}
