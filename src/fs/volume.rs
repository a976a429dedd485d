//! Mounted filesystem state and the operations that run against it.

use crate::fs::bitmap::Bitmap;
use crate::fs::config::{FsConfig, ReadOrigin};
use crate::fs::consts::{MAX_SYMLINK_DEPTH, PATH_CURRENT, PATH_DELIM, PATH_PARENT};
use crate::fs::error::{FsError, FsResult};
use crate::fs::extent_tree::{Extent, ExtentTree};
use crate::fs::handle::OpenHandle;
use crate::fs::io::Storage;
use crate::fs::layout::{
    Descriptor, DescriptorId, DescriptorKind, DescriptorStat, DirEntry, FileNode, NodeId,
    NodeKind,
};
use crate::fs::namespace::Namespace;
use crate::fs::path;
use log::{debug, info, warn};
use std::collections::BTreeMap;

/// Usage numbers for `statfs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsStats {
    pub capacity: u32,
    pub block_size: u32,
    pub total_blocks: u32,
    pub free_blocks: u32,
    pub file_count: u32,
    pub max_files: u32,
    pub extent_count: usize,
    pub extent_height: i32,
}

pub struct Volume {
    config: FsConfig,
    bitmap: Bitmap,
    extents: ExtentTree,
    namespace: Namespace,
    descriptors: BTreeMap<DescriptorId, Descriptor>,
    storage: Storage,
    cwd: NodeId,
    max_files: u32,
    file_count: u32,
    next_descriptor: DescriptorId,
}

impl Volume {
    pub fn new(config: FsConfig, max_files: u32) -> Self {
        let root = Descriptor::new(0, DescriptorKind::Directory);
        let namespace = Namespace::new(root.id);
        let cwd = namespace.root();
        info!(
            "volume: {} bytes in {} blocks of {} bytes, {} files max",
            config.capacity,
            config.block_count(),
            config.bytes_per_block,
            max_files
        );
        Self {
            bitmap: Bitmap::new(config.block_count()),
            extents: ExtentTree::new(),
            namespace,
            descriptors: BTreeMap::from([(root.id, root)]),
            storage: Storage::new(config.capacity, config.bytes_per_block),
            cwd,
            max_files,
            file_count: 0,
            next_descriptor: 1,
            config,
        }
    }

    fn new_descriptor(&mut self, kind: DescriptorKind) -> DescriptorId {
        let id = self.next_descriptor;
        self.next_descriptor += 1;
        self.descriptors.insert(id, Descriptor::new(id, kind));
        id
    }

    fn descriptor(&self, id: DescriptorId) -> FsResult<&Descriptor> {
        self.descriptors
            .get(&id)
            .ok_or_else(|| FsError::not_found(format!("descriptor {id}")))
    }

    fn descriptor_mut(&mut self, id: DescriptorId) -> FsResult<&mut Descriptor> {
        self.descriptors
            .get_mut(&id)
            .ok_or_else(|| FsError::not_found(format!("descriptor {id}")))
    }

    fn release_descriptor(&mut self, id: DescriptorId) {
        if let Some(desc) = self.descriptors.get_mut(&id) {
            desc.refs = desc.refs.saturating_sub(1);
            if desc.refs == 0 {
                self.descriptors.remove(&id);
            }
        }
    }

    fn ensure_capacity(&self) -> FsResult<()> {
        if self.file_count >= self.max_files {
            return Err(FsError::no_space(format!(
                "file limit of {} reached",
                self.max_files
            )));
        }
        Ok(())
    }

    fn ensure_absent(&self, dir: NodeId, name: &str) -> FsResult<()> {
        match self.namespace.find_child_by_name(dir, name) {
            Some(_) => Err(FsError::AlreadyExists(name.to_string())),
            None => Ok(()),
        }
    }

    /// Directory holding the subject of `path`, plus the subject's name.
    ///
    /// The resolver walks into a final component that names a directory;
    /// here the subject is looked up in the directory containing it, so
    /// that step is undone.
    fn locate(&self, path: &str) -> FsResult<(NodeId, String)> {
        let parsed = path::parse(path)?;
        let name = parsed.subject()?.to_string();
        let resolution = self.namespace.resolve(self.cwd, &parsed)?;
        let dir = if resolution.entered_terminal {
            self.namespace
                .get(resolution.dir)?
                .parent
                .ok_or_else(|| FsError::invalid("cannot go above root"))?
        } else {
            resolution.dir
        };
        Ok((dir, name))
    }

    /// Existing node at `path`, following symlinks.
    fn lookup(&self, path: &str) -> FsResult<NodeId> {
        let mut path = path.to_string();
        for _ in 0..=MAX_SYMLINK_DEPTH {
            let (dir, name) = self.locate(&path)?;
            let id = self
                .namespace
                .find_child_by_name(dir, &name)
                .ok_or(FsError::NotFound(name))?;
            match &self.namespace.get(id)?.kind {
                NodeKind::Symlink { target } => path = target.clone(),
                _ => return Ok(id),
            }
        }
        Err(FsError::invalid("too many levels of symbolic links"))
    }

    /// Registered regular file holding `handle` open.
    fn find_open(&self, handle: OpenHandle) -> FsResult<NodeId> {
        self.namespace
            .registered()
            .find(|(_, n)| {
                !n.is_link
                    && n.descriptor == DescriptorId::from(handle.id)
                    && n.open_handles.contains(&handle)
            })
            .map(|(id, _)| id)
            .ok_or_else(|| FsError::not_found(format!("open handle {}", handle.pack())))
    }

    fn add_node(&mut self, dir: NodeId, node: FileNode) -> FsResult<NodeId> {
        let id = self.namespace.add_child(dir, node)?;
        self.file_count += 1;
        Ok(id)
    }

    fn extent_len(&self, extent: &Extent) -> u32 {
        extent.block_count * self.config.bytes_per_block
    }

    fn release_extent(&mut self, key: u32) -> Option<Extent> {
        let extent = self.extents.delete(key)?;
        self.bitmap
            .mark_range(extent.block_index, extent.block_count, true);
        debug!(
            "extent {:#x}: released blocks {}..{}",
            key,
            extent.block_index,
            extent.block_index + extent.block_count
        );
        Some(extent)
    }

    fn allocate_run(&mut self, blocks: u32) -> FsResult<u32> {
        let start = self.bitmap.find_free_run(blocks).ok_or_else(|| {
            FsError::no_space(format!("no free run of {blocks} blocks"))
        })?;
        self.bitmap.mark_range(start, blocks, false);
        debug!("allocated blocks {}..{}", start, start + blocks);
        Ok(start)
    }

    pub fn list_current_directory(&self) -> FsResult<Vec<DirEntry>> {
        let cwd = self.namespace.get(self.cwd)?;
        cwd.children()
            .iter()
            .map(|&c| {
                let node = self.namespace.get(c)?;
                Ok(DirEntry {
                    name: node.name.clone(),
                    label: node.type_label(),
                })
            })
            .collect()
    }

    pub fn stat(&self, id: DescriptorId) -> FsResult<DescriptorStat> {
        self.descriptor(id).map(Descriptor::stat)
    }

    pub fn pwd(&self) -> FsResult<String> {
        self.namespace.path_of(self.cwd)
    }

    pub fn create_file(&mut self, path: &str) -> FsResult<()> {
        self.ensure_capacity()?;
        let (dir, name) = self.locate(path)?;
        self.ensure_absent(dir, &name)?;
        let desc = self.new_descriptor(DescriptorKind::File);
        self.add_node(dir, FileNode::new(&name, desc, NodeKind::RegularFile))?;
        debug!("create {name}: descriptor {desc}");
        Ok(())
    }

    pub fn make_directory(&mut self, path: &str) -> FsResult<()> {
        self.ensure_capacity()?;
        let (dir, name) = self.locate(path)?;
        self.ensure_absent(dir, &name)?;
        let desc = self.new_descriptor(DescriptorKind::Directory);
        let children = Vec::new();
        self.add_node(dir, FileNode::new(&name, desc, NodeKind::Directory { children }))?;
        debug!("mkdir {name}: descriptor {desc}");
        Ok(())
    }

    pub fn remove_directory(&mut self, path: &str) -> FsResult<()> {
        let (dir, name) = self.locate(path)?;
        let target = self
            .namespace
            .find_child_by_name(dir, &name)
            .ok_or_else(|| FsError::not_found(name.as_str()))?;
        if target == self.cwd {
            return Err(FsError::invalid(format!("{name} is the current directory")));
        }
        let removed = self.namespace.remove_if_empty(dir, &name)?;
        self.release_descriptor(removed.descriptor);
        self.file_count -= 1;
        debug!("rmdir {name}");
        Ok(())
    }

    pub fn change_directory(&mut self, path: &str) -> FsResult<()> {
        let parsed = path::parse(path)?;
        let resolution = self.namespace.resolve(self.cwd, &parsed)?;
        if let Some(name) = &parsed.name {
            if !resolution.entered_terminal {
                return Err(FsError::not_found(format!("directory {name}")));
            }
        }
        self.cwd = resolution.dir;
        Ok(())
    }

    pub fn hard_link(&mut self, new_name: &str, existing_path: &str) -> FsResult<()> {
        if new_name.is_empty()
            || new_name.contains(PATH_DELIM)
            || new_name == PATH_CURRENT
            || new_name == PATH_PARENT
        {
            return Err(FsError::invalid(format!("bad link name '{new_name}'")));
        }
        let (dir, name) = self.locate(existing_path)?;
        let source = self
            .namespace
            .find_child_by_name(dir, &name)
            .ok_or_else(|| FsError::not_found(name.as_str()))?;
        let src = self.namespace.get(source)?;
        if !matches!(src.kind, NodeKind::RegularFile) {
            return Err(FsError::invalid(format!("{name} is not a regular file")));
        }
        if src.is_link || src.has_link {
            warn!("link: {name} is already part of a hard link");
            return Err(FsError::invalid(format!("{name} is already linked")));
        }
        let descriptor = src.descriptor;
        self.ensure_capacity()?;
        self.ensure_absent(dir, new_name)?;

        let mut node = FileNode::new(new_name, descriptor, NodeKind::RegularFile);
        node.is_link = true;
        self.add_node(dir, node)?;
        self.namespace.get_mut(source)?.has_link = true;
        let desc = self.descriptor_mut(descriptor)?;
        desc.refs += 1;
        desc.link_names.push(new_name.to_string());
        debug!("link {new_name} -> {name} (descriptor {descriptor})");
        Ok(())
    }

    pub fn unlink(&mut self, name: &str) -> FsResult<()> {
        let node = self
            .namespace
            .registered()
            .map(|(_, n)| n)
            .find(|n| n.name == name)
            .ok_or_else(|| FsError::not_found(name))?;
        if !node.is_link {
            return Err(FsError::invalid(format!("{name} is not a link")));
        }
        let descriptor = node.descriptor;

        let id = self
            .namespace
            .unlink_by_name(name)
            .ok_or_else(|| FsError::not_found(name))?;
        self.namespace.detach(id)?;
        self.file_count -= 1;
        if let Some(desc) = self.descriptors.get_mut(&descriptor) {
            if let Some(pos) = desc.link_names.iter().position(|n| n == name) {
                desc.link_names.remove(pos);
            }
        }
        self.release_descriptor(descriptor);
        debug!("unlink {name}");
        Ok(())
    }

    pub fn symbolic_link(&mut self, target: &str, path: &str) -> FsResult<()> {
        let parsed = path::parse(target)?;
        let resolution = self.namespace.resolve(self.cwd, &parsed)?;
        let mut target_path = self.namespace.path_of(resolution.dir)?;
        if let Some(name) = &parsed.name {
            if !resolution.entered_terminal {
                target_path.push(PATH_DELIM);
                target_path.push_str(name);
            }
        }

        self.ensure_capacity()?;
        let (dir, name) = self.locate(path)?;
        self.ensure_absent(dir, &name)?;
        let desc = self.new_descriptor(DescriptorKind::Symlink);
        debug!("symlink {name} -> {target_path}");
        self.add_node(
            dir,
            FileNode::new(&name, desc, NodeKind::Symlink { target: target_path }),
        )?;
        Ok(())
    }

    pub fn open(&mut self, path: &str) -> FsResult<OpenHandle> {
        let id = self.lookup(path)?;
        let node = self.namespace.get_mut(id)?;
        if node.is_link {
            return Err(FsError::invalid(format!("{} is a hard link", node.name)));
        }
        if !matches!(node.kind, NodeKind::RegularFile) {
            return Err(FsError::invalid(format!("{} is not a regular file", node.name)));
        }
        let desc_id = u16::try_from(node.descriptor)
            .map_err(|_| FsError::invalid("descriptor id does not fit an open handle"))?;
        // Lowest slot not held by a live handle.
        let slot = (0..=u16::MAX)
            .find(|s| !node.open_handles.iter().any(|h| h.slot == *s))
            .ok_or_else(|| FsError::no_space("open handle slots exhausted"))?;
        let handle = OpenHandle::new(desc_id, slot);
        node.open_handles.push(handle);
        debug!("open {}: handle {}", node.name, handle);
        Ok(handle)
    }

    pub fn close(&mut self, handle: OpenHandle) -> FsResult<()> {
        let id = self.find_open(handle)?;
        let node = self.namespace.get_mut(id)?;
        node.open_handles.retain(|h| *h != handle);
        debug!(
            "close {}: handle {}, {} still open",
            node.name,
            handle,
            node.open_handles.len()
        );
        Ok(())
    }

    pub fn read(&self, handle: OpenHandle, offset: u32, size: u32) -> FsResult<Vec<u8>> {
        let node = self.namespace.get(self.find_open(handle)?)?;
        let desc = self.descriptor(node.descriptor)?;
        if desc.size == 0 {
            return Err(FsError::invalid(format!("{} is empty", node.name)));
        }
        let extent = self
            .extents
            .find(desc.content)
            .ok_or_else(|| FsError::not_found(format!("extent of {}", node.name)))?;
        let length = self.extent_len(extent);
        if u64::from(offset) + u64::from(size) >= u64::from(length) {
            return Err(FsError::invalid(format!(
                "read of {size} bytes at {offset} reaches end of {length}-byte extent"
            )));
        }
        let mut start = self.storage.block_offset(extent.block_index);
        if self.config.read_origin == ReadOrigin::Offset {
            start += offset;
        }
        Ok(self.storage.read_span(start, size)?.to_vec())
    }

    /// Writes `size` bytes of `buf` into a freshly allocated extent.
    ///
    /// Blocks allocated before a failed bound check stay allocated.
    pub fn write(&mut self, handle: OpenHandle, buf: &[u8], offset: u32, size: u32) -> FsResult<()> {
        let id = self.find_open(handle)?;
        if size == 0 {
            return Err(FsError::invalid("zero-length write"));
        }
        let run = self.config.blocks_for(size);
        let start = self.allocate_run(run)?;

        let storage_offset = self.storage.block_offset(start);
        let copy_size = run * self.config.bytes_per_block;
        let end = u64::from(storage_offset) + u64::from(offset) + u64::from(copy_size);
        if end > u64::from(self.storage.capacity()) {
            warn!("write: {end} bytes past arena start exceeds capacity, blocks {start}.. stay allocated");
            return Err(FsError::no_space(format!(
                "write ending at byte {end} exceeds storage of {} bytes",
                self.storage.capacity()
            )));
        }
        self.storage.write_span(storage_offset, copy_size, buf)?;

        let address = self.storage.address_of(storage_offset);
        let (name, descriptor) = {
            let node = self.namespace.get(id)?;
            (node.name.clone(), node.descriptor)
        };
        let previous = self.descriptor(descriptor)?.content;
        if previous != 0 {
            self.release_extent(previous);
        }
        self.extents
            .insert(Extent::new(address, start, run, name.as_str()));
        let desc = self.descriptor_mut(descriptor)?;
        desc.content = address;
        desc.size = size;
        debug!("write {name}: {size} bytes at {address:#x} ({run} blocks from {start})");
        Ok(())
    }

    /// Resizes the file's extent. The index key is kept even when the run
    /// moves, so the key may no longer match the run's address.
    pub fn truncate(&mut self, path: &str, new_size: u32) -> FsResult<()> {
        let id = self.lookup(path)?;
        let (name, descriptor) = {
            let node = self.namespace.get(id)?;
            if !matches!(node.kind, NodeKind::RegularFile) {
                return Err(FsError::invalid(format!("{} is not a regular file", node.name)));
            }
            (node.name.clone(), node.descriptor)
        };
        let content = self.descriptor(descriptor)?.content;
        let extent = self
            .extents
            .find(content)
            .cloned()
            .ok_or_else(|| FsError::not_found(format!("extent of {name}")))?;

        if new_size == 0 {
            self.release_extent(content);
            let desc = self.descriptor_mut(descriptor)?;
            desc.content = 0;
            desc.size = 0;
            debug!("truncate {name}: emptied");
            return Ok(());
        }

        let old_len = self.extent_len(&extent);
        if new_size == old_len {
            return Ok(());
        }

        self.bitmap
            .mark_range(extent.block_index, extent.block_count, true);
        let run = self.config.blocks_for(new_size);
        let start = self.allocate_run(run)?;
        let new_len = run * self.config.bytes_per_block;

        let old_offset = self.storage.block_offset(extent.block_index);
        let new_offset = self.storage.block_offset(start);
        self.storage
            .move_span(old_offset, new_offset, old_len.min(new_len))?;
        if new_len > old_len {
            self.storage
                .zero_span(new_offset + old_len, new_len - old_len)?;
        }

        if let Some(node) = self.extents.find_mut(content) {
            node.block_index = start;
            node.block_count = run;
        }
        self.descriptor_mut(descriptor)?.size = new_size;
        debug!("truncate {name}: {old_len} -> {new_len} bytes, blocks from {start}");
        Ok(())
    }

    pub fn stats(&self) -> FsStats {
        FsStats {
            capacity: self.storage.capacity(),
            block_size: self.storage.block_size(),
            total_blocks: self.bitmap.num_bits(),
            free_blocks: self.bitmap.free_count(),
            file_count: self.file_count,
            max_files: self.max_files,
            extent_count: self.extents.len(),
            extent_height: self.extents.height(),
        }
    }

    pub fn extents(&self) -> Vec<Extent> {
        self.extents.in_order().into_iter().cloned().collect()
    }

    pub fn extent_of(&self, owner: &str) -> Option<Extent> {
        self.extents.find_by_owner(owner).cloned()
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn file_count(&self) -> u32 {
        self.file_count
    }
}
