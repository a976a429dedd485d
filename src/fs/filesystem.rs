use crate::fs::bitmap::Bitmap;
use crate::fs::config::FsConfig;
use crate::fs::consts::MAX_DESCRIPTORS;
use crate::fs::error::{FsError, FsResult};
use crate::fs::extent_tree::Extent;
use crate::fs::handle::OpenHandle;
use crate::fs::layout::{DescriptorId, DescriptorStat, DirEntry};
use crate::fs::volume::{FsStats, Volume};
use log::info;

/// The filesystem engine.
///
/// `format` fixes the file limit, `mount` builds a fresh volume (bitmap,
/// extent index, namespace and storage), `unmount` drops it again. Every
/// other operation needs a formatted and mounted engine and fails with
/// [`FsError::NotReady`] otherwise.
pub struct FileSystem {
    config: FsConfig,
    max_files: u32,
    formatted: bool,
    volume: Option<Volume>,
}

impl FileSystem {
    pub fn new(config: FsConfig) -> FsResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            max_files: 0,
            formatted: false,
            volume: None,
        })
    }

    pub fn is_formatted(&self) -> bool {
        self.formatted
    }

    pub fn is_mounted(&self) -> bool {
        self.volume.is_some()
    }

    pub fn max_files(&self) -> u32 {
        self.max_files
    }

    fn volume(&self) -> FsResult<&Volume> {
        match &self.volume {
            Some(volume) if self.formatted => Ok(volume),
            _ => Err(FsError::NotReady),
        }
    }

    fn volume_mut(&mut self) -> FsResult<&mut Volume> {
        match &mut self.volume {
            Some(volume) if self.formatted => Ok(volume),
            _ => Err(FsError::NotReady),
        }
    }

    /// Resets the engine to formatted-but-unmounted. Formatting a mounted
    /// engine unmounts it first.
    pub fn format(&mut self, max_files: u32) -> FsResult<()> {
        if max_files > MAX_DESCRIPTORS {
            return Err(FsError::invalid(format!(
                "{max_files} files requested, at most {MAX_DESCRIPTORS} supported"
            )));
        }
        if self.volume.take().is_some() {
            info!("format: unmounting current volume");
        }
        self.max_files = max_files;
        self.formatted = true;
        info!("formatted for {max_files} files");
        Ok(())
    }

    pub fn mount(&mut self) -> FsResult<()> {
        if !self.formatted {
            return Err(FsError::NotReady);
        }
        if self.volume.is_some() {
            return Err(FsError::invalid("already mounted"));
        }
        self.volume = Some(Volume::new(self.config, self.max_files));
        info!("mounted");
        Ok(())
    }

    pub fn unmount(&mut self) -> FsResult<()> {
        self.volume()?;
        self.volume = None;
        info!("unmounted");
        Ok(())
    }

    pub fn list_current_directory(&self) -> FsResult<Vec<DirEntry>> {
        self.volume()?.list_current_directory()
    }

    pub fn stat(&self, id: DescriptorId) -> FsResult<DescriptorStat> {
        self.volume()?.stat(id)
    }

    pub fn pwd(&self) -> FsResult<String> {
        self.volume()?.pwd()
    }

    pub fn create_file(&mut self, path: &str) -> FsResult<()> {
        self.volume_mut()?.create_file(path)
    }

    pub fn make_directory(&mut self, path: &str) -> FsResult<()> {
        self.volume_mut()?.make_directory(path)
    }

    pub fn remove_directory(&mut self, path: &str) -> FsResult<()> {
        self.volume_mut()?.remove_directory(path)
    }

    pub fn change_directory(&mut self, path: &str) -> FsResult<()> {
        self.volume_mut()?.change_directory(path)
    }

    pub fn hard_link(&mut self, new_name: &str, existing_path: &str) -> FsResult<()> {
        self.volume_mut()?.hard_link(new_name, existing_path)
    }

    pub fn symbolic_link(&mut self, target: &str, path: &str) -> FsResult<()> {
        self.volume_mut()?.symbolic_link(target, path)
    }

    pub fn unlink(&mut self, name: &str) -> FsResult<()> {
        self.volume_mut()?.unlink(name)
    }

    /// Opens `path` and returns the packed handle.
    pub fn open(&mut self, path: &str) -> FsResult<u32> {
        self.volume_mut()?.open(path).map(OpenHandle::pack)
    }

    pub fn close(&mut self, handle: u32) -> FsResult<()> {
        self.volume_mut()?.close(OpenHandle::unpack(handle))
    }

    pub fn read(&self, handle: u32, offset: u32, size: u32) -> FsResult<Vec<u8>> {
        self.volume()?.read(OpenHandle::unpack(handle), offset, size)
    }

    pub fn write(&mut self, handle: u32, buf: &[u8], offset: u32, size: u32) -> FsResult<()> {
        self.volume_mut()?
            .write(OpenHandle::unpack(handle), buf, offset, size)
    }

    pub fn truncate(&mut self, path: &str, new_size: u32) -> FsResult<()> {
        self.volume_mut()?.truncate(path, new_size)
    }

    pub fn stats(&self) -> FsResult<FsStats> {
        Ok(self.volume()?.stats())
    }

    pub fn extents(&self) -> FsResult<Vec<Extent>> {
        Ok(self.volume()?.extents())
    }

    pub fn extent_of(&self, owner: &str) -> FsResult<Option<Extent>> {
        Ok(self.volume()?.extent_of(owner))
    }

    pub fn file_count(&self) -> FsResult<u32> {
        Ok(self.volume()?.file_count())
    }

    pub fn bitmap(&self) -> FsResult<&Bitmap> {
        Ok(self.volume()?.bitmap())
    }
}
