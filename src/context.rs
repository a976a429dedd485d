use crate::fs::config::FsConfig;
use crate::fs::filesystem::FileSystem;

/// Shell state shared by every command handler.
pub struct Context {
    pub(crate) fs: FileSystem,
    // nesting of `load` scripts currently running
    pub(crate) load_depth: u32,
}

impl Context {
    pub fn new(config: FsConfig) -> anyhow::Result<Self> {
        Ok(Self {
            fs: FileSystem::new(config)?,
            load_depth: 0,
        })
    }

    pub fn fs(&self) -> &FileSystem {
        &self.fs
    }
}
