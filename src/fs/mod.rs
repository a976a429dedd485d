pub mod bitmap;
pub mod config;
pub mod consts;
pub mod error;
pub mod extent_tree;
pub mod filesystem;
pub mod handle;
pub mod io;
pub mod layout;
pub mod namespace;
pub mod path;
pub mod volume;
