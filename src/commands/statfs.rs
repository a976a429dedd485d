use crate::context::Context;

/// statfs [--map]
/// Prints basic filesystem statistics:
/// - arena size and block size
/// - blocks: total, used, free
/// - files: used and limit
/// - extent index: node count and height
///
/// `--map` appends the block bitmap, `1` for a free block.
pub fn handle_argv(argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    super::expect_args(argv, 0, 1, "statfs [--map]")?;
    let show_map = match argv.first() {
        None => false,
        Some(&"--map") => true,
        Some(other) => anyhow::bail!("unknown statfs option '{other}'"),
    };

    let stats = context.fs.stats()?;
    println!("File system size: {} B", stats.capacity);
    println!("Block size: {} B", stats.block_size);
    println!(
        "Blocks: all={} used={} free={}",
        stats.total_blocks,
        stats.total_blocks - stats.free_blocks,
        stats.free_blocks
    );
    println!("Files: used={} limit={}", stats.file_count, stats.max_files);
    println!(
        "Extent index: nodes={} height={}",
        stats.extent_count, stats.extent_height
    );
    if show_map {
        println!("{}", context.fs.bitmap()?);
    }
    Ok(())
}
