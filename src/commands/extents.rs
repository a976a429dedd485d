use crate::context::Context;

/// extents
/// Dumps the extent index in key order, one node per line:
///   `0x1000  blocks 0..5  (5)  owner a`
pub fn handle_argv(_argv: &[&str], context: &mut Context) -> anyhow::Result<()> {
    let extents = context.fs.extents()?;
    if extents.is_empty() {
        println!("(no extents)");
    }
    for e in extents {
        println!(
            "{:#x}  blocks {}..{}  ({})  owner {}",
            e.key,
            e.block_index,
            e.block_index + e.block_count,
            e.block_count,
            e.owner
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::*;

    #[test]
    fn extents_after_write() {
        let mut ctx = mounted_context(4);
        handle_argv(&[], &mut ctx).unwrap();
        ctx.fs.create_file("a").unwrap();
        let h = ctx.fs.open("a").unwrap();
        ctx.fs.write(h, b"abc", 0, 3).unwrap();
        handle_argv(&[], &mut ctx).unwrap();
        assert_eq!(ctx.fs.extent_of("a").unwrap().unwrap().block_count, 3);
    }
}
