use std::{
    fmt::Debug,
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context;
use fs_err::File;
use serde::Serialize;

/// Writes `value` as indented, newline-terminated JSON.
pub fn write_json<P: Into<PathBuf> + Debug, T: Serialize>(
    path: P,
    value: &T,
) -> anyhow::Result<()> {
    let path = path.into();
    (|| {
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writeln!(writer)?;
        writer.flush()?;
        anyhow::Ok(())
    })()
    .with_context(|| {
        format!(
            "While trying to write {} to {path:?}",
            std::any::type_name::<T>()
        )
    })
}
