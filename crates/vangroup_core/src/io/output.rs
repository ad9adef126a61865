use std::{
    fs::File,
    io::{BufWriter, Write},
};

use crate::{Error, Result, algo::grouper::Grouping, io::options::GrouperOptions};

/// Serializes the grouping as a JSON array of per-van id arrays, newline
/// terminated, to the configured output file or stdout.
pub fn write_grouping(grouping: &Grouping, options: &GrouperOptions) -> Result<()> {
    match options.output_path() {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                Error::other(format!(
                    "failed to create output file {}: {e}",
                    path.display()
                ))
            })?;
            let mut writer = BufWriter::new(file);
            write_to(&mut writer, grouping)?;
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_to(&mut writer, grouping)?;
        }
    }
    Ok(())
}

fn write_to(writer: &mut impl Write, grouping: &Grouping) -> Result<()> {
    serde_json::to_writer(&mut *writer, &grouping.groups)
        .map_err(|e| Error::other(format!("failed to serialize groups: {e}")))?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_to;
    use crate::{algo::grouper::Grouping, io::input::JobId};

    #[test]
    fn write_to_emits_arrays_of_ids_in_group_order() {
        let grouping = Grouping {
            groups: vec![
                vec![JobId::Int(3), JobId::Int(1)],
                vec![JobId::Text("depot".to_string())],
            ],
        };

        let mut buf = Vec::new();
        write_to(&mut buf, &grouping).expect("write grouping");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "[[3,1],[\"depot\"]]\n");
    }

    #[test]
    fn write_to_renders_empty_groups_as_empty_arrays() {
        let grouping = Grouping {
            groups: vec![Vec::new(), Vec::new()],
        };

        let mut buf = Vec::new();
        write_to(&mut buf, &grouping).expect("write grouping");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "[[],[]]\n");
    }
}
