//! Memory dump command handlers
//!
//! Handlers for reading structs and walking lists out of raw dump files.

use super::layout::resolve;
use anyhow::{Context, Result};
use btypes::{Binding, DumpFile, FieldValue, HostVersion, MemorySource, Pointee, Value, View};
use std::path::Path;

/// Parse a hex or decimal address string
fn parse_address(address: &str) -> Result<usize> {
    if address.starts_with("0x") || address.starts_with("0X") {
        usize::from_str_radix(&address[2..], 16).context("Invalid hex address")
    } else {
        address.parse::<usize>().context("Invalid address")
    }
}

fn open_dump(path: &Path, base: &str) -> Result<DumpFile> {
    let base = parse_address(base)?;
    DumpFile::open(path, base)
        .with_context(|| format!("Failed to open dump file {}", path.display()))
}

/// Render a decoded value for display
fn format_value(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Char(c) if c.is_ascii_graphic() => format!("{} '{}'", c, *c as char),
        Value::Char(c) => c.to_string(),
        Value::Int(v) => v.to_string(),
        Value::UInt(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::Pointer(p) => format!("{:#x}", p),
        Value::Bytes(bytes) => format_bytes(bytes),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", inner.join(", "))
        }
    }
}

/// Printable NUL-terminated text is shown quoted, anything else as hex
fn format_bytes(bytes: &[u8]) -> String {
    let text = bytes.split(|&b| b == 0).next().unwrap_or_default();
    let printable = text.iter().all(|b| b.is_ascii_graphic() || *b == b' ');
    if printable && (!text.is_empty() || bytes.iter().all(|&b| b == 0)) {
        format!("{:?}", String::from_utf8_lossy(text))
    } else {
        hex::encode(bytes)
    }
}

fn format_field(value: FieldValue<'_>) -> String {
    match value {
        FieldValue::Value(v) => format_value(&v),
        FieldValue::Struct(view) => format!("{:?}", view),
        FieldValue::Pointer(ptr) if ptr.is_null() => "NULL".to_string(),
        FieldValue::Pointer(ptr) if *ptr.target() == Pointee::CString => match ptr.read_cstring() {
            Ok(Some(text)) => format!("{:?} {:?}", ptr, text),
            _ => format!("{:?}", ptr),
        },
        FieldValue::Pointer(ptr) => format!("{:?}", ptr),
        FieldValue::List(list) => format!(
            "ListBase(first={:#x}, last={:#x})",
            list.first(),
            list.last()
        ),
    }
}

/// Every field of `view` with its rendered value
///
/// Fields that cannot be read are rendered as the error rather than
/// aborting the whole struct.
pub fn render_fields(view: &View<'_>) -> Vec<(String, String)> {
    view.layout()
        .fields()
        .iter()
        .map(|field| {
            let rendered = match view.get(&field.name) {
                Ok(value) => format_field(value),
                Err(e) => format!("<{}>", e),
            };
            (field.name.clone(), rendered)
        })
        .collect()
}

/// Handle the read command
pub fn read(
    dump: &Path,
    base: &str,
    schema: &str,
    address: &str,
    version: HostVersion,
    raw: bool,
) -> Result<()> {
    let source = open_dump(dump, base)?;
    let table = resolve(version)?;
    let address = parse_address(address)?;
    let view = Binding::new(&source, &table).from_address(schema, address)?;

    println!("{:?} ({} bytes, host {})", view, view.size(), version);
    for (name, value) in render_fields(&view) {
        println!("  {:<32} {}", name, value);
    }

    if raw {
        let bytes = source
            .read_bytes(address, view.size())
            .context("Failed to read struct bytes")?;
        println!();
        println!("{}", hex::encode(bytes));
    }

    Ok(())
}

/// Addresses of the nodes of the list headed at `address`, and optionally
/// one rendered field of each
pub fn walk_list(
    binding: Binding<'_>,
    node: &str,
    address: usize,
    field: Option<&str>,
    limit: usize,
) -> Result<Vec<(usize, Option<String>)>> {
    let list = binding.list_at(address, Some(node))?;
    let mut out = Vec::new();
    for view in list.iter()?.take(limit) {
        let rendered = match field {
            Some(name) => Some(match view.get(name) {
                Ok(value) => format_field(value),
                Err(e) => format!("<{}>", e),
            }),
            None => None,
        };
        out.push((view.address(), rendered));
    }
    if out.len() == limit {
        tracing::warn!("Stopped walking {} list after {} nodes", node, limit);
    }
    Ok(out)
}

/// Handle the walk command
pub fn walk(
    dump: &Path,
    base: &str,
    node: &str,
    address: &str,
    field: Option<&str>,
    limit: usize,
    version: HostVersion,
) -> Result<()> {
    let source = open_dump(dump, base)?;
    let table = resolve(version)?;
    let address = parse_address(address)?;
    let binding = Binding::new(&source, &table);

    let nodes = walk_list(binding, node, address, field, limit)?;
    println!("{} {} nodes at {:#x}", nodes.len(), node, address);
    for (i, (node_address, value)) in nodes.iter().enumerate() {
        match value {
            Some(value) => println!("  [{}] {:#x}  {}", i, node_address, value),
            None => println!("  [{}] {:#x}", i, node_address),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use btypes::MockMemorySource;
    use std::io::Write;

    const BASE: usize = 0x2000;

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address("0x1F00").unwrap(), 0x1f00);
        assert_eq!(parse_address("4096").unwrap(), 4096);
        assert!(parse_address("0xZZ").is_err());
        assert!(parse_address("nope").is_err());
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(b"Text\0\0\0"), "\"Text\"");
        assert_eq!(format_bytes(&[0, 0, 0]), "\"\"");
        assert_eq!(format_bytes(&[0xde, 0xad, 0x00]), "dead00");
    }

    #[test]
    fn test_render_fields_from_dump() {
        let table = resolve(HostVersion::new(3, 3, 0)).unwrap();

        let mut bytes = Vec::new();
        for edge in [1i32, 11, 2, 22] {
            bytes.extend_from_slice(&edge.to_le_bytes());
        }
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();
        file.flush().unwrap();

        let dump = DumpFile::open(file.path(), BASE).unwrap();
        let view = Binding::new(&dump, &table).from_address("rcti", BASE).unwrap();
        let fields = render_fields(&view);

        assert_eq!(
            fields,
            vec![
                ("xmin".to_string(), "1".to_string()),
                ("xmax".to_string(), "11".to_string()),
                ("ymin".to_string(), "2".to_string()),
                ("ymax".to_string(), "22".to_string()),
            ]
        );
    }

    #[test]
    fn test_walk_text_lines() {
        let table = resolve(HostVersion::new(3, 3, 0)).unwrap();
        let memory = MockMemorySource::new(0x400, BASE);
        let binding = Binding::new(&memory, &table);

        let text = binding.from_address("Text", BASE).unwrap();
        let head = BASE + text.offset_of("lines").unwrap();
        let nodes = [BASE + 0x200, BASE + 0x280, BASE + 0x300];
        memory.write_ptr(head, nodes[0]).unwrap();
        memory.write_ptr(head + 8, nodes[2]).unwrap();
        for (i, &node) in nodes.iter().enumerate() {
            let line = binding.from_address("TextLine", node).unwrap();
            line.set("len", i as i32 * 10).unwrap();
            if let Some(&next) = nodes.get(i + 1) {
                line.set_ptr("next", next).unwrap();
            }
            if i > 0 {
                line.set_ptr("prev", nodes[i - 1]).unwrap();
            }
        }

        let walked = walk_list(binding, "TextLine", head, Some("len"), 100).unwrap();
        assert_eq!(
            walked,
            vec![
                (nodes[0], Some("0".to_string())),
                (nodes[1], Some("10".to_string())),
                (nodes[2], Some("20".to_string())),
            ]
        );

        let limited = walk_list(binding, "TextLine", head, None, 2).unwrap();
        assert_eq!(limited, vec![(nodes[0], None), (nodes[1], None)]);
    }
}
