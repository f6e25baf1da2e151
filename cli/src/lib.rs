use encoding_rs::Encoding;
use engine::ThresholdTable;
use std::{fs, path::Path};

/// Read a text file, honouring a UTF-8/UTF-16 byte order mark if present.
pub fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

/// A YAML table file, or the built-in table when no path is given.
pub fn load_table(path: Option<&Path>) -> anyhow::Result<ThresholdTable> {
    match path {
        Some(p) => {
            let text = read_text_auto(p)?;
            Ok(ThresholdTable::from_yaml_str(&text)?)
        }
        None => Ok(ThresholdTable::standard()?),
    }
}
