use crate::errors::KitError;
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }

    /// Consume the `"<type> <size>\0"` header from a serialized object and
    /// return the type tag. Leaves the reader positioned at the payload.
    pub fn read_from_header(data_reader: &mut impl BufRead) -> anyhow::Result<ObjectType> {
        let mut type_tag = Vec::new();
        data_reader.read_until(b' ', &mut type_tag)?;

        let type_tag = String::from_utf8(type_tag)
            .map_err(|_| KitError::CorruptObject("non-utf8 type tag in header".to_string()))?;

        let mut size = Vec::new();
        data_reader.read_until(b'\0', &mut size)?;
        if size.last() != Some(&b'\0') {
            return Err(KitError::CorruptObject("truncated object header".to_string()).into());
        }

        Ok(ObjectType::try_from(type_tag.trim())?)
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = KitError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            other => Err(KitError::CorruptObject(format!(
                "invalid object type '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
