//! Vertex attributes.
//!
//! Attributes describe how the components of a [`VertexBuffer`] row are fed to the vertex shader.
//! They are packed: the first attribute starts at the first component of a row, the next one
//! right after it, and so on. A row spans `columns` floats, which is the stride.
//!
//! [`VertexBuffer`]: crate::buffer::VertexBuffer

use std::error;
use std::fmt;
use std::iter::FromIterator;
use std::mem;
use std::slice;

/// Attribute errors.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AttributeError {
  /// An attribute must have between 1 and 4 components.
  InvalidSize(u32),

  /// Attributes require more components than a vertex row provides.
  Overflow { columns: usize, required: usize },
}

impl fmt::Display for AttributeError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      AttributeError::InvalidSize(size) => {
        write!(f, "invalid attribute size {}; expected 1 to 4", size)
      }

      AttributeError::Overflow { columns, required } => write!(
        f,
        "attributes require {} components but vertices only have {}",
        required, columns
      ),
    }
  }
}

impl error::Error for AttributeError {}

/// A float vertex attribute.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Attribute {
  index: u32,
  size: u32,
}

impl Attribute {
  /// Attribute at shader location `index`, made of `size` floats.
  pub fn new(index: u32, size: u32) -> Result<Self, AttributeError> {
    if (1..=4).contains(&size) {
      Ok(Attribute { index, size })
    } else {
      Err(AttributeError::InvalidSize(size))
    }
  }

  /// Shader location.
  pub fn index(&self) -> u32 {
    self.index
  }

  /// Number of components.
  pub fn size(&self) -> u32 {
    self.size
  }
}

/// Where an attribute lives in a vertex buffer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct AttributeLayout {
  /// Shader location.
  pub index: u32,
  /// Number of float components.
  pub size: u32,
  /// Bytes between two consecutive vertices.
  pub stride: usize,
  /// Byte offset of the first component inside a vertex.
  pub offset: usize,
}

/// Ordered list of attributes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AttributeList {
  attributes: Vec<Attribute>,
}

impl AttributeList {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, attribute: Attribute) {
    self.attributes.push(attribute);
  }

  pub fn iter(&self) -> slice::Iter<Attribute> {
    self.attributes.iter()
  }

  pub fn len(&self) -> usize {
    self.attributes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.attributes.is_empty()
  }

  /// Compute the packed layout of the attributes in vertices of `columns` floats.
  pub fn layouts(&self, columns: usize) -> Result<Vec<AttributeLayout>, AttributeError> {
    let required: usize = self.attributes.iter().map(|a| a.size as usize).sum();

    if required > columns {
      return Err(AttributeError::Overflow { columns, required });
    }

    let float_size = mem::size_of::<f32>();
    let stride = columns * float_size;
    let mut cursor = 0;

    let layouts = self
      .attributes
      .iter()
      .map(|attr| {
        let layout = AttributeLayout {
          index: attr.index,
          size: attr.size,
          stride,
          offset: cursor * float_size,
        };

        cursor += attr.size as usize;
        layout
      })
      .collect();

    Ok(layouts)
  }
}

impl From<Vec<Attribute>> for AttributeList {
  fn from(attributes: Vec<Attribute>) -> Self {
    AttributeList { attributes }
  }
}

impl FromIterator<Attribute> for AttributeList {
  fn from_iter<I>(iter: I) -> Self
  where
    I: IntoIterator<Item = Attribute>,
  {
    AttributeList {
      attributes: iter.into_iter().collect(),
    }
  }
}

impl<'a> IntoIterator for &'a AttributeList {
  type Item = &'a Attribute;
  type IntoIter = slice::Iter<'a, Attribute>;

  fn into_iter(self) -> Self::IntoIter {
    self.attributes.iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn size_bounds() {
    assert_eq!(Attribute::new(0, 0), Err(AttributeError::InvalidSize(0)));
    assert_eq!(Attribute::new(0, 5), Err(AttributeError::InvalidSize(5)));
    assert!(Attribute::new(0, 1).is_ok());
    assert!(Attribute::new(0, 4).is_ok());
  }

  #[test]
  fn packed_layout() {
    // position (3) + color (4) + uv (2)
    let list = [(0, 3), (1, 4), (2, 2)]
      .iter()
      .map(|&(i, s)| Attribute::new(i, s).unwrap())
      .collect::<AttributeList>();
    let layouts = list.layouts(9).unwrap();

    let offsets = layouts.iter().map(|l| l.offset).collect::<Vec<_>>();
    assert_eq!(offsets, vec![0, 12, 28]);
    assert!(layouts.iter().all(|l| l.stride == 36));
  }

  #[test]
  fn unused_trailing_columns_keep_the_stride() {
    let list = AttributeList::from(vec![Attribute::new(0, 2).unwrap()]);
    let layouts = list.layouts(3).unwrap();

    assert_eq!(
      layouts,
      vec![AttributeLayout {
        index: 0,
        size: 2,
        stride: 12,
        offset: 0
      }]
    );
  }

  #[test]
  fn overflow() {
    let list = AttributeList::from(vec![
      Attribute::new(0, 3).unwrap(),
      Attribute::new(1, 2).unwrap(),
    ]);

    assert_eq!(
      list.layouts(4),
      Err(AttributeError::Overflow {
        columns: 4,
        required: 5
      })
    );
  }

  #[test]
  fn empty_list_has_no_layout() {
    assert_eq!(AttributeList::new().layouts(0), Ok(Vec::new()));
  }
}
