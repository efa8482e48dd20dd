use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::DictError;

///A string array over one contiguous block of 16-bit code units.
///
///All strings live back to back in a single buffer, each terminated by
///a zero unit, with parallel offset and size tables. Compared to a
///`Vec<String>` this keeps the whole store in three flat memory blocks
///that can be written to and read from disk in bulk, and lookups hand
///out borrowed unit slices without touching the heap.
#[derive(Clone, Debug, Default)]
pub struct StringArray {
    ///All strings back to back, each terminated by a zero unit
    data: Vec<u16>,
    ///Offset of each string in `data`
    pos: Vec<u32>,
    ///Size of each string in code units, excluding the terminator
    sizes: Vec<u32>,
}

impl StringArray {
    pub fn new() -> Self {
        StringArray::default()
    }

    ///Number of strings in the array.
    pub fn len(&self) -> usize {
        self.pos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    ///Size of the string at `index` in code units.
    pub fn size_of(&self, index: usize) -> usize {
        self.sizes[index] as usize
    }

    ///Borrowed view of the string at `index`, valid as long as the
    ///array is not modified.
    pub fn view(&self, index: usize) -> &[u16] {
        let start = self.pos[index] as usize;
        &self.data[start..start + self.sizes[index] as usize]
    }

    ///Deep copy of the string at `index`.
    pub fn to_string(&self, index: usize) -> String {
        String::from_utf16_lossy(self.view(index))
    }

    ///True if `text` equals the string at `index`.
    pub fn is_equal(&self, text: &str, index: usize) -> bool {
        let view = self.view(index);
        let mut units = text.encode_utf16();
        let mut i = 0;
        for unit in &mut units {
            if i >= view.len() || view[i] != unit {
                return false;
            }
            i += 1;
        }
        i == view.len()
    }

    ///Appends a string to the array.
    pub fn append(&mut self, text: &str) -> Result<(), DictError> {
        let units: Vec<u16> = text.encode_utf16().collect();
        self.data.try_reserve(units.len() + 1)?;
        self.pos.try_reserve(1)?;
        self.sizes.try_reserve(1)?;
        self.pos.push(self.data.len() as u32);
        self.sizes.push(units.len() as u32);
        self.data.extend_from_slice(&units);
        self.data.push(0);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.pos.clear();
        self.sizes.clear();
    }

    ///Writes the array as three raw blocks: the offset table, the size
    ///table and the unit buffer, prefixed by their dimensions.
    pub fn save<W: Write>(&self, out: &mut W) -> Result<(), DictError> {
        out.write_u32::<BigEndian>(self.pos.len() as u32)?;
        out.write_u32::<BigEndian>(self.data.len() as u32)?;
        for &p in &self.pos {
            out.write_u32::<BigEndian>(p)?;
        }
        for &s in &self.sizes {
            out.write_u32::<BigEndian>(s)?;
        }
        for &unit in &self.data {
            out.write_u16::<BigEndian>(unit)?;
        }
        Ok(())
    }

    ///Reads an array written by [`StringArray::save`]. Significantly
    ///faster than element-wise string deserialization since each block
    ///arrives in one read.
    pub fn load<R: Read>(input: &mut R) -> Result<StringArray, DictError> {
        let count = input.read_u32::<BigEndian>()? as usize;
        let filled = input.read_u32::<BigEndian>()? as usize;

        let mut pos = Vec::new();
        pos.try_reserve_exact(count)?;
        pos.resize(count, 0u32);
        input.read_u32_into::<BigEndian>(&mut pos)?;

        let mut sizes = Vec::new();
        sizes.try_reserve_exact(count)?;
        sizes.resize(count, 0u32);
        input.read_u32_into::<BigEndian>(&mut sizes)?;

        let mut data = Vec::new();
        data.try_reserve_exact(filled)?;
        data.resize(filled, 0u16);
        input.read_u16_into::<BigEndian>(&mut data)?;

        Ok(StringArray { data, pos, sizes })
    }
}
