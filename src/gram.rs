use std::collections::HashMap;
use std::io::{Read, Write};
use std::sync::Arc;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::db::{read_wire_string, write_wire_string, ShallowBackend};
use crate::encode::code_units;
use crate::error::DictError;
use crate::keylist::KeyList;
use crate::types::Key;

///An ordered collection of shared references to key lists.
///
///One gram may resolve to several physical lists because lists are
///shared between a gram and all its retained prefixes. `value_count`
///caches the summed size of the referenced lists; the node never
///maintains it on its own, after any insertion [`GramNode::recount`]
///has to run before the count is read again.
#[derive(Default)]
pub struct GramNode {
    lists: Vec<Arc<KeyList>>,
    value_count: u32,
}

impl GramNode {
    pub fn new() -> Self {
        GramNode::default()
    }

    ///Appends a shared list reference. Call [`GramNode::recount`]
    ///afterwards.
    pub fn push(&mut self, list: Arc<KeyList>) {
        self.lists.push(list);
    }

    ///Appends a key to the first (owning) list. Call
    ///[`GramNode::recount`] afterwards.
    pub fn append_key(&self, key: Key) {
        debug_assert!(!self.lists.is_empty());
        self.lists[0].append(key);
    }

    pub fn lists(&self) -> &[Arc<KeyList>] {
        &self.lists
    }

    ///Summed size of the referenced lists. Only correct when the
    ///references point at distinct lists and no insertion happened
    ///since the last recount.
    pub fn value_count(&self) -> u32 {
        self.value_count
    }

    pub fn recount(&mut self) -> u32 {
        self.value_count = self.lists.iter().map(|list| list.size()).sum();
        self.value_count
    }

    pub(crate) fn save_shallow<W: Write>(&self, out: &mut W) -> Result<(), DictError> {
        out.write_u32::<BigEndian>(self.lists.len() as u32)?;
        for list in &self.lists {
            list.save_shallow(out)?;
        }
        Ok(())
    }

    pub(crate) fn save_deep<W: Write>(&self, out: &mut W, debug: bool) -> Result<(), DictError> {
        out.write_u32::<BigEndian>(self.lists.len() as u32)?;
        for list in &self.lists {
            list.save_deep(out, debug)?;
        }
        Ok(())
    }

    fn load_deep<R: Read>(input: &mut R) -> Result<GramNode, DictError> {
        let mut node = GramNode::new();
        let count = input.read_u32::<BigEndian>()?;
        for _ in 0..count {
            let (id, _size, keys) = KeyList::read_deep_record(input)?;
            node.push(Arc::new(KeyList::from_deep_record(id, keys)));
        }
        Ok(node)
    }
}

///The inverted index: gram strings to gram nodes.
///
///What makes this structure more than a plain hash map is suffix
///sharing. Looking up any prefix of an indexed gram, down to
///`min_gram_size` units, must resolve to the key lists of that gram as
///well.
///
///Example: the gram "foob" of entry 11 is inserted. Besides
///
///```text
///    "foob" --> [11, ...]
///```
///
///the prefixes also have to know about the list:
///
///```text
///    "foo"  --> [11, ...]
///    "fo"   --> [11, ...]
///```
///
///Copies of the list would waste space, so the nodes of the prefixes
///hold shared references to the one list owned by "foob". Where two
///grams share a prefix the prefix node references both lists:
///
///```text
///    "foob" ---> [a]          a ---> [7, 10, 13, ...]
///    "fooc" ---> [b]          b ---> [8, 12, 4, 6, ...]
///    "foo"  ---> [a, b]
///    "fo"   ---> [a, b]
///```
///
///The companion `distinctive` table holds every owning list exactly
///once; it exists so serialization can enumerate the lists without
///having to deduplicate the shared references.
pub struct GramHash {
    nodes: HashMap<String, GramNode>,
    distinctive: HashMap<String, GramNode>,
    min_gram_size: u32,
    max_gram_size: u32,
    ///Highest posting list id issued so far; ids are per dictionary
    last_id: u32,
}

impl GramHash {
    pub fn new(max_gram_size: u32, min_gram_size: u32) -> Self {
        GramHash {
            nodes: HashMap::new(),
            distinctive: HashMap::new(),
            min_gram_size,
            max_gram_size,
            last_id: 0,
        }
    }

    pub fn min_gram_size(&self) -> u32 {
        self.min_gram_size
    }

    pub fn max_gram_size(&self) -> u32 {
        self.max_gram_size
    }

    ///Number of gram keys (including all shared prefixes).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn distinctive_count(&self) -> usize {
        self.distinctive.len()
    }

    pub fn contains(&self, gram: &str) -> bool {
        self.nodes.contains_key(gram)
    }

    pub fn node(&self, gram: &str) -> Option<&GramNode> {
        self.nodes.get(gram)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &GramNode)> {
        self.nodes.iter()
    }

    pub(crate) fn distinctive_iter(&self) -> impl Iterator<Item = (&String, &GramNode)> {
        self.distinctive.iter()
    }

    fn new_id(&mut self) -> Result<u32, DictError> {
        if self.last_id == u32::MAX {
            return Err(DictError::OutOfIds);
        }
        self.last_id += 1;
        Ok(self.last_id)
    }

    ///Keeps the id allocator ahead of ids read back from disk.
    fn note_id(&mut self, id: u32) {
        if id > self.last_id {
            self.last_id = id;
        }
    }

    ///Inserts a key for `gram` and all of its prefixes down to
    ///`min_gram_size` units.
    ///
    ///If the head of the gram is already indexed the key goes straight
    ///into that head's owning list, the one created when the head first
    ///appeared. This expands a shared container directly, so every
    ///cached `value_count` pointing at it goes stale;
    ///[`GramHash::recount_all_nodes`] has to run once the bulk
    ///insertion is over.
    pub fn insert(&mut self, gram: &[u16], key: Key) -> Result<(), DictError> {
        let size = (self.max_gram_size as usize).min(gram.len());
        let head = &gram[..size];
        debug_assert!(head.len() >= self.min_gram_size as usize);

        let head_key = String::from_utf16_lossy(head);
        if self.nodes.contains_key(&head_key) {
            let node = self.nodes.get_mut(&head_key).expect("node after check");
            node.append_key(key);
        } else {
            let list = Arc::new(KeyList::new(self.new_id()?));
            list.append(key);
            let mut node = GramNode::new();
            node.push(Arc::clone(&list));
            self.distinctive.insert(head_key, node);
            self.insert_shared(head, &list);
        }
        Ok(())
    }

    ///Registers a shared reference to `list` for `gram` and every
    ///prefix down to `min_gram_size`.
    fn insert_shared(&mut self, gram: &[u16], list: &Arc<KeyList>) {
        let mut size = gram.len();
        while size >= self.min_gram_size as usize {
            let subgram = String::from_utf16_lossy(&gram[..size]);
            self.nodes
                .entry(subgram)
                .or_default()
                .push(Arc::clone(list));
            size -= 1;
        }
    }

    ///Re-registers a node read back from disk: its lists become the
    ///distinctive lists of `gram` and are shared into all prefixes.
    fn insert_loaded_node(&mut self, gram: &str, node: GramNode) {
        let units = code_units(gram);
        for list in node.lists() {
            self.note_id(list.id());
            self.insert_shared(&units, list);
        }
        self.distinctive.insert(gram.to_string(), node);
    }

    ///Recalculates the cached `value_count` of every node. Must run
    ///after bulk insertion and after deserialization.
    pub fn recount_all_nodes(&mut self) {
        for node in self.nodes.values_mut() {
            node.recount();
        }
        for node in self.distinctive.values_mut() {
            node.recount();
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.distinctive.clear();
        self.last_id = 0;
    }

    ///Writes one record per distinctive gram: the gram, the reference
    ///count and the (id, size) header of each list.
    pub(crate) fn save_shallow<W: Write>(&self, out: &mut W) -> Result<(), DictError> {
        out.write_u32::<BigEndian>(self.distinctive.len() as u32)?;
        for (gram, node) in self.distinctive.iter() {
            write_wire_string(out, gram)?;
            node.save_shallow(out)?;
        }
        Ok(())
    }

    ///Writes one record per distinctive gram with the full payloads
    ///inline.
    pub(crate) fn save_deep<W: Write>(&self, out: &mut W, debug: bool) -> Result<(), DictError> {
        out.write_u32::<BigEndian>(self.distinctive.len() as u32)?;
        for (gram, node) in self.distinctive.iter() {
            write_wire_string(out, gram)?;
            node.save_deep(out, debug)?;
        }
        Ok(())
    }

    ///Reads the shallow dump into raw records: per distinctive gram the
    ///(id, size) headers of its lists. The raw form exists because the
    ///dump precedes the id-to-offset map in the index file, and stubs
    ///cannot be built before the backend is.
    pub(crate) fn read_shallow_dump<R: Read>(
        input: &mut R,
    ) -> Result<Vec<(String, Vec<(u32, u32)>)>, DictError> {
        let count = input.read_u32::<BigEndian>()?;
        let mut dump = Vec::new();
        dump.try_reserve(count as usize)?;
        for _ in 0..count {
            let gram = read_wire_string(input)?;
            let refs = input.read_u32::<BigEndian>()?;
            let mut headers = Vec::with_capacity(refs as usize);
            for _ in 0..refs {
                let id = input.read_u32::<BigEndian>()?;
                let size = input.read_u32::<BigEndian>()?;
                headers.push((id, size));
            }
            dump.push((gram, headers));
        }
        Ok(dump)
    }

    ///Rebuilds the hash from a shallow dump. Every list comes back as
    ///an unloaded stub wired to `backend` for the lazy load.
    pub(crate) fn from_shallow_dump(
        dump: Vec<(String, Vec<(u32, u32)>)>,
        max_gram_size: u32,
        min_gram_size: u32,
        backend: &Arc<ShallowBackend>,
    ) -> GramHash {
        let mut hash = GramHash::new(max_gram_size, min_gram_size);
        for (gram, headers) in dump {
            let mut node = GramNode::new();
            for (id, size) in headers {
                node.push(Arc::new(KeyList::stub(id, size, Arc::clone(backend))));
            }
            hash.insert_loaded_node(&gram, node);
        }
        hash.recount_all_nodes();
        hash
    }

    ///Rebuilds the hash from a deep dump with all payloads in memory.
    pub(crate) fn load_deep<R: Read>(
        input: &mut R,
        max_gram_size: u32,
        min_gram_size: u32,
    ) -> Result<GramHash, DictError> {
        let mut hash = GramHash::new(max_gram_size, min_gram_size);
        let count = input.read_u32::<BigEndian>()?;
        for _ in 0..count {
            let gram = read_wire_string(input)?;
            let node = GramNode::load_deep(input)?;
            hash.insert_loaded_node(&gram, node);
        }
        hash.recount_all_nodes();
        Ok(hash)
    }
}
