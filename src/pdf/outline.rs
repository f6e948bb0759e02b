use anyhow::{Context, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::{HashMap, HashSet};
use tracing::warn;

use super::decode_pdf_string;
use crate::chapters::Bookmark;

/// Nested destination lookups deeper than this are treated as unresolvable.
const MAX_DEST_DEPTH: usize = 16;

/// Flatten the document outline into bookmarks, parents before children.
pub fn extract_bookmarks(doc: &Document) -> Result<Vec<Bookmark>> {
    let catalog = doc
        .catalog()
        .with_context(|| "Failed to get document catalog")?;

    let outlines = match catalog.get(b"Outlines").ok().and_then(|o| as_dict(doc, o)) {
        Some(d) => d,
        None => return Ok(Vec::new()),
    };

    let first = match outlines.get(b"First") {
        Ok(Object::Reference(r)) => *r,
        _ => return Ok(Vec::new()),
    };

    let page_map: HashMap<ObjectId, u32> = doc
        .get_pages()
        .into_iter()
        .map(|(num, id)| (id, num))
        .collect();

    let mut walker = OutlineWalker {
        doc,
        page_map,
        visited: HashSet::new(),
        bookmarks: Vec::new(),
    };
    walker.walk(first, 0);
    Ok(walker.bookmarks)
}

struct OutlineWalker<'a> {
    doc: &'a Document,
    page_map: HashMap<ObjectId, u32>,
    visited: HashSet<ObjectId>,
    bookmarks: Vec<Bookmark>,
}

impl<'a> OutlineWalker<'a> {
    fn walk(&mut self, first: ObjectId, level: u32) {
        let doc = self.doc;
        let mut current = Some(first);

        while let Some(id) = current {
            if !self.visited.insert(id) {
                warn!(object = ?id, "outline loops back on itself; stopping");
                break;
            }
            let dict = match doc.get_dictionary(id) {
                Ok(d) => d,
                Err(_) => break,
            };

            let title = match dict.get(b"Title") {
                Ok(Object::String(bytes, _)) => decode_pdf_string(bytes),
                _ => "Untitled".to_string(),
            };

            match self.item_page(dict) {
                Some(page) => self.bookmarks.push(Bookmark::new(title, page, level)),
                None => warn!(title = %title, "bookmark has no resolvable page; skipping"),
            }

            if let Ok(Object::Reference(child)) = dict.get(b"First") {
                self.walk(*child, level + 1);
            }

            current = match dict.get(b"Next") {
                Ok(Object::Reference(r)) => Some(*r),
                _ => None,
            };
        }
    }

    fn item_page(&self, item: &Dictionary) -> Option<u32> {
        if let Ok(dest) = item.get(b"Dest") {
            return self.resolve(dest, 0);
        }

        let action = item.get(b"A").ok().and_then(|a| as_dict(self.doc, a))?;
        match action.get(b"S") {
            Ok(Object::Name(kind)) if kind == b"GoTo" => self.resolve(action.get(b"D").ok()?, 0),
            _ => None,
        }
    }

    fn resolve(&self, dest: &Object, depth: usize) -> Option<u32> {
        if depth > MAX_DEST_DEPTH {
            return None;
        }
        match dest {
            Object::String(name, _) | Object::Name(name) => {
                self.resolve(self.named_destination(name)?, depth + 1)
            }
            // [page_ref, /XYZ, left, top, zoom] or similar
            Object::Array(arr) => match arr.first() {
                Some(Object::Reference(page_ref)) => self.page_map.get(page_ref).copied(),
                // Remote-style destinations give a 0-based page index
                Some(Object::Integer(index)) => u32::try_from(*index).ok()?.checked_add(1),
                _ => None,
            },
            // Named destinations may map to a dictionary with the array under /D
            Object::Dictionary(dict) => self.resolve(dict.get(b"D").ok()?, depth + 1),
            Object::Reference(r) => self.resolve(self.doc.get_object(*r).ok()?, depth + 1),
            _ => None,
        }
    }

    fn named_destination(&self, name: &[u8]) -> Option<&'a Object> {
        let catalog = self.doc.catalog().ok()?;

        let tree = catalog
            .get(b"Names")
            .ok()
            .and_then(|n| as_dict(self.doc, n))
            .and_then(|names| names.get(b"Dests").ok())
            .and_then(|d| as_dict(self.doc, d));
        if let Some(found) = tree.and_then(|t| self.search_name_tree(t, name, 0)) {
            return Some(found);
        }

        // Older documents keep a plain /Dests dictionary in the catalog
        catalog
            .get(b"Dests")
            .ok()
            .and_then(|d| as_dict(self.doc, d))?
            .get(name)
            .ok()
    }

    fn search_name_tree(
        &self,
        node: &'a Dictionary,
        name: &[u8],
        depth: usize,
    ) -> Option<&'a Object> {
        if depth > MAX_DEST_DEPTH {
            return None;
        }

        if let Ok(Object::Array(names)) = node.get(b"Names") {
            for pair in names.chunks_exact(2) {
                if let Object::String(key, _) = &pair[0] {
                    if key == name {
                        return Some(&pair[1]);
                    }
                }
            }
        }

        if let Ok(Object::Array(kids)) = node.get(b"Kids") {
            for kid in kids {
                if let Some(found) = as_dict(self.doc, kid)
                    .and_then(|k| self.search_name_tree(k, name, depth + 1))
                {
                    return Some(found);
                }
            }
        }

        None
    }
}

/// Dictionary stored inline or behind a reference.
fn as_dict<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    match obj {
        Object::Dictionary(d) => Some(d),
        Object::Reference(r) => doc.get_dictionary(*r).ok(),
        _ => None,
    }
}
