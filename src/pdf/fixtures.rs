//! In-memory PDFs with outlines for tests.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};

pub struct OutlineNode {
    pub title: &'static str,
    pub page: u32,
    pub children: Vec<OutlineNode>,
}

pub fn node(title: &'static str, page: u32, children: Vec<OutlineNode>) -> OutlineNode {
    OutlineNode {
        title,
        page,
        children,
    }
}

/// `[page_ref /Fit]`
pub fn page_dest(page: ObjectId) -> Object {
    Object::Array(vec![Object::Reference(page), Object::Name(b"Fit".to_vec())])
}

/// A document with `num_pages` pages, each showing "Page N", and the given outline.
pub fn build_document(num_pages: u32, outline: &[OutlineNode]) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::new();
    for i in 0..num_pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(12)]),
                Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        format!("Page {}", i + 1).into_bytes(),
                        StringFormat::Literal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

        let page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
        ]);
        page_ids.push(doc.add_object(page));
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let mut catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);

    if !outline.is_empty() {
        let outlines_id = doc.new_object_id();
        let mut outlines = Dictionary::from_iter(vec![("Type", Object::Name(b"Outlines".to_vec()))]);
        if let Some((first, last)) = add_items(&mut doc, outlines_id, outline, &page_ids) {
            outlines.set("First", Object::Reference(first));
            outlines.set("Last", Object::Reference(last));
            outlines.set("Count", Object::Integer(outline.len() as i64));
        }
        doc.objects.insert(outlines_id, Object::Dictionary(outlines));
        catalog.set("Outlines", Object::Reference(outlines_id));
    }

    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc
}

/// Serialized form of [`build_document`].
pub fn build_pdf(num_pages: u32, outline: &[OutlineNode]) -> Vec<u8> {
    let mut doc = build_document(num_pages, outline);
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Text of the "Page N" marker on every page of `doc`, in page order.
pub fn page_markers(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .into_values()
        .map(|id| {
            let content = doc.get_page_content(id).unwrap();
            let text = String::from_utf8_lossy(&content);
            let start = text.find("(Page ").unwrap() + 1;
            let end = start + text[start..].find(')').unwrap();
            text[start..end].to_string()
        })
        .collect()
}

fn add_items(
    doc: &mut Document,
    parent: ObjectId,
    items: &[OutlineNode],
    page_ids: &[ObjectId],
) -> Option<(ObjectId, ObjectId)> {
    let ids: Vec<ObjectId> = items.iter().map(|_| doc.new_object_id()).collect();

    for (i, item) in items.iter().enumerate() {
        let mut dict = Dictionary::from_iter(vec![
            (
                "Title",
                Object::String(item.title.as_bytes().to_vec(), StringFormat::Literal),
            ),
            ("Parent", Object::Reference(parent)),
            ("Dest", page_dest(page_ids[item.page as usize - 1])),
        ]);
        if i > 0 {
            dict.set("Prev", Object::Reference(ids[i - 1]));
        }
        if i + 1 < ids.len() {
            dict.set("Next", Object::Reference(ids[i + 1]));
        }
        if let Some((first, last)) = add_items(doc, ids[i], &item.children, page_ids) {
            dict.set("First", Object::Reference(first));
            dict.set("Last", Object::Reference(last));
            dict.set("Count", Object::Integer(item.children.len() as i64));
        }
        doc.objects.insert(ids[i], Object::Dictionary(dict));
    }

    Some((*ids.first()?, *ids.last()?))
}
