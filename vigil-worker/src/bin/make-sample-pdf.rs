//! Generates a one-page sample receipt PDF for exercising the submission
//! pipeline end to end. The content is fixed, so repeated runs produce a
//! document with the same fingerprint.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

const OUTPUT_PATH: &str = "sample_receipt.pdf";

fn text(font: &str, size: i64, x: i64, y: i64, line: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.into(), size.into()]),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::string_literal(line)]),
        Operation::new("ET", vec![]),
    ]
}

fn main() -> anyhow::Result<()> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let italic = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Oblique",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
            "F3" => italic,
        },
    });

    let mut operations = Vec::new();
    // Header
    operations.extend(text("F2", 16, 180, 800, "River Light & Power Co."));
    operations.extend(text("F1", 10, 210, 784, "Tax ID: 01.234.567/0001-89"));
    operations.extend(text("F1", 10, 130, 770, "1 Riverside Avenue - Downtown, Rio de Janeiro - RJ, 20090-003"));
    // Document title
    operations.extend(text("F2", 14, 190, 720, "PROOF OF RESIDENCE"));
    // Customer block
    operations.extend(text("F1", 12, 60, 670, "For:"));
    operations.extend(text("F2", 12, 130, 670, "CARLOS MAGNUS"));
    operations.extend(text("F1", 12, 60, 650, "Address:"));
    operations.extend(text("F1", 12, 130, 650, "999 Passage Street, Apt 101"));
    operations.extend(text("F1", 12, 130, 634, "Botafogo, Rio de Janeiro - RJ"));
    operations.extend(text("F1", 12, 130, 618, "Postal code: 22290-030"));
    // Account details
    operations.extend(text("F1", 12, 60, 570, "Customer number:"));
    operations.extend(text("F1", 12, 190, 570, "8765432-1"));
    operations.extend(text("F1", 12, 60, 550, "Reference month:"));
    operations.extend(text("F1", 12, 190, 550, "September 2025"));
    operations.extend(text("F1", 12, 60, 530, "Issue date:"));
    operations.extend(text("F1", 12, 190, 530, "2025-10-15"));
    // Validation footer
    operations.extend(text(
        "F3", 10, 60, 470,
        "This document is a representation of your energy bill and is valid as",
    ));
    operations.extend(text(
        "F3", 10, 60, 456,
        "proof of residence for registration purposes nationwide.",
    ));
    operations.extend(text(
        "F3", 10, 60, 430,
        "Validation code: 9A8B7C6D-E5F4-G3H2-I1J0-K9L8M7N6P5O4",
    ));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();
    doc.save(OUTPUT_PATH)?;

    println!("✅ Wrote {}", OUTPUT_PATH);
    Ok(())
}
