//! Vector PDF surface on top of lopdf.
//!
//! Output carries no creation date and no document ID, so identical input yields
//! identical bytes.

use super::layout::{PageLayout, Placement, RunKind, Surface};
use crate::error::ExportError;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

const BODY_FONT: &str = "F1";
const TITLE_FONT: &str = "F2";

pub struct PdfSurface {
    layout: PageLayout,
    title: String,
    pages: Vec<Vec<Operation>>,
}

impl PdfSurface {
    pub fn new(layout: PageLayout, title: &str) -> Self {
        Self {
            layout,
            title: title.to_string(),
            pages: Vec::new(),
        }
    }
}

impl Surface for PdfSurface {
    type Output = Vec<u8>;

    fn begin_page(&mut self, _page: usize) -> Result<(), ExportError> {
        self.pages.push(Vec::new());
        Ok(())
    }

    fn draw_text(&mut self, run: &Placement<'_>) -> Result<(), ExportError> {
        let operations = self
            .pages
            .last_mut()
            .ok_or(ExportError::PageUnsupported(run.page))?;
        let font = match run.kind {
            RunKind::Title => TITLE_FONT,
            RunKind::Body => BODY_FONT,
        };

        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![
                Object::Name(font.as_bytes().to_vec()),
                Object::Integer(i64::from(run.size)),
            ],
        ));
        operations.push(Operation::new(
            "Td",
            vec![
                Object::Integer(i64::from(run.x)),
                Object::Integer(i64::from(run.y)),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(run.text), StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
        Ok(())
    }

    fn finish(mut self) -> Result<Self::Output, ExportError> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let body_font = doc.add_object(standard_font("Helvetica"));
        let title_font = doc.add_object(standard_font("Helvetica-Bold"));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                BODY_FONT => body_font,
                TITLE_FONT => title_font,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations };
            let encoded = content
                .encode()
                .map_err(|e| ExportError::Pdf(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let media_box = vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(i64::from(self.layout.width)),
            Object::Integer(i64::from(self.layout.height)),
        ];
        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
                "Resources" => resources_id,
                "MediaBox" => media_box,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::String(encode_win_ansi(&self.title), StringFormat::Literal),
            "Producer" => Object::string_literal("Flavour Fusion"),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        Ok(bytes)
    }
}

fn standard_font(base: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => Object::Name(base.as_bytes().to_vec()),
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Encode text for a standard Type1 font. Characters outside WinAnsi become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\u{20}'..='\u{7e}' => ch as u8,
            '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            '\t' => b' ',
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8a,
            '‹' => 0x8b,
            'Œ' => 0x8c,
            'Ž' => 0x8e,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9a,
            '›' => 0x9b,
            'œ' => 0x9c,
            'ž' => 0x9e,
            'Ÿ' => 0x9f,
            _ => b'?',
        })
        .collect()
}
