//! Low-level PDF file assembly: numbered objects, streams, xref and trailer.
use super::stream::PageStream;
use super::text::info_string;
use super::PdfOptions;
use crate::common::Result;
use crate::common::unit::mm_to_pt;
use crate::layout::{PageGeometry, Typography};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::io::Write;

const CATALOG: usize = 1;
const PAGES: usize = 2;
const FONT_REGULAR: usize = 3;
const FONT_BOLD: usize = 4;
const FONT_CJK: usize = 5;
const FONT_CJK_DESCENDANT: usize = 6;
const FONT_CJK_DESCRIPTOR: usize = 7;
const INFO: usize = 8;
const FIRST_PAGE: usize = 9;

/// Compression level for content streams; fixed so output is reproducible.
const STREAM_COMPRESSION: u32 = 6;

/// Object id of the page object for page `index`; its content stream follows it.
#[inline]
const fn page_object(index: usize) -> usize {
    FIRST_PAGE + index * 2
}

/// Append-only PDF body writer that records object offsets for the xref table.
struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut buf = Vec::with_capacity(16 * 1024);
        buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            buf,
            offsets: Vec::new(),
        }
    }

    fn begin(&mut self, id: usize) {
        debug_assert_eq!(id, self.offsets.len() + 1, "objects must be written in id order");
        self.offsets.push(self.buf.len());
        self.push_number(id);
        self.buf.extend_from_slice(b" 0 obj\n");
    }

    fn end(&mut self) {
        self.buf.extend_from_slice(b"endobj\n");
    }

    fn object(&mut self, id: usize, body: &str) {
        self.begin(id);
        self.buf.extend_from_slice(body.as_bytes());
        self.buf.push(b'\n');
        self.end();
    }

    fn stream(&mut self, id: usize, data: &[u8], compressed: bool) {
        self.begin(id);
        self.buf.extend_from_slice(b"<< /Length ");
        self.push_number(data.len());
        if compressed {
            self.buf.extend_from_slice(b" /Filter /FlateDecode");
        }
        self.buf.extend_from_slice(b" >>\nstream\n");
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\nendstream\n");
        self.end();
    }

    fn push_number(&mut self, n: usize) {
        let mut fmt = itoa::Buffer::new();
        self.buf.extend_from_slice(fmt.format(n).as_bytes());
    }

    fn finish(mut self) -> Vec<u8> {
        let xref_start = self.buf.len();
        let size = self.offsets.len() + 1;
        self.buf.extend_from_slice(b"xref\n0 ");
        self.push_number(size);
        self.buf.extend_from_slice(b"\n0000000000 65535 f \n");
        for offset in &self.offsets {
            self.buf
                .extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        self.buf.extend_from_slice(b"trailer\n<< /Size ");
        self.push_number(size);
        self.buf.extend_from_slice(format!(" /Root {CATALOG} 0 R /Info {INFO} 0 R >>\nstartxref\n").as_bytes());
        self.push_number(xref_start);
        self.buf.extend_from_slice(b"\n%%EOF\n");
        self.buf
    }
}

fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(STREAM_COMPRESSION));
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Write a complete PDF file for the given page streams.
///
/// `pages` must not be empty; callers always supply at least one (possibly
/// blank) page.
pub fn write_pdf(
    pages: &[PageStream],
    title: &str,
    geometry: &PageGeometry,
    typography: &Typography,
    options: &PdfOptions,
) -> Result<Vec<u8>> {
    let width = mm_to_pt(geometry.page_width);
    let height = mm_to_pt(geometry.page_height);
    let mut pdf = PdfWriter::new();

    pdf.object(CATALOG, &format!("<< /Type /Catalog /Pages {PAGES} 0 R >>"));

    let kids = (0..pages.len())
        .map(|i| format!("{} 0 R", page_object(i)))
        .collect::<Vec<_>>()
        .join(" ");
    pdf.object(
        PAGES,
        &format!(
            "<< /Type /Pages /Kids [{}] /Count {} /MediaBox [0 0 {:.2} {:.2}] >>",
            kids,
            pages.len(),
            width,
            height
        ),
    );

    pdf.object(
        FONT_REGULAR,
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
    );
    pdf.object(
        FONT_BOLD,
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>",
    );
    pdf.object(
        FONT_CJK,
        &format!(
            "<< /Type /Font /Subtype /Type0 /BaseFont /STSong-Light /Encoding /UniGB-UCS2-H /DescendantFonts [{FONT_CJK_DESCENDANT} 0 R] >>"
        ),
    );
    pdf.object(
        FONT_CJK_DESCENDANT,
        &format!(
            "<< /Type /Font /Subtype /CIDFontType0 /BaseFont /STSong-Light /CIDSystemInfo << /Registry (Adobe) /Ordering (GB1) /Supplement 2 >> /FontDescriptor {FONT_CJK_DESCRIPTOR} 0 R /DW 1000 >>"
        ),
    );
    pdf.object(
        FONT_CJK_DESCRIPTOR,
        "<< /Type /FontDescriptor /FontName /STSong-Light /Flags 6 /FontBBox [-25 -254 1000 880] /ItalicAngle 0 /Ascent 880 /Descent -120 /CapHeight 880 /StemV 93 >>",
    );

    let mut info = String::from("<< ");
    if !title.is_empty() {
        info.push_str("/Title ");
        info.push_str(&info_string(title));
        info.push(' ');
    }
    info.push_str("/Producer ");
    info.push_str(&info_string(&options.producer));
    info.push_str(" >>");
    pdf.object(INFO, &info);

    let resources = format!(
        "<< /Font << /F1 {FONT_REGULAR} 0 R /F2 {FONT_BOLD} 0 R /F3 {FONT_CJK} 0 R >> >>"
    );
    let mut stream_bytes = 0usize;
    for (index, page) in pages.iter().enumerate() {
        let id = page_object(index);
        pdf.object(
            id,
            &format!(
                "<< /Type /Page /Parent {PAGES} 0 R /Resources {} /Contents {} 0 R >>",
                resources,
                id + 1
            ),
        );

        let content = page.encode(geometry, typography)?;
        let data = if options.compress {
            compress(content.as_bytes())?
        } else {
            content.into_bytes()
        };
        stream_bytes += data.len();
        pdf.stream(id + 1, &data, options.compress);
    }

    let bytes = pdf.finish();
    tracing::debug!(
        pages = pages.len(),
        stream_bytes,
        total_bytes = bytes.len(),
        "wrote pdf"
    );
    Ok(bytes)
}
