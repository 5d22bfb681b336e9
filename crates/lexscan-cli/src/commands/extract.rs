use lexscan_core::error::LexscanError;
use lexscan_core::extraction::{extract_text, PdfBackend};
use std::path::PathBuf;

pub fn run(
    pdf_file: PathBuf,
    backend: PdfBackend,
    output_file: Option<PathBuf>,
) -> Result<(), LexscanError> {
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = backend.extractor();
    let text = extract_text(&pdf_bytes, extractor.as_ref())?;

    if text.is_empty() {
        eprintln!(
            "warning: no extractable text in {} (scanned pages without a text layer?)",
            pdf_file.display()
        );
    }

    match output_file {
        Some(path) => {
            std::fs::write(&path, text.as_str())?;
            eprintln!(
                "Extracted {} characters, written to {}",
                text.len(),
                path.display()
            );
        }
        None => {
            println!("{text}");
            eprintln!("Extracted {} characters", text.len());
        }
    }

    Ok(())
}
