use lexscan_core::error::LexscanError;
use lexscan_core::export;
use lexscan_core::model::AnalysisRecord;

pub fn print(record: &AnalysisRecord) -> Result<(), LexscanError> {
    let json = export::to_json(record)?;
    println!("{json}");
    Ok(())
}
