use crate::core::{
    ConfigProvider, ExportFormat, Pipeline, RenderedOutput, StandingsQuery, StandingsRow,
    StandingsSource, StandingsTable, Storage, TransformResult,
};
use crate::utils::error::{Result, StandingsError};
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Fetches one league's standings and writes them out in the configured formats.
pub struct StandingsPipeline<Src: StandingsSource, S: Storage, C: ConfigProvider> {
    pub(crate) source: Src,
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<Src: StandingsSource, S: Storage, C: ConfigProvider> StandingsPipeline<Src, S, C> {
    pub fn new(source: Src, storage: S, config: C) -> Self {
        Self {
            source,
            storage,
            config,
        }
    }
}

fn file_stem(query: &StandingsQuery) -> String {
    format!("standings_{}_{}", query.league_id, query.season)
}

fn render_delimited(rows: &[StandingsRow], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(Vec::new());

    // Written by hand so an empty table still gets its header line.
    writer.write_record(StandingsRow::COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| StandingsError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| StandingsError::ProcessingError {
        message: format!("rendered table is not valid UTF-8: {}", e),
    })
}

pub fn render(table: &StandingsTable, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Csv => render_delimited(&table.rows, b','),
        ExportFormat::Tsv => render_delimited(&table.rows, b'\t'),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(table)?),
    }
}

#[async_trait::async_trait]
impl<Src: StandingsSource, S: Storage, C: ConfigProvider> Pipeline for StandingsPipeline<Src, S, C> {
    async fn extract(&self, query: StandingsQuery) -> Result<StandingsTable> {
        self.source.fetch_standings(query).await
    }

    async fn transform(&self, table: StandingsTable) -> Result<TransformResult> {
        let formats = self.config.output_formats();
        if formats.is_empty() {
            return Err(StandingsError::ConfigValidationError {
                field: "load.output_formats".to_string(),
                message: "no output format selected".to_string(),
            });
        }

        let mut outputs = Vec::with_capacity(formats.len());
        for format in formats {
            outputs.push(RenderedOutput {
                format,
                content: render(&table, format)?,
            });
        }

        Ok(TransformResult { table, outputs })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let stem = file_stem(&result.table.query);

        if self.config.compress_output() {
            let filename = format!("{}.zip", stem);
            tracing::debug!("Creating ZIP file with {} files", result.outputs.len());

            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
                for output in &result.outputs {
                    zip.start_file(
                        format!("{}.{}", stem, output.format.extension()),
                        SimpleFileOptions::default(),
                    )?;
                    zip.write_all(output.content.as_bytes())?;
                }
                zip.finish()?.into_inner()
            };

            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(&filename, &zip_data).await?;
            return Ok(format!("{}/{}", self.config.output_path(), filename));
        }

        let mut written = Vec::with_capacity(result.outputs.len());
        for output in &result.outputs {
            let filename = format!("{}.{}", stem, output.format.extension());
            self.storage
                .write_file(&filename, output.content.as_bytes())
                .await?;
            written.push(format!("{}/{}", self.config.output_path(), filename));
        }

        Ok(written.join(", "))
    }
}
