use crate::cli::args::{Cli, Commands, SettingsArgs};
use crate::cli::prompt::{Prompter, SaveDecision};
use crate::config::GeocoderSettings;
use crate::error::{ProcessingError, Result};
use crate::geocoding::{NominatimGeocoder, RateLimitedLookupClient, ReverseGeocoder};
use crate::processors::BatchProcessor;
use crate::readers::DatasetReader;
use crate::utils::coordinates::normalize_optional;
use crate::utils::filename::generate_default_output_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::CsvWriter;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;

/// How a run ended when no error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    SaveDeclined,
}

/// Answers for the `enrich` sequence; `None` means ask interactively.
#[derive(Debug, Clone)]
pub struct EnrichRequest {
    pub input: Option<PathBuf>,
    pub column: Option<String>,
    pub output: Option<PathBuf>,
    pub assume_yes: bool,
    pub delimiter: u8,
    pub show_progress: bool,
}

pub async fn run(cli: Cli) -> Result<RunOutcome> {
    match cli.command {
        Commands::Enrich {
            input,
            column,
            output,
            yes,
            delimiter,
            quiet,
            settings,
        } => {
            let delimiter = u8::try_from(delimiter).map_err(|_| {
                ProcessingError::Config(format!("Delimiter '{}' is not a single byte", delimiter))
            })?;
            let settings = load_settings(&settings)?;
            let client = build_client(&settings)?;

            let request = EnrichRequest {
                input,
                column,
                output,
                assume_yes: yes,
                delimiter,
                show_progress: !quiet,
            };

            let mut prompter = Prompter::stdio();
            enrich(request, &settings, &client, &mut prompter).await
        }

        Commands::Lookup {
            coordinate,
            settings,
        } => {
            let settings = load_settings(&settings)?;
            let client = build_client(&settings)?;

            let token = normalize_optional(Some(coordinate.as_str()));
            let result = client.lookup_country(token.as_deref()).await?;

            if result.is_found() {
                println!("{}", result.into_country());
            } else {
                println!("No country found for {}", coordinate);
            }
            Ok(RunOutcome::Completed)
        }
    }
}

fn load_settings(args: &SettingsArgs) -> Result<GeocoderSettings> {
    GeocoderSettings::load(args.config.as_deref())?.with_overrides(args.overrides())
}

fn build_client(settings: &GeocoderSettings) -> Result<RateLimitedLookupClient<NominatimGeocoder>> {
    let geocoder =
        NominatimGeocoder::new(&settings.endpoint, &settings.user_agent, settings.timeout())?;

    info!(
        "Using {} (min delay {:?}, timeout {:?})",
        geocoder.endpoint(),
        settings.min_delay(),
        settings.timeout()
    );

    Ok(RateLimitedLookupClient::from_settings(geocoder, settings))
}

/// The interactive enrich sequence: load, resolve, confirm, save.
///
/// Precondition failures (missing input, missing column, existing output)
/// surface before anything is written. Declining the save is reported as
/// [`RunOutcome::SaveDeclined`] and leaves the file system untouched.
pub async fn enrich<G, R, W>(
    request: EnrichRequest,
    settings: &GeocoderSettings,
    client: &RateLimitedLookupClient<G>,
    prompter: &mut Prompter<R, W>,
) -> Result<RunOutcome>
where
    G: ReverseGeocoder,
    R: BufRead,
    W: Write,
{
    let input = match request.input {
        Some(path) => path,
        None => PathBuf::from(prompter.ask("Input filename")?),
    };

    let mut dataset = DatasetReader::with_delimiter(request.delimiter).read(&input)?;

    let column = match request.column {
        Some(column) => column,
        None => prompter.ask("Column name")?,
    };
    let mut records = dataset.records_for_column(&column)?;

    info!(
        "Resolving {} rows of '{}' in batches of {}",
        records.len(),
        column,
        settings.batch_size
    );

    let progress = ProgressReporter::new(
        records.len() as u64,
        "Resolving countries...",
        !request.show_progress,
    );
    let summary = BatchProcessor::new(client)
        .with_batch_size(settings.batch_size)
        .process(&mut records, Some(&progress))
        .await?;
    progress.finish_with_message(&format!("Processed {} rows", summary.total_rows));

    dataset.set_country_column(&records)?;

    let output = match request.output {
        Some(path) => path,
        None => {
            let default = generate_default_output_filename(&input);
            PathBuf::from(
                prompter.ask_with_default("Output filename", &default.to_string_lossy())?,
            )
        }
    };
    CsvWriter::ensure_absent(&output)?;

    let decision = if request.assume_yes {
        SaveDecision::Save
    } else {
        prompter.confirm_save(&output)?
    };

    match decision {
        SaveDecision::Save => {
            CsvWriter::with_delimiter(request.delimiter).write_dataset(&dataset, &output)?;
            prompter.say(&format!("\n{}", summary))?;
            prompter.say("Successfully saved CSV file.")?;
            Ok(RunOutcome::Completed)
        }
        SaveDecision::Declined => {
            info!("Save of {} declined", output.display());
            Ok(RunOutcome::SaveDeclined)
        }
    }
}
