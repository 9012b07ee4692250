use std::path::{Path, PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand};
use log::{error, info};

use trackside::{
    AnalysisTier, AppConfig, ConfigurationProfile, DiagnosticEngine, DiagnosticRequest,
    FileBasedStorage, OutputFormat, SavedSetup, SetupStorage, Symptom, SymptomProfile,
    TrackContext, TracksideError,
    diagnostics::profile::{SurfaceCondition, TemperatureBand, TrackCategory},
    writer,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ClapArgs, Debug)]
struct TrackArgs {
    /// Track category, e.g. road-course, oval-short, superspeedway
    #[arg(long)]
    track: Option<TrackCategory>,

    #[arg(long)]
    surface: Option<SurfaceCondition>,

    #[arg(long)]
    temperature: Option<TemperatureBand>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Diagnose a setup against the reported handling symptoms
    Diagnose {
        /// Setup file (JSON) to diagnose
        #[arg(short, long, conflicts_with = "setup")]
        input: Option<PathBuf>,

        /// Name of a saved setup to diagnose
        #[arg(short, long)]
        setup: Option<String>,

        #[arg(long = "symptom", value_enum)]
        symptoms: Vec<Symptom>,

        #[command(flatten)]
        track: TrackArgs,

        #[arg(short, long)]
        tier: Option<AnalysisTier>,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Diagnose every request in a JSON lines file
    Batch {
        #[arg(short, long)]
        input: PathBuf,

        /// Report file; reports are printed when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long)]
        tier: Option<AnalysisTier>,
    },
    /// Save a setup file under a name
    Save {
        name: String,

        #[arg(short, long)]
        input: PathBuf,

        #[arg(long)]
        vehicle: Option<String>,

        #[arg(long)]
        track_name: Option<String>,

        #[arg(long = "symptom", value_enum)]
        symptoms: Vec<Symptom>,

        #[command(flatten)]
        track: TrackArgs,
    },
    /// List saved setups
    List,
    /// Delete a saved setup
    Delete { name: String },
    /// Show or change the default settings
    Config {
        #[arg(long)]
        tier: Option<AnalysisTier>,

        #[arg(long)]
        track: Option<TrackCategory>,

        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        #[arg(long)]
        setup_dir: Option<PathBuf>,
    },
}

impl TrackArgs {
    fn context(&self, base: TrackContext) -> TrackContext {
        TrackContext {
            category: self.track.unwrap_or(base.category),
            surface: self.surface.unwrap_or(base.surface),
            temperature: self.temperature.unwrap_or(base.temperature),
        }
    }
}

fn read_setup_file(input: &Path) -> Result<ConfigurationProfile, TracksideError> {
    let path = format!("{:?}", input);
    let file = std::fs::File::open(input).map_err(|e| TracksideError::InputReadError {
        path: path.clone(),
        source: e,
    })?;
    serde_json::from_reader(file).map_err(|e| TracksideError::InputParseError { path, source: e })
}

fn storage(app_config: &AppConfig) -> Result<FileBasedStorage, TracksideError> {
    FileBasedStorage::new(app_config.setup_dir()?)
}

fn diagnose(
    app_config: &AppConfig,
    input: Option<&Path>,
    setup: Option<&str>,
    symptoms: &[Symptom],
    track: &TrackArgs,
    tier: Option<AnalysisTier>,
    format: Option<OutputFormat>,
) -> Result<(), TracksideError> {
    let default_track = TrackContext {
        category: app_config.default_track,
        ..Default::default()
    };

    let mut request = match (input, setup) {
        (Some(input), _) => DiagnosticRequest {
            config: read_setup_file(input)?,
            track: track.context(default_track),
            ..Default::default()
        },
        (None, Some(name)) => {
            let saved = storage(app_config)?.load_setup(name)?.ok_or_else(|| {
                TracksideError::SetupNotFound {
                    name: name.to_string(),
                }
            })?;
            DiagnosticRequest {
                setup_name: Some(saved.name),
                config: saved.config,
                symptoms: saved.symptoms,
                track: track.context(saved.track),
                tier: None,
            }
        }
        (None, None) => {
            return Err(TracksideError::InvalidUserInput {
                field: "input".to_string(),
                reason: "Provide a setup file with --input or a saved setup with --setup"
                    .to_string(),
            });
        }
    };

    // Symptoms given on the command line replace the saved ones
    if !symptoms.is_empty() {
        request.symptoms = SymptomProfile::from_symptoms(symptoms.iter().copied());
    }

    let engine = DiagnosticEngine::new(tier.unwrap_or(app_config.default_tier));
    let report = engine.handle(&request);
    match format.unwrap_or(app_config.output_format) {
        OutputFormat::Text => print!("{}", writer::render_report(&report)),
        OutputFormat::Json => println!("{}", writer::report_to_json(&report)?),
    }
    Ok(())
}

fn batch(
    app_config: &AppConfig,
    input: &Path,
    output: Option<&Path>,
    tier: Option<AnalysisTier>,
) -> Result<(), TracksideError> {
    let requests: Vec<DiagnosticRequest> = writer::read_requests(input)?;
    info!("Loaded {} diagnostic requests from {:?}", requests.len(), input);

    let engine = DiagnosticEngine::new(tier.unwrap_or(app_config.default_tier));
    let reports: Vec<_> = requests.iter().map(|request| engine.handle(request)).collect();

    match output {
        Some(output) => writer::write_reports(output, &reports),
        None => {
            for report in &reports {
                println!("{}", writer::render_report(report));
            }
            Ok(())
        }
    }
}

fn save(
    app_config: &AppConfig,
    name: &str,
    input: &Path,
    vehicle: Option<String>,
    track_name: Option<String>,
    symptoms: &[Symptom],
    track: &TrackArgs,
) -> Result<(), TracksideError> {
    let setup = SavedSetup {
        name: name.to_string(),
        vehicle,
        track_name,
        track: track.context(TrackContext {
            category: app_config.default_track,
            ..Default::default()
        }),
        config: read_setup_file(input)?,
        symptoms: SymptomProfile::from_symptoms(symptoms.iter().copied()),
    };
    let mut storage = storage(app_config)?;
    let replaced = storage.setup_exists(name)?;
    storage.save_setup(&setup)?;
    if replaced {
        println!("Updated setup '{}'", name);
    } else {
        println!("Saved setup '{}'", name);
    }
    Ok(())
}

fn update_config(
    mut app_config: AppConfig,
    tier: Option<AnalysisTier>,
    track: Option<TrackCategory>,
    format: Option<OutputFormat>,
    setup_dir: Option<PathBuf>,
) -> Result<(), TracksideError> {
    let changed = tier.is_some() || track.is_some() || format.is_some() || setup_dir.is_some();
    if let Some(tier) = tier {
        app_config.default_tier = tier;
    }
    if let Some(track) = track {
        app_config.default_track = track;
    }
    if let Some(format) = format {
        app_config.output_format = format;
    }
    if setup_dir.is_some() {
        app_config.setup_dir = setup_dir;
    }

    if changed {
        let path = app_config.save()?;
        println!("Saved config to {:?}", path);
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&app_config)
            .map_err(|e| TracksideError::ConfigSerializeError { source: e })?
    );
    Ok(())
}

fn run(cli: Args) -> Result<(), TracksideError> {
    let app_config = AppConfig::from_local_file();
    match cli.command {
        Commands::Diagnose {
            input,
            setup,
            symptoms,
            track,
            tier,
            format,
        } => diagnose(
            &app_config,
            input.as_deref(),
            setup.as_deref(),
            &symptoms,
            &track,
            tier,
            format,
        ),
        Commands::Batch {
            input,
            output,
            tier,
        } => batch(&app_config, &input, output.as_deref(), tier),
        Commands::Save {
            name,
            input,
            vehicle,
            track_name,
            symptoms,
            track,
        } => save(
            &app_config,
            &name,
            &input,
            vehicle,
            track_name,
            &symptoms,
            &track,
        ),
        Commands::List => {
            let names = storage(&app_config)?.list_setups()?;
            if names.is_empty() {
                println!("No saved setups");
            }
            for name in names {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Delete { name } => {
            storage(&app_config)?.delete_setup(&name)?;
            println!("Deleted setup '{}'", name);
            Ok(())
        }
        Commands::Config {
            tier,
            track,
            format,
            setup_dir,
        } => update_config(app_config, tier, track, format, setup_dir),
    }
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    if let Err(e) = run(cli) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
