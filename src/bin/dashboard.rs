//! Command line sentiment dashboard

use std::{fs, time::Instant};

use anyhow::anyhow;
use pico_args::Arguments;
use sentiment_dashboard::{
    backend,
    cli::Page,
    config::DashboardConfig,
    dashboard::{self, Dashboard},
    datasets::{load_history, Schema, Table},
    pipelines::sentiment::{
        pipeline::{CLEAN_TEXT_COLUMN, LABEL_COLUMN},
        Pipeline, Prediction, Sentiment,
    },
};

const HELP: &str = "\
Usage: dashboard [PAGE] [TEXT] [OPTIONS]

Arguments:
  PAGE                 The page to show: 'dashboard', 'batch', 'live' or 'about' (defaults to 'dashboard')
  TEXT                 The text to classify on the 'live' page

Options:
  -h, --help           Print help
  -c, --config         Path to a JSON config file
  -m, --model-dir      Directory holding config.json, model.safetensors, and tokenizer.json or vocab.txt
  -d, --data           The historical dataset (defaults to 'data/reviews_labeled.csv')
  -i, --input          The .csv or .tsv file to score on the 'batch' page
  -t, --text-column    The column holding review text (defaults to 'content')
  -o, --output         Where to write the scored CSV (defaults to 'sentiment_results.csv')
  -s, --sentiment      The sentiment to explore (defaults to 'Positive')
  -w, --word-cloud     Write the word cloud for the selected sentiment to this SVG file
  -b, --chunk-size     Texts per forward pass during batch prediction
";

/// Default name of the exported batch results
const DEFAULT_OUTPUT: &str = "sentiment_results.csv";

/// Default text column of uploaded tables
const DEFAULT_TEXT_COLUMN: &str = "content";

/// Width of the live prediction probability bars
const PROBABILITY_BAR_WIDTH: usize = 30;

#[derive(Debug)]
struct Args {
    page: Page,
    text: Option<String>,
    config: Option<String>,
    model_dir: Option<String>,
    data: Option<String>,
    input: Option<String>,
    text_column: Option<String>,
    output: Option<String>,
    sentiment: Option<Sentiment>,
    word_cloud: Option<String>,
    chunk_size: Option<usize>,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let mut args = Args {
            config: pargs.opt_value_from_str(["-c", "--config"])?,
            model_dir: pargs.opt_value_from_str(["-m", "--model-dir"])?,
            data: pargs.opt_value_from_str(["-d", "--data"])?,
            input: pargs.opt_value_from_str(["-i", "--input"])?,
            text_column: pargs.opt_value_from_str(["-t", "--text-column"])?,
            output: pargs.opt_value_from_str(["-o", "--output"])?,
            sentiment: pargs.opt_value_from_str(["-s", "--sentiment"])?,
            word_cloud: pargs.opt_value_from_str(["-w", "--word-cloud"])?,
            chunk_size: pargs.opt_value_from_str(["-b", "--chunk-size"])?,
            page: Page::default(),
            text: None,
        };

        let free = pargs.finish();
        let mut free = free.iter().map(|arg| {
            arg.to_str()
                .map(str::to_string)
                .ok_or_else(|| anyhow!("Arguments must be valid UTF-8"))
        });

        if let Some(page) = free.next() {
            args.page = Page::try_from(page?.as_str())?;
        }

        let text = free.collect::<anyhow::Result<Vec<_>>>()?;
        if !text.is_empty() {
            args.text = Some(text.join(" "));
        }

        Ok(Some(args))
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let mut config = DashboardConfig::load_or_default(args.config.as_deref())?;

    if let Some(model_dir) = &args.model_dir {
        config.model_dir = model_dir.clone();
    }
    if let Some(data) = &args.data {
        config.data_path = data.clone();
    }
    if let Some(chunk_size) = args.chunk_size {
        config.chunk_size = chunk_size;
    }

    match args.page {
        Page::Dashboard => show_dashboard(&config, &args),
        Page::Batch => run_batch(&config, &args),
        Page::Live => run_live(&config, &args),
        Page::About => show_about(&config),
    }
}

fn build_pipeline(config: &DashboardConfig) -> anyhow::Result<Pipeline> {
    let client = backend::load_client(config);

    Ok(Pipeline::new(client, config.cleaner()?, config.chunk_size))
}

fn show_dashboard(config: &DashboardConfig, args: &Args) -> anyhow::Result<()> {
    let Some(table) = load_history(&config.data_path) else {
        println!(
            "No historical data found at '{}'.\n\
             Score a file with `dashboard batch --input reviews.csv --output {}` to get started.",
            config.data_path, config.data_path
        );

        return Ok(());
    };

    explore(&Dashboard::from_table(&table)?, config, args)
}

fn run_batch(config: &DashboardConfig, args: &Args) -> anyhow::Result<()> {
    let input = args
        .input
        .as_deref()
        .ok_or_else(|| anyhow!("Missing required option: --input"))?;

    let pipeline = build_pipeline(config)?;

    if !pipeline.client().is_available() {
        return Err(anyhow!(
            "Model is not available, cannot score {}: {}",
            input,
            pipeline.client().status()
        ));
    }

    let table = Table::from_path(input)?;
    let text_column = args.text_column.as_deref().unwrap_or(DEFAULT_TEXT_COLUMN);

    println!("Scoring {} rows from {}...", table.len(), input);

    let start = Instant::now();
    let scored = pipeline.predict_batch(table, text_column)?;
    let elapsed = start.elapsed();

    println!(
        "Scored {} rows in {:.2} seconds.\n",
        scored.len(),
        elapsed.as_secs_f64()
    );

    let schema = Schema {
        text_column: CLEAN_TEXT_COLUMN.to_string(),
        label_column: LABEL_COLUMN.to_string(),
    };

    explore(&Dashboard::from_schema(&scored, &schema)?, config, args)?;

    let output = args.output.as_deref().unwrap_or(DEFAULT_OUTPUT);
    scored.write_csv(output)?;

    println!("\nResults written to {}", output);

    Ok(())
}

fn run_live(config: &DashboardConfig, args: &Args) -> anyhow::Result<()> {
    let text = args.text.as_deref().unwrap_or_default();

    if text.trim().is_empty() {
        log::warn!("Nothing to classify");
        println!("Please enter some text to analyze.");

        return Ok(());
    }

    let pipeline = build_pipeline(config)?;

    if !pipeline.client().is_available() {
        return Err(anyhow!(
            "Model is not available: {}",
            pipeline.client().status()
        ));
    }

    print_prediction(&pipeline.predict_sentiment(text));

    Ok(())
}

fn show_about(config: &DashboardConfig) -> anyhow::Result<()> {
    let client = backend::load_client(config);

    println!("System status: {}", client.status());
    println!("Model directory: {}", config.model_dir);
    println!("Historical data: {}", config.data_path);
    println!("Max sequence length: {}", config.max_seq_length);
    println!("Batch chunk size: {}", config.chunk_size);
    println!(
        "Dictionary: {}",
        config.dictionary_path.as_deref().unwrap_or("built-in")
    );

    Ok(())
}

fn explore(dashboard: &Dashboard, config: &DashboardConfig, args: &Args) -> anyhow::Result<()> {
    let sentiment = args.sentiment.unwrap_or(Sentiment::Positive);

    print!(
        "{}",
        dashboard::render(dashboard, sentiment, config.sample_size, config.top_n)
    );

    if let Some(path) = &args.word_cloud {
        match dashboard.word_cloud(sentiment, &config.word_cloud) {
            Some(cloud) => {
                fs::write(path, cloud.to_svg()?)?;
                println!("\nWord cloud for {} written to {}", sentiment, path);
            }
            None => println!("\nNo words to draw for {}.", sentiment),
        }
    }

    Ok(())
}

fn print_prediction(prediction: &Prediction) {
    println!(
        "Prediction: {} ({:.2}% confidence)\n",
        prediction.label(),
        prediction.confidence * 100.0
    );

    for sentiment in Sentiment::ALL {
        let probability = prediction.probabilities[sentiment.id()];
        let filled = (probability * PROBABILITY_BAR_WIDTH as f32).round() as usize;

        println!(
            "{:<9} {:<width$} {:.4}",
            sentiment.as_str(),
            "#".repeat(filled),
            probability,
            width = PROBABILITY_BAR_WIDTH
        );
    }
}
