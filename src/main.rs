use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use kclust::{ClusterHyperParams, GroupStatistics, Hca, Method};
use log::info;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    Kmeans,
    Kmedoids,
    Hca,
    /// Full hierarchical merge history instead of labels
    Dendrogram,
}

/// Cluster the numeric columns of a CSV file.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Opts {
    /// Input CSV file
    input: PathBuf,

    #[arg(short, long, value_enum, default_value_t = Algorithm::Kmeans)]
    method: Algorithm,

    /// Number of groups, K
    #[arg(short, long, default_value_t = 2)]
    groups: usize,

    /// Assignment and update rounds for kmeans and kmedoids
    #[arg(long, default_value_t = 13)]
    rounds: usize,

    /// Seed for the initial centers
    #[arg(long, default_value_t = 500)]
    seed: u64,

    /// Leading columns to ignore
    #[arg(long, default_value_t = 0)]
    skip: usize,

    /// Numeric columns after the skipped ones. Remaining columns are categorical.
    /// Defaults to every remaining column.
    #[arg(long)]
    numeric: Option<usize>,

    /// The first row holds column names
    #[arg(long)]
    has_headers: bool,

    /// Where to write the labelled rows. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Where to write per group frequencies of the categorical columns
    #[arg(long)]
    stats: Option<PathBuf>,
}

struct Table {
    numeric: Vec<Vec<f64>>,
    categorical: Vec<Vec<String>>,
    categorical_names: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();

    let opts = Opts::parse();
    let table = read_table(&opts)?;
    info!(
        "Loaded {} rows with {} numeric and {} categorical columns",
        table.numeric.len(),
        table.numeric.first().map_or(0, Vec::len),
        table.categorical_names.len()
    );

    let hp = ClusterHyperParams::builder()
        .groups(opts.groups)
        .rounds(opts.rounds)
        .seed(opts.seed)
        .build();

    let method = match opts.method {
        Algorithm::Kmeans => Method::KMeans,
        Algorithm::Kmedoids => Method::KMedoids,
        Algorithm::Hca => Method::Hca,
        Algorithm::Dendrogram => return write_dendrogram(&opts, &table, hp),
    };

    let partition = method.cluster(&table.numeric, hp)?;
    let mut writer = csv::Writer::from_writer(open_output(&opts)?);
    for point in partition.points() {
        let mut record: Vec<String> = point.coords.iter().map(f64::to_string).collect();
        record.push(point.label.to_string());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    info!("Finished {method}, group sizes {:?}", partition.group_sizes());

    if let Some(path) = &opts.stats {
        if table.categorical_names.is_empty() {
            bail!("--stats needs categorical columns after the numeric ones");
        }
        let stats = GroupStatistics::new(
            &partition.labels(),
            partition.n_groups(),
            &table.categorical_names,
            &table.categorical,
        )?;
        fs::write(path, stats.to_string())
            .with_context(|| format!("Unable to write {}", path.display()))?;
    }
    Ok(())
}

fn read_table(opts: &Opts) -> anyhow::Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(opts.has_headers)
        .from_path(&opts.input)
        .with_context(|| format!("Unable to read {}", opts.input.display()))?;

    let headers: Vec<String> = if opts.has_headers {
        reader.headers()?.iter().map(String::from).collect()
    } else {
        Vec::new()
    };

    let mut numeric = Vec::new();
    let mut categorical = Vec::new();
    for (n, record) in reader.records().enumerate() {
        let record = record?;
        let fields: Vec<&str> = record.iter().skip(opts.skip).collect();
        let n_numeric = opts.numeric.unwrap_or(fields.len());
        if n_numeric > fields.len() {
            bail!("Row {n} has {} columns after skipping, expected at least {n_numeric}", fields.len());
        }
        let row = fields[..n_numeric]
            .iter()
            .map(|field| field.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Row {n} has a non-numeric feature"))?;
        numeric.push(row);
        categorical.push(fields[n_numeric..].iter().map(|field| field.to_string()).collect());
    }

    let n_categorical = categorical.first().map_or(0, Vec::len);
    let first_categorical = opts.skip + opts.numeric.unwrap_or(0);
    let categorical_names = (0..n_categorical)
        .map(|column| {
            headers
                .get(first_categorical + column)
                .cloned()
                .unwrap_or_else(|| format!("Column {}", first_categorical + column + 1))
        })
        .collect();

    Ok(Table { numeric, categorical, categorical_names })
}

fn write_dendrogram(opts: &Opts, table: &Table, hp: ClusterHyperParams) -> anyhow::Result<()> {
    let dendrogram = Hca::new(&table.numeric, hp).cluster_full_tree()?;
    let mut writer = csv::Writer::from_writer(open_output(opts)?);
    writer.write_record(["step", "left", "right", "merged", "distance", "size"])?;
    for (step, merge) in dendrogram.merges().iter().enumerate() {
        writer.write_record(&[
            step.to_string(),
            merge.left_id.to_string(),
            merge.right_id.to_string(),
            merge.merged_id.to_string(),
            merge.distance.to_string(),
            merge.size().to_string(),
        ])?;
    }
    writer.flush()?;
    info!("Finished dendrogram with {} merges", dendrogram.merges().len());
    Ok(())
}

fn open_output(opts: &Opts) -> anyhow::Result<Box<dyn Write>> {
    Ok(match &opts.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Unable to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    })
}
