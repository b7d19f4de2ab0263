use std::time::Instant;
use std::{env, fs, path::PathBuf};

use tracing::info;
use tracing_subscriber::EnvFilter;

use ase_coding::{helpers::CodeStats, parallel, AdaptiveEncoder, AseConfig, Result, SlotState};

#[derive(Clone, Copy)]
enum Action {
    Compress,
    Stats,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env("ASE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 && args.len() != 4 {
        print_usage_and_exit("Invokation doesn't match usage! Provide 2 or 3 arguments.");
    }
    let path = PathBuf::from(&args[2]);
    let action = match args[1].as_str() {
        "c" => Action::Compress,
        "s" => Action::Stats,
        _ => print_usage_and_exit("Unrecognized option -> <action>!"),
    };
    let config = match args.get(3) {
        Some(config_path) => AseConfig::from_file(config_path)?,
        None => AseConfig::default(),
    };
    print_settings(&config);

    if path.is_dir() {
        for file in fs::read_dir(path)? {
            let file_path = file?.path();
            if file_path.is_file() {
                run(file_path, action, &config)?;
            }
        }
    } else if path.is_file() {
        run(path, action, &config)?;
    } else {
        print_usage_and_exit("Path must be a file or a directory!");
    }

    Ok(())
}

fn run(file_path: PathBuf, action: Action, config: &AseConfig) -> Result<()> {
    let buf = fs::read(&file_path)?;
    let timer = Instant::now();

    match action {
        Action::Compress => {
            let mut out_path = env::current_dir()?;
            out_path.push(file_path.file_name().unwrap_or_default());
            let out_path = out_path.with_extension("ase");

            let chunks = parallel::compress_chunks(&buf, config)?;
            let bits: u64 = chunks.iter().map(|c| c.bits).sum();
            let data: Vec<u8> = chunks.into_iter().flat_map(|c| c.data).collect();
            fs::write(&out_path, &data)?;
            info!(
                file = %file_path.display(),
                raw = buf.len(),
                bits,
                compressed = data.len(),
                elapsed = ?timer.elapsed(),
                "compressed"
            );
        }
        Action::Stats => {
            let mut encoder = AdaptiveEncoder::new(config)?;
            let mut stats = CodeStats::new();
            encoder.encode_into(buf.iter().map(|&b| u32::from(b)), &mut stats)?;
            println!("Filename: {}", file_path.display());
            println!("Raw: {} bytes", buf.len());
            println!(
                "Compressed: {} bytes (ratio: {:.3}), hits: {}, misses: {}",
                stats.result(),
                stats.ratio(buf.len()),
                stats.hits(),
                stats.misses()
            );
            println!("Compression time: {:?}", timer.elapsed());
            print_entries(&encoder, config);
        }
    }

    Ok(())
}

fn print_settings(config: &AseConfig) {
    println!(" * Max entries: {}", config.capacity);
    println!(" * Max index in bit length: {}", config.max_index_width());
    println!(" * Input symbol size: {}", config.input_symbol_width);
    println!(" * Decay period: {}", config.decay_period);
    println!(" * Search: {:?}, width: {:?}", config.search, config.width);
}

fn print_entries(encoder: &AdaptiveEncoder, config: &AseConfig) {
    let table = encoder.table();
    let index_width = usize::try_from(config.max_index_width()).unwrap_or(0);
    let symbol_width = usize::from(encoder.symbol_width());

    println!(" * Decay counter: {} (period: {})", table.decay_counter(), table.decay_period());
    println!(" * Occupied entries: {}", table.occupied());
    for (i, (slot, state)) in table.slots().iter().zip(table.slot_states()).enumerate() {
        let entry = slot.map_or_else(|| "-".to_string(), |s| format!("{s:0symbol_width$b}"));
        let label = match state {
            SlotState::Last => "Last",
            SlotState::Invalidated => "Inv",
            SlotState::Live | SlotState::Empty => "",
        };
        println!("{i:>4} [{i:0index_width$b}]  {entry:>width$}  {label}", width = symbol_width);
    }
}

fn print_usage_and_exit(msg: &str) -> ! {
    println!("Usage: ase <Action> <Path> [config.toml]");
    println!("<Action>: c (compress to <name>.ase), s (stats + final table)");
    println!("<Path> can be a single file or a directory");
    println!("Note: Directories are shallow traversed");
    eprintln!("{msg}");
    std::process::exit(2);
}
