use std::{env, time::Instant};

use rayon::prelude::*;

use ase_coding::{helpers::CodeStats, AdaptiveEncoder, AseConfig, Result, SearchMode, WidthMode};

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("warn").init();

    let path = env::args().nth(1).unwrap_or_else(|| "book1".to_string());
    let buf = std::fs::read(path)?;

    let modes = [
        (SearchMode::Faithful, WidthMode::PostPush),
        (SearchMode::Full, WidthMode::PostPush),
        (SearchMode::Full, WidthMode::PrePush),
    ];
    let grid: Vec<_> = modes
        .into_iter()
        .flat_map(|mode| (1..=8).map(move |log_cap| (mode, 1 << log_cap)))
        .flat_map(|(mode, capacity)| (1..=32).map(move |decay_period| (mode, capacity, decay_period)))
        .collect();

    let timer = Instant::now();
    let mut results = grid
        .into_par_iter()
        .map(|((search, width), capacity, decay_period)| {
            let config = AseConfig { capacity, decay_period, search, width, ..Default::default() };
            exec(&buf, &config).map(|csize| (csize, config))
        })
        .collect::<Result<Vec<_>>>()?;
    results.sort_by_key(|&(csize, _)| csize);

    for (csize, config) in results.iter().take(10) {
        println!(
            "[ase] [cap: {:3}, decay: {:2}, {:?}/{:?}] csize: {} (ratio: {:.3})",
            config.capacity,
            config.decay_period,
            config.search,
            config.width,
            csize,
            *csize as f64 / buf.len() as f64
        );
    }
    println!("search took: {:?}", timer.elapsed());

    Ok(())
}

fn exec(buf: &[u8], config: &AseConfig) -> Result<u64> {
    let mut encoder = AdaptiveEncoder::new(config)?;
    let mut stats = CodeStats::new();
    encoder.encode_into(buf.iter().map(|&b| u32::from(b)), &mut stats)?;
    Ok(stats.result())
}
