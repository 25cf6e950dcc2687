use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use pluvial_synth::generate_series;

use crate::cli::SynthArgs;
use crate::config;
use crate::convert;
use crate::series::{Series, write_series};

/// Generate a synthetic series and write it to disk.
pub fn run(args: SynthArgs) -> Result<()> {
    let cfg = config::load(args.config.as_deref())?;
    let synth_cfg = convert::build_synth_config(&cfg.synth, args.days)?;

    let seed = args.seed.or(cfg.seed);
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    info!(
        n_days = synth_cfg.n_days(),
        p_wet = synth_cfg.p_wet(),
        seed = ?seed,
        "generating synthetic series"
    );
    let precip = generate_series(&synth_cfg, &mut rng).context("synthetic generation failed")?;

    let dates = cfg
        .synth
        .start_date
        .map(|start| start.iter_days().take(precip.len()).collect::<Vec<_>>());

    let series = Series { dates, precip };
    write_series(&args.output, &series)?;
    info!(path = %args.output.display(), "series written");
    Ok(())
}
